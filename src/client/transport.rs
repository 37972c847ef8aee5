//! Reqwest plumbing shared by the auth provider and the data fetchers.
//!
//! Owns transport details only: URL joining, bearer header, HTTP status
//! mapping and JSON decoding.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::ClientConfig;

use super::error::{ClientError, ClientResult};

/// Error body of the remote API; only the message is kept
#[derive(Deserialize)]
struct RemoteError {
    message: Option<String>,
    detail: Option<String>,
}

#[derive(Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> ClientResult<T> {
        self.request::<(), T>(Method::GET, path, query, None, token).await
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>, token: Option<&str>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], body, token).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body), token).await
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        token: Option<&str>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::Validation(format!("Invalid API URL: {}", e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "remote API error");
            return Err(map_status_error(status.as_u16(), &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("{} {}: {}", method, path, e)))
    }
}

fn map_status_error(status: u16, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<RemoteError>(body)
        .ok()
        .and_then(|e| e.message.or(e.detail))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    ClientError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = map_status_error(
            401,
            br#"{"code":2,"error":"Authentication","message":"Incorrect email or password"}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "Remote API returned 401: Incorrect email or password"
        );

        let err = map_status_error(502, b"bad gateway");
        assert!(!err.is_unauthorized());
        assert!(err.to_string().ends_with("bad gateway"));
    }

    #[test]
    fn test_base_url_trimmed() {
        let transport =
            ApiTransport::new("http://localhost:8000/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000/api/v1");
    }
}
