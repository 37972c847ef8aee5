//! Tourists repository

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::Tourist,
};

#[derive(Clone, Default)]
pub struct TouristsRepository {
    tourists: Arc<RwLock<IndexMap<String, Tourist>>>,
}

impl TouristsRepository {
    /// All tourists in registration order
    pub async fn list(&self) -> Vec<Tourist> {
        self.tourists.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> AppResult<Tourist> {
        self.tourists
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Tourist profile not found".to_string()))
    }

    pub async fn upsert(&self, tourist: Tourist) {
        self.tourists
            .write()
            .await
            .insert(tourist.id().to_string(), tourist);
    }

    /// Apply `f` to a stored tourist and return the updated record
    pub async fn update<F>(&self, id: &str, f: F) -> AppResult<Tourist>
    where
        F: FnOnce(&mut Tourist),
    {
        let mut tourists = self.tourists.write().await;
        let tourist = tourists
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Tourist profile not found".to_string()))?;
        f(tourist);
        Ok(tourist.clone())
    }

    pub async fn count(&self) -> u64 {
        self.tourists.read().await.len() as u64
    }

    /// Mean safety score, or 0 when there are no tourists
    pub async fn average_safety_score(&self) -> f64 {
        let tourists = self.tourists.read().await;
        if tourists.is_empty() {
            return 0.0;
        }
        let total: f64 = tourists.values().map(|t| t.safety_score).sum();
        total / tourists.len() as f64
    }
}
