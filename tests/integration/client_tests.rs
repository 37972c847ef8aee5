//! Dashboard client against a live server and against an unreachable one

use std::sync::Arc;

use tokio::net::TcpListener;

use tourist_safety::{
    client::{
        dashboard::{safety_label, PoliceDashboard, TourismDashboard},
        session::{ACCESS_TOKEN_KEY, USER_KEY},
        ApiTransport, AuthContext, ClientError, DashboardApi, FileStorage, MemoryStorage,
        Storage,
    },
    config::{AppConfig, ClientConfig},
    create_router, fixtures,
    models::Role,
    repository::Repository,
    services::Services,
    AppState,
};

/// Nothing listens on port 1
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api/v1";

fn client_config(api_base_url: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: api_base_url.to_string(),
        request_timeout_secs: 2,
        ..ClientConfig::default()
    }
}

/// Serve a seeded API on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let config = AppConfig::default();
    let services = Services::new(Repository::new(), config.auth.clone());
    services.seed().await.expect("seed failed");
    let app = create_router(AppState::new(config, services));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

#[tokio::test]
async fn test_offline_login_keeps_chosen_role() {
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(UNREACHABLE_API), storage.clone()).unwrap();
    auth.restore().await;

    for role in [Role::Tourist, Role::Police, Role::Tourism] {
        let user = auth
            .login("someone@example.com", "password123", role)
            .await
            .expect("offline login failed");
        assert_eq!(user.role, role);
        assert_eq!(user.name, "someone");
        assert_eq!(user.profile_complete, role != Role::Tourist);
    }
    assert!(storage.get_item(USER_KEY).unwrap().is_some());
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_offline_wrong_password_has_no_session() {
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(UNREACHABLE_API), storage.clone()).unwrap();
    auth.restore().await;

    let err = auth
        .submit_login("someone@example.com", "wrong", Role::Police)
        .await
        .unwrap_err();
    assert_eq!(err, "Invalid credentials. Use password: password123");
    assert!(!auth.is_authenticated().await);
    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_remote_login_stores_token_and_logout_clears() {
    let base_url = spawn_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(&base_url), storage.clone()).unwrap();
    auth.restore().await;

    let user = auth
        .login("police@test.com", "password123", Role::Police)
        .await
        .expect("remote login failed");
    assert_eq!(user.name, "Officer Smith");
    assert!(auth.access_token().await.is_some());

    auth.logout().await;
    assert!(!auth.is_authenticated().await);
    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_dashboards_fall_back_to_demo_data() {
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(UNREACHABLE_API), storage).unwrap();
    let api = DashboardApi::from_config(&client_config(UNREACHABLE_API), auth.session().clone())
        .unwrap();

    let police = PoliceDashboard::load(&api).await;
    assert_eq!(police.alerts, fixtures::alerts());
    assert_eq!(police.tourists, fixtures::tourists());
    assert_eq!(police.stats, fixtures::police_dashboard_stats());

    let tourism = TourismDashboard::load(&api).await;
    assert_eq!(tourism.tourists, fixtures::tourists());
    assert_eq!(tourism.statistics, fixtures::trip_statistics());
    assert_eq!(tourism.influx, fixtures::influx("day"));
    assert_eq!(tourism.top_destinations, fixtures::top_destinations());
    assert_eq!(tourism.languages, fixtures::language_distribution());
    assert_eq!(tourism.safety_metrics, fixtures::safety_metrics());
    let mut activities = fixtures::recent_activities();
    activities.truncate(10);
    assert_eq!(tourism.recent_activities, activities);

    assert_eq!(api.fetch_influx("week").await, fixtures::influx("week"));
    assert_eq!(api.fetch_recent_activities(1).await.len(), 1);

    // Mutations report success even though nothing was sent
    assert!(api.acknowledge_alert("alert-1").await);
    assert!(api.update_safety_score(12.0).await);
    assert!(!api.ask_chatbot("Is it safe here?").await.is_empty());
}

#[tokio::test]
async fn test_police_dashboard_reads_live_data() {
    let base_url = spawn_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(&base_url), storage).unwrap();
    auth.login("police@test.com", "password123", Role::Police)
        .await
        .expect("remote login failed");

    let api = DashboardApi::from_config(&client_config(&base_url), auth.session().clone()).unwrap();
    assert!(api.resolve_alert("alert-1").await);

    let police = PoliceDashboard::load(&api).await;
    let alert = police.alerts.iter().find(|a| a.id == "alert-1").unwrap();
    assert_eq!(alert.status.to_string(), "resolved");
    assert_eq!(police.tourists.len(), 3);
}

#[tokio::test]
async fn test_rejected_requests_fall_back_to_demo_data() {
    let base_url = spawn_server().await;
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthContext::from_config(&client_config(&base_url), storage).unwrap();
    auth.login("police@test.com", "password123", Role::Police)
        .await
        .expect("remote login failed");
    let token = auth.access_token().await;

    // Tourism routes answer 403 to a police token
    let transport = ApiTransport::from_config(&client_config(&base_url)).unwrap();
    let err = transport
        .get_with_query::<serde_json::Value>("/tourism/tourists", &[], token.as_deref())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 403, .. }));
    assert!(err.is_unauthorized());

    let api = DashboardApi::from_config(&client_config(&base_url), auth.session().clone()).unwrap();
    // The live registry holds three tourists; the fixture set holds two
    assert_eq!(api.fetch_tourists().await, fixtures::tourists());
    assert_eq!(api.fetch_trip_statistics().await, fixtures::trip_statistics());
    assert_eq!(api.fetch_safety_metrics().await, fixtures::safety_metrics());
    assert_eq!(api.fetch_police_tourists().await.len(), 3);
}

#[tokio::test]
async fn test_session_survives_restart_in_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");
    let config = ClientConfig {
        storage_path: path.to_string_lossy().into_owned(),
        ..client_config(UNREACHABLE_API)
    };

    {
        let storage = Arc::new(FileStorage::from_config(&config));
        let auth = AuthContext::from_config(&config, storage).unwrap();
        auth.login("tourism@example.com", "password123", Role::Tourism)
            .await
            .expect("offline login failed");
    }

    let auth = AuthContext::from_config(&config, Arc::new(FileStorage::new(&path))).unwrap();
    assert!(auth.is_loading().await);
    let restored = auth.restore().await.expect("session not restored");
    assert_eq!(restored.role, Role::Tourism);
    assert!(!auth.is_loading().await);
}

#[test]
fn test_safety_labels() {
    assert_eq!(safety_label(9.0), "Excellent");
    assert_eq!(safety_label(8.0), "Excellent");
    assert_eq!(safety_label(7.9), "Good");
    assert_eq!(safety_label(6.0), "Good");
    assert_eq!(safety_label(5.9), "Needs Attention");
    assert_eq!(safety_label(-3.0), "Needs Attention");
}
