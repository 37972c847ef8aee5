//! Police dashboard endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        alert::{AlertQuery, AssignResponse, CallResponse, UpdateAlert},
        statistics::PoliceDashboardStats,
        Alert, Role, Tourist,
    },
    AppState,
};

use super::AuthenticatedUser;

const POLICE: &[Role] = &[Role::Police];

/// List alerts, newest first
#[utoipa::path(
    get,
    path = "/police/alerts",
    tag = "police",
    security(("bearer_auth" = [])),
    params(AlertQuery),
    responses(
        (status = 200, description = "Alerts", body = Vec<Alert>),
        (status = 403, description = "Not a police account")
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<Vec<Alert>>> {
    claims.require_role(POLICE, state.role_policy())?;

    let alerts = state.services.alerts.list(&query).await?;
    Ok(Json(alerts))
}

/// Get alert details
#[utoipa::path(
    get,
    path = "/police/alerts/{id}",
    tag = "police",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert", body = Alert),
        (status = 404, description = "Alert not found")
    )
)]
pub async fn get_alert(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Alert>> {
    claims.require_role(POLICE, state.role_policy())?;

    let alert = state.services.alerts.get(&id).await?;
    Ok(Json(alert))
}

/// Acknowledge, resolve or assign an alert
#[utoipa::path(
    put,
    path = "/police/alerts/{id}",
    tag = "police",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    request_body = UpdateAlert,
    responses(
        (status = 200, description = "Alert updated", body = Alert),
        (status = 404, description = "Alert not found"),
        (status = 422, description = "Status cannot move backwards", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_alert(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateAlert>,
) -> AppResult<Json<Alert>> {
    claims.require_role(POLICE, state.role_policy())?;

    let alert = state.services.alerts.update(&id, update).await?;
    Ok(Json(alert))
}

/// Tourist registry as seen by the police
#[utoipa::path(
    get,
    path = "/police/tourists",
    tag = "police",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tourists", body = Vec<Tourist>)
    )
)]
pub async fn list_tourists(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Tourist>>> {
    claims.require_role(POLICE, state.role_policy())?;

    Ok(Json(state.services.tourists.list().await))
}

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/police/dashboard/stats",
    tag = "police",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = PoliceDashboardStats)
    )
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<PoliceDashboardStats>> {
    claims.require_role(POLICE, state.role_policy())?;

    let stats = state.services.stats.police_dashboard_stats().await?;
    Ok(Json(stats))
}

/// Call the tourist behind an alert
#[utoipa::path(
    post,
    path = "/police/alerts/{id}/call",
    tag = "police",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Call initiated", body = CallResponse),
        (status = 404, description = "Alert not found")
    )
)]
pub async fn call_tourist(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<CallResponse>> {
    claims.require_role(POLICE, state.role_policy())?;

    let response = state.services.alerts.initiate_call(&id, &claims).await?;
    Ok(Json(response))
}

/// Assign the calling officer to an alert
#[utoipa::path(
    post,
    path = "/police/alerts/{id}/assign",
    tag = "police",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Officer assigned", body = AssignResponse),
        (status = 404, description = "Alert not found"),
        (status = 422, description = "Alert already resolved")
    )
)]
pub async fn assign_officer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<AssignResponse>> {
    claims.require_role(POLICE, state.role_policy())?;

    let response = state.services.alerts.assign_officer(&id, &claims).await?;
    Ok(Json(response))
}
