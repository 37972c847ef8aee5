//! Tourism department dashboard endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        statistics::{
            ActivityQuery, InfluxQuery, InfluxSeries, LanguageShare, RecentActivity,
            SafetyMetrics, TopDestination,
        },
        user::{UpdateKyc, UpdateKycResponse},
        Role, Tourist, TripStatistic,
    },
    AppState,
};

use super::AuthenticatedUser;

const TOURISM: &[Role] = &[Role::Tourism];

/// Tourist registry
#[utoipa::path(
    get,
    path = "/tourism/tourists",
    tag = "tourism",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tourists", body = Vec<Tourist>),
        (status = 403, description = "Not a tourism department account")
    )
)]
pub async fn list_tourists(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Tourist>>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.tourists.list().await))
}

/// Aggregate trip statistics
#[utoipa::path(
    get,
    path = "/tourism/statistics",
    tag = "tourism",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trip statistics", body = TripStatistic)
    )
)]
pub async fn statistics(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<TripStatistic>> {
    claims.require_role(TOURISM, state.role_policy())?;

    let stats = state.services.stats.trip_statistics().await?;
    Ok(Json(stats))
}

/// Tourist influx over a period
#[utoipa::path(
    get,
    path = "/tourism/analytics/influx",
    tag = "tourism",
    security(("bearer_auth" = [])),
    params(InfluxQuery),
    responses(
        (status = 200, description = "Influx series", body = InfluxSeries)
    )
)]
pub async fn influx(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<InfluxQuery>,
) -> AppResult<Json<InfluxSeries>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.stats.influx(query.period.as_deref())))
}

#[utoipa::path(
    get,
    path = "/tourism/analytics/destinations",
    tag = "tourism",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Top destinations", body = Vec<TopDestination>)
    )
)]
pub async fn destinations(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<TopDestination>>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.stats.top_destinations()))
}

#[utoipa::path(
    get,
    path = "/tourism/analytics/languages",
    tag = "tourism",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Language distribution", body = Vec<LanguageShare>)
    )
)]
pub async fn languages(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LanguageShare>>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.stats.language_distribution()))
}

#[utoipa::path(
    get,
    path = "/tourism/analytics/safety-metrics",
    tag = "tourism",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Risk distribution", body = SafetyMetrics)
    )
)]
pub async fn safety_metrics(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<SafetyMetrics>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.stats.safety_metrics()))
}

/// Latest registry activity
#[utoipa::path(
    get,
    path = "/tourism/activities/recent",
    tag = "tourism",
    security(("bearer_auth" = [])),
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activities", body = Vec<RecentActivity>)
    )
)]
pub async fn recent_activities(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<RecentActivity>>> {
    claims.require_role(TOURISM, state.role_policy())?;

    Ok(Json(state.services.stats.recent_activities(query.limit)))
}

/// Record the outcome of a KYC verification
#[utoipa::path(
    put,
    path = "/tourism/tourists/{id}/kyc",
    tag = "tourism",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Tourist ID")
    ),
    request_body = UpdateKyc,
    responses(
        (status = 200, description = "KYC status updated", body = UpdateKycResponse),
        (status = 404, description = "Tourist profile not found")
    )
)]
pub async fn update_kyc(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateKyc>,
) -> AppResult<Json<UpdateKycResponse>> {
    claims.require_role(TOURISM, state.role_policy())?;

    let tourist = state.services.tourists.update_kyc(&id, update.status).await?;
    Ok(Json(UpdateKycResponse {
        message: "KYC status updated successfully".to_string(),
        status: tourist.kyc_status,
    }))
}
