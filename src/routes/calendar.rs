use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use utoipa::OpenApi;

use crate::{
    models::dto::{CalendarQuery, NavigateQuery, NavigateResponse},
    services::calendar::{
        build_calendar, build_recent, navigate, week_of_month, Calendar, RecentActivity,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(paths(calendar_handler, navigate_handler, recent_handler))]
/// Defines the OpenAPI spec for competition calendar endpoints
pub struct CalendarApi;

/// Used to group calendar endpoints together in the OpenAPI documentation
pub const CALENDAR_API_GROUP: &str = "CALENDAR";

/// Builds a router for all the calendar routes
pub fn calendar_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(calendar_handler))
        .route("/navigate", get(navigate_handler))
        .route("/recent", get(recent_handler))
}

#[utoipa::path(
    get,
    path = "/api/calendar",
    tag = CALENDAR_API_GROUP,
    params(CalendarQuery),
    responses(
        (status = 200, description = "Competition calendar for the period", body = Calendar),
    )
)]
pub async fn calendar_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Json<Calendar> {
    let today = Utc::now().date_naive();
    let selected = query.selected.unwrap_or(today);
    let month = query.month.unwrap_or(selected);
    let period = query.period.unwrap_or_default();

    let calendar = state
        .random
        .with(|rng| build_calendar(period, month, selected, today, rng));
    Json(calendar)
}

#[utoipa::path(
    get,
    path = "/api/calendar/navigate",
    tag = CALENDAR_API_GROUP,
    params(NavigateQuery),
    responses(
        (status = 200, description = "Selection after moving one step", body = NavigateResponse),
    )
)]
pub async fn navigate_handler(Query(query): Query<NavigateQuery>) -> Json<NavigateResponse> {
    let today = Utc::now().date_naive();
    let current = query.selected.unwrap_or(today);
    let selected = navigate(current, query.view, query.direction, today);
    Json(NavigateResponse {
        selected,
        week_of_month: week_of_month(selected),
        changed: selected != current,
    })
}

#[utoipa::path(
    get,
    path = "/api/calendar/recent",
    tag = CALENDAR_API_GROUP,
    params(CalendarQuery),
    responses(
        (status = 200, description = "Last 28 days and last 6 months", body = RecentActivity),
    )
)]
pub async fn recent_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Json<RecentActivity> {
    let today = Utc::now().date_naive();
    let selected = query.selected.unwrap_or(today);
    Json(state.random.with(|rng| build_recent(selected, today, rng)))
}
