use crate::models::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Volume Leaderboard API",
    description = "Trading-volume leaderboard, swap feed and competition calendar of a DEX",
))]
struct Api;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from other locations in the app, such as the [dto] package
/// and the route submodules
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = Api::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::health::HealthApi::openapi());
    api_docs.merge(super::tokens::TokensApi::openapi());
    api_docs.merge(super::leaderboard::LeaderboardApi::openapi());
    api_docs.merge(super::swaps::SwapsApi::openapi());
    api_docs.merge(super::calendar::CalendarApi::openapi());
    api_docs.merge(super::theme::ThemeApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
