pub mod calendar;
pub mod leaderboard;
pub mod message;
pub mod swap;
pub mod token;
pub use calendar::*;
pub use leaderboard::*;
pub use message::Message;
pub use swap::*;
pub use token::*;

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::models::Theme;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[derive(OpenApi)]
#[openapi(components(schemas(
    Message,
    ThemeBody,
    TokenQuery,
    SelectToken,
    LeaderboardParams,
    LeaderboardResponse,
    SwapQuery,
    SwapView,
    SwapsResponse,
    CalendarQuery,
    NavigateQuery,
    NavigateResponse,
    crate::models::Token,
    crate::models::LeaderboardEntry,
    crate::models::VolumeTriple,
    crate::models::PercentageOfTotal,
    crate::models::Tier,
    crate::models::Period,
    crate::models::Theme,
    crate::models::Swap,
    crate::models::swap::SwapSide,
    crate::models::swap::PriceChange,
    crate::models::LeaderboardStats,
    crate::models::stats::TopGainer,
    crate::models::UserStats,
    crate::models::MarketData,
    crate::dashboard::TokenSnapshot,
    crate::dashboard::LeaderboardQuery,
    crate::services::filter::EntrySort,
    crate::services::filter::TokenSort,
    crate::services::calendar::Calendar,
    crate::services::calendar::CalendarCell,
    crate::services::calendar::CompetitionData,
    crate::services::calendar::RecentActivity,
    crate::services::calendar::CalendarView,
    crate::services::calendar::Direction,
)))]
/// Captures OpenAPI schemas defined across the models
pub struct OpenApiSchemas;
