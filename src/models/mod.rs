pub mod dto;
pub mod error;
pub mod leaderboard;
pub mod stats;
pub mod swap;
pub mod theme;
pub mod token;
pub use error::{Error, FetchError};
pub use leaderboard::{
    LeaderboardEntry, PercentageOfTotal, Period, RawLeaderboardRecord, Tier, VolumeTriple,
};
pub use stats::{LeaderboardStats, MarketData, UserStats};
pub use swap::Swap;
pub use theme::Theme;
pub use token::{Token, TokenListResponse};
