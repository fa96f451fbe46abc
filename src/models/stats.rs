use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::leaderboard::{TOP_TRADER_BADGE, VOLUME_KING_BADGE};
use super::{PercentageOfTotal, Tier, Token, VolumeTriple};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct TopGainer {
    pub address: String,
    pub gain: f64,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_volume: VolumeTriple,
    pub daily_volume: VolumeTriple,
    pub weekly_volume: VolumeTriple,
    pub total_traders: u64,
    pub active_traders: u64,
    pub new_traders_24h: u64,
    pub total_transactions: u64,
    pub avg_transaction_size: f64,
    pub top_gainer: TopGainer,
    pub market_dominance: PercentageOfTotal,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub address: String,
    pub rank: u32,
    pub score: u64,
    pub total_volume: VolumeTriple,
    pub daily_volume: VolumeTriple,
    pub weekly_volume: VolumeTriple,
    pub transaction_count: u64,
    pub avg_transaction_size: u64,
    pub profit_loss: f64,
    pub win_rate: f64,
    pub tier: Tier,
    pub badges: Vec<String>,
    pub is_verified: bool,
    pub join_date: DateTime<Utc>,
    pub last_active_date: DateTime<Utc>,
    pub favorite_tokens: Vec<String>,
    pub trading_streak: u32,
    pub best_rank: u32,
    pub total_rewards: f64,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub chz_price: f64,
    pub chz_change_24h: f64,
    pub token_price: f64,
    pub token_change_24h: f64,
    pub total_liquidity: f64,
    pub volume_24h: f64,
    pub fees_24h: f64,
}

pub fn native_token() -> Token {
    Token {
        symbol: "CHZ".into(),
        name: "Chiliz".into(),
        address: "0x0000000000000000000000000000000000000000".into(),
        decimals: 18,
        price: Some(0.087),
        change_24h: Some(12.5),
        volume_24h: Some(2_400_000.0),
        market_cap: Some(580_000_000.0),
        ..Default::default()
    }
}

pub fn base_token() -> Token {
    Token {
        symbol: "USDT".into(),
        name: "Tether USD".into(),
        address: "0xa0b86a33e6441e0a7a5abcf5d45b37b1a11b7e9f".into(),
        decimals: 6,
        price: Some(1.0),
        change_24h: Some(0.1),
        volume_24h: Some(1_800_000.0),
        market_cap: Some(95_000_000_000.0),
        ..Default::default()
    }
}

pub fn mock_leaderboard_stats() -> LeaderboardStats {
    LeaderboardStats {
        total_volume: VolumeTriple { chz: 1_250_000.0, token: 850_000.0, usd: 108_750.0 },
        daily_volume: VolumeTriple { chz: 45_000.0, token: 32_000.0, usd: 3_915.0 },
        weekly_volume: VolumeTriple { chz: 315_000.0, token: 224_000.0, usd: 27_405.0 },
        total_traders: 1247,
        active_traders: 189,
        new_traders_24h: 23,
        total_transactions: 8942,
        avg_transaction_size: 1250.0,
        top_gainer: TopGainer {
            address: "0x1234...".into(),
            gain: 45.2,
        },
        market_dominance: PercentageOfTotal { chz: 65.4, token: 34.6 },
    }
}

/// Profile of the connected wallet. `now` stands in for the last activity.
pub fn mock_user_stats(now: DateTime<Utc>) -> UserStats {
    UserStats {
        address: "0x1234567890123456789012345678901234567890".into(),
        rank: 1,
        score: 9845,
        total_volume: VolumeTriple { chz: 125_000.0, token: 85_000.0, usd: 10_875.0 },
        daily_volume: VolumeTriple { chz: 5_000.0, token: 3_500.0, usd: 435.0 },
        weekly_volume: VolumeTriple { chz: 35_000.0, token: 24_500.0, usd: 3_045.0 },
        transaction_count: 342,
        avg_transaction_size: 318,
        profit_loss: 23.5,
        win_rate: 78.2,
        tier: Tier::Diamond,
        badges: vec![TOP_TRADER_BADGE.into(), VOLUME_KING_BADGE.into()],
        is_verified: true,
        join_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or(now),
        last_active_date: now,
        favorite_tokens: vec!["CHZ".into(), "USDT".into()],
        trading_streak: 15,
        best_rank: 1,
        total_rewards: 2450.0,
    }
}

pub fn mock_market_data() -> MarketData {
    MarketData {
        chz_price: 0.087,
        chz_change_24h: 12.5,
        token_price: 1.0,
        token_change_24h: 0.1,
        total_liquidity: 12_400_000.0,
        volume_24h: 2_400_000.0,
        fees_24h: 7_200.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_splits_to_one_hundred() {
        let stats = mock_leaderboard_stats();
        let sum = stats.market_dominance.chz + stats.market_dominance.token;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn user_stats_serialize_camel_case() {
        let value = serde_json::to_value(mock_user_stats(Utc::now())).unwrap();
        assert_eq!(value["tier"], "diamond");
        assert_eq!(value["tradingStreak"], 15);
        assert_eq!(value["favoriteTokens"][0], "CHZ");
    }

    #[test]
    fn pair_tokens_have_prices() {
        assert_eq!(native_token().symbol, "CHZ");
        assert_eq!(base_token().price, Some(1.0));
    }
}
