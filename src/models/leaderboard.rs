use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const TOP_TRADER_BADGE: &str = "Top Trader";
pub const VOLUME_KING_BADGE: &str = "Volume King";

/// Upper bound for the synthetic join date offset.
const JOIN_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, ToSchema)]
pub struct VolumeTriple {
    pub chz: f64,
    pub token: f64,
    pub usd: f64,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, ToSchema)]
pub struct PercentageOfTotal {
    pub chz: f64,
    pub token: f64,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    #[default]
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            0..=5 => Tier::Diamond,
            6..=15 => Tier::Platinum,
            16..=30 => Tier::Gold,
            _ => Tier::Silver,
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bronze" => Ok(Tier::Bronze),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            "diamond" => Ok(Tier::Diamond),
            other => Err(format!("unknown tier '{other}'")),
        }
    }
}

/// Aggregation window of a leaderboard query.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    /// Volume multiplier used by the competition calendar.
    pub fn multiplier(&self) -> f64 {
        match self {
            Period::Daily => 1.0,
            Period::Weekly => 7.0,
            Period::Monthly => 30.0,
            Period::Yearly => 365.0,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn badges_for_rank(rank: u32) -> Vec<String> {
    match rank {
        0..=3 => vec![TOP_TRADER_BADGE.to_string()],
        4..=10 => vec![VOLUME_KING_BADGE.to_string()],
        _ => Vec::new(),
    }
}

/// Per-wallet aggregate as returned by the leaderboard endpoint.
/// Missing amounts are zero.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawLeaderboardRecord {
    pub rank: u32,
    pub wallet: String,
    #[serde(default)]
    pub total_buy_amount: f64,
    #[serde(default)]
    pub total_sell_amount: f64,
    #[serde(default)]
    pub total_to_amount: f64,
    #[serde(default)]
    pub total_usd_volume: f64,
    #[serde(default)]
    pub total_buy_usd: f64,
    #[serde(default)]
    pub total_sell_usd: f64,
}

impl RawLeaderboardRecord {
    pub fn volume(&self) -> VolumeTriple {
        VolumeTriple {
            chz: self.total_buy_amount + self.total_sell_amount,
            token: self.total_to_amount,
            usd: self.total_usd_volume,
        }
    }

    fn has_both_sides(&self) -> bool {
        self.total_buy_usd > 0.0 && self.total_sell_usd > 0.0
    }

    pub fn profit_loss(&self) -> f64 {
        if self.has_both_sides() {
            (self.total_sell_usd - self.total_buy_usd) / self.total_buy_usd * 100.0
        } else {
            0.0
        }
    }

    pub fn win_rate(&self) -> f64 {
        if !self.has_both_sides() {
            50.0
        } else if self.total_sell_usd > self.total_buy_usd {
            75.0
        } else {
            45.0
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_handle: Option<String>,
    pub total_volume: VolumeTriple,
    pub daily_volume: VolumeTriple,
    pub weekly_volume: VolumeTriple,
    pub score: u64,
    pub percentage_of_total: PercentageOfTotal,
    pub transaction_count: u64,
    pub avg_transaction_size: u64,
    pub last_trade_time: DateTime<Utc>,
    pub profit_loss: f64,
    pub win_rate: f64,
    pub badges: Vec<String>,
    pub tier: Tier,
    pub is_verified: bool,
    pub join_date: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Maps one raw record. `fetched_at` becomes the last trade time and
    /// anchors the synthetic join date drawn from `rng`.
    pub fn from_record<R: Rng + ?Sized>(
        record: &RawLeaderboardRecord,
        fetched_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let volume = record.volume();
        let usd = volume.usd;
        let transaction_count = (usd / 1000.0).floor() as u64 + 10;
        let join_offset = rng.gen_range(0..JOIN_WINDOW_DAYS * 24 * 60 * 60);

        LeaderboardEntry {
            rank: record.rank,
            address: record.wallet.clone(),
            nickname: None,
            twitter_handle: None,
            telegram_handle: None,
            total_volume: volume,
            daily_volume: volume,
            weekly_volume: volume,
            score: (usd / 100.0).floor() as u64,
            percentage_of_total: PercentageOfTotal::default(),
            transaction_count,
            avg_transaction_size: (usd / transaction_count as f64).floor() as u64,
            last_trade_time: fetched_at,
            profit_loss: record.profit_loss(),
            win_rate: record.win_rate(),
            badges: badges_for_rank(record.rank),
            tier: Tier::for_rank(record.rank),
            is_verified: record.rank <= 20,
            join_date: fetched_at - Duration::seconds(join_offset),
        }
    }
}

/// Computes every entry's share of the batch's native and counter volume.
/// Shares are 0 when the batch total on that side is 0.
pub fn apply_percentages(entries: &mut [LeaderboardEntry]) {
    let total_chz: f64 = entries.iter().map(|e| e.total_volume.chz).sum();
    let total_token: f64 = entries.iter().map(|e| e.total_volume.token).sum();

    for entry in entries.iter_mut() {
        entry.percentage_of_total = PercentageOfTotal {
            chz: share(entry.total_volume.chz, total_chz),
            token: share(entry.total_volume.token, total_token),
        };
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Maps a raw batch and normalizes its percentages.
pub fn build_entries<R: Rng + ?Sized>(
    records: &[RawLeaderboardRecord],
    fetched_at: DateTime<Utc>,
    rng: &mut R,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = records
        .iter()
        .map(|record| LeaderboardEntry::from_record(record, fetched_at, rng))
        .collect();
    apply_percentages(&mut entries);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn record(rank: u32, usd: f64) -> RawLeaderboardRecord {
        RawLeaderboardRecord {
            rank,
            wallet: format!("0x{rank:040}"),
            total_usd_volume: usd,
            ..Default::default()
        }
    }

    #[test]
    fn tier_follows_rank() {
        assert_eq!(Tier::for_rank(1), Tier::Diamond);
        assert_eq!(Tier::for_rank(5), Tier::Diamond);
        assert_eq!(Tier::for_rank(6), Tier::Platinum);
        assert_eq!(Tier::for_rank(15), Tier::Platinum);
        assert_eq!(Tier::for_rank(16), Tier::Gold);
        assert_eq!(Tier::for_rank(30), Tier::Gold);
        assert_eq!(Tier::for_rank(31), Tier::Silver);
    }

    #[test]
    fn badges_follow_rank() {
        for rank in 1..=3 {
            assert_eq!(badges_for_rank(rank), vec!["Top Trader"]);
        }
        for rank in 4..=10 {
            assert_eq!(badges_for_rank(rank), vec!["Volume King"]);
        }
        assert!(badges_for_rank(11).is_empty());
    }

    #[test]
    fn verification_cutoff_is_twenty() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(LeaderboardEntry::from_record(&record(20, 0.0), now, &mut rng).is_verified);
        assert!(!LeaderboardEntry::from_record(&record(21, 0.0), now, &mut rng).is_verified);
    }

    #[test]
    fn derived_counts_from_usd_volume() {
        let mut rng = StdRng::seed_from_u64(1);
        let entry = LeaderboardEntry::from_record(&record(40, 10875.0), Utc::now(), &mut rng);
        assert_eq!(entry.score, 108);
        assert_eq!(entry.transaction_count, 20);
        assert_eq!(entry.avg_transaction_size, 543);
    }

    #[test]
    fn maps_reference_record() {
        let raw = RawLeaderboardRecord {
            rank: 1,
            wallet: "0xabc".into(),
            total_buy_amount: 100.0,
            total_sell_amount: 50.0,
            total_to_amount: 80.0,
            total_usd_volume: 10000.0,
            total_buy_usd: 4000.0,
            total_sell_usd: 6000.0,
        };
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);
        let entries = build_entries(&[raw], now, &mut rng);
        let entry = &entries[0];

        let expected = VolumeTriple { chz: 150.0, token: 80.0, usd: 10000.0 };
        assert_eq!(entry.rank, 1);
        assert_eq!(entry.address, "0xabc");
        assert_eq!(entry.total_volume, expected);
        assert_eq!(entry.daily_volume, expected);
        assert_eq!(entry.weekly_volume, expected);
        assert_eq!(entry.score, 100);
        assert_eq!(entry.transaction_count, 20);
        assert_eq!(entry.avg_transaction_size, 500);
        assert_eq!(entry.profit_loss, 50.0);
        assert_eq!(entry.win_rate, 75.0);
        assert_eq!(entry.tier, Tier::Diamond);
        assert!(entry.is_verified);
        assert_eq!(entry.badges, vec!["Top Trader"]);
        assert_eq!(entry.percentage_of_total.chz, 100.0);
        assert_eq!(entry.percentage_of_total.token, 100.0);
        assert_eq!(entry.last_trade_time, now);
    }

    #[test]
    fn win_rate_and_pnl_defaults() {
        let losing = RawLeaderboardRecord {
            total_buy_usd: 500.0,
            total_sell_usd: 250.0,
            ..Default::default()
        };
        assert_eq!(losing.win_rate(), 45.0);
        assert_eq!(losing.profit_loss(), -50.0);

        let one_sided = RawLeaderboardRecord {
            total_buy_usd: 500.0,
            ..Default::default()
        };
        assert_eq!(one_sided.win_rate(), 50.0);
        assert_eq!(one_sided.profit_loss(), 0.0);
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        let raw: RawLeaderboardRecord =
            serde_json::from_str(r#"{"rank": 7, "wallet": "0xdef", "total_sell_amount": 12.5}"#)
                .unwrap();
        assert_eq!(raw.volume(), VolumeTriple { chz: 12.5, token: 0.0, usd: 0.0 });
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let records: Vec<RawLeaderboardRecord> = (1..=7)
            .map(|rank| RawLeaderboardRecord {
                rank,
                wallet: format!("0x{rank}"),
                total_buy_amount: rank as f64 * 13.7,
                total_sell_amount: 3.1,
                total_to_amount: 1.0 / rank as f64,
                ..Default::default()
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let entries = build_entries(&records, Utc::now(), &mut rng);

        let chz: f64 = entries.iter().map(|e| e.percentage_of_total.chz).sum();
        let token: f64 = entries.iter().map(|e| e.percentage_of_total.token).sum();
        assert!((chz - 100.0).abs() < 1e-9);
        assert!((token - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_volume_batch_has_zero_shares() {
        let mut rng = StdRng::seed_from_u64(3);
        let entries = build_entries(&[record(1, 0.0), record(2, 0.0)], Utc::now(), &mut rng);
        assert!(entries
            .iter()
            .all(|e| e.percentage_of_total == PercentageOfTotal::default()));
    }

    #[test]
    fn join_date_within_last_ninety_days() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);
        for rank in 1..50 {
            let entry = LeaderboardEntry::from_record(&record(rank, 1.0), now, &mut rng);
            assert!(entry.join_date <= now);
            assert!(entry.join_date > now - Duration::days(90));
        }
    }

    #[test]
    fn same_seed_same_join_dates() {
        let now = Utc::now();
        let a = build_entries(&[record(1, 5.0)], now, &mut StdRng::seed_from_u64(11));
        let b = build_entries(&[record(1, 5.0)], now, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let mut rng = StdRng::seed_from_u64(1);
        let entry = LeaderboardEntry::from_record(&record(2, 100.0), Utc::now(), &mut rng);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["tier"], "diamond");
        assert!(value.get("percentageOfTotal").is_some());
        assert!(value.get("avgTransactionSize").is_some());
        assert!(value.get("nickname").is_none());
    }

    #[test]
    fn period_parses_lowercase() {
        let period: Period = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(period, Period::Yearly);
        assert_eq!(Period::Weekly.to_string(), "weekly");
        assert!("Gold".parse::<Tier>().is_ok());
        assert!("copper".parse::<Tier>().is_err());
    }
}
