use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{LeaderboardEntry, Tier, Token};

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Case-insensitive substring match on nickname, address or twitter handle.
/// An empty term keeps every entry.
pub fn filter_entries(entries: &[LeaderboardEntry], search_term: &str) -> Vec<LeaderboardEntry> {
    if search_term.is_empty() {
        return entries.to_vec();
    }
    let needle = search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            contains_ci(entry.nickname.as_deref(), &needle)
                || contains_ci(Some(entry.address.as_str()), &needle)
                || contains_ci(entry.twitter_handle.as_deref(), &needle)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum EntrySort {
    Volume,
    Score,
    Transactions,
    WinRate,
    ProfitLoss,
}

impl EntrySort {
    fn key(&self, entry: &LeaderboardEntry) -> f64 {
        match self {
            EntrySort::Volume => entry.total_volume.usd,
            EntrySort::Score => entry.score as f64,
            EntrySort::Transactions => entry.transaction_count as f64,
            EntrySort::WinRate => entry.win_rate,
            EntrySort::ProfitLoss => entry.profit_loss,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LeaderboardFilter {
    pub search: String,
    pub tier: Option<Tier>,
    pub min_volume: f64,
    pub verified_only: bool,
    pub sort_by: Option<EntrySort>,
}

impl LeaderboardFilter {
    pub fn apply(&self, entries: &[LeaderboardEntry]) -> Vec<LeaderboardEntry> {
        let mut out: Vec<LeaderboardEntry> = filter_entries(entries, &self.search)
            .into_iter()
            .filter(|e| self.tier.map_or(true, |tier| e.tier == tier))
            .filter(|e| e.total_volume.chz >= self.min_volume)
            .filter(|e| !self.verified_only || e.is_verified)
            .collect();

        if let Some(sort) = self.sort_by {
            out.sort_by(|a, b| descending(sort.key(a), sort.key(b)));
        }
        out
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenSort {
    #[default]
    Volume,
    Price,
    Change,
}

pub fn filter_tokens(tokens: &[Token], search_term: &str) -> Vec<Token> {
    let needle = search_term.to_lowercase();
    tokens
        .iter()
        .filter(|token| {
            token.name.to_lowercase().contains(&needle)
                || token.symbol.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Descending by the chosen metric; tokens without metrics count as 0.
pub fn sort_tokens(tokens: &mut [Token], sort: TokenSort) {
    let key = |token: &Token| match sort {
        TokenSort::Volume => token.volume_24h.unwrap_or(0.0),
        TokenSort::Price => token.price.unwrap_or(0.0),
        TokenSort::Change => token.change_24h.unwrap_or(0.0),
    };
    tokens.sort_by(|a, b| descending(key(a), key(b)));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
