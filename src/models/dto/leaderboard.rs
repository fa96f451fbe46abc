use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    dashboard::{LeaderboardQuery, LeaderboardSnapshot},
    models::{LeaderboardEntry, Period, Tier},
    services::filter::{EntrySort, LeaderboardFilter},
};

/// Query string of the leaderboard endpoints. The window parameters are only
/// read by the fetching endpoint.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    pub date: Option<NaiveDate>,
    pub period: Option<Period>,
    pub token: Option<String>,
    pub search: Option<String>,
    pub tier: Option<Tier>,
    /// Lower bound on an entry's total native-asset (CHZ) volume.
    pub min_volume: Option<f64>,
    pub verified_only: Option<bool>,
    pub sort_by: Option<EntrySort>,
}

impl LeaderboardParams {
    pub fn filter(&self) -> LeaderboardFilter {
        LeaderboardFilter {
            search: self.search.clone().unwrap_or_default(),
            tier: self.tier,
            min_volume: self.min_volume.unwrap_or(0.0),
            verified_only: self.verified_only.unwrap_or(false),
            sort_by: self.sort_by,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub shown: usize,
    pub total: usize,
    pub query: Option<LeaderboardQuery>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LeaderboardResponse {
    /// Answer for a query without a token: nothing to rank.
    pub fn empty(query: LeaderboardQuery, loading: bool) -> Self {
        LeaderboardResponse {
            entries: Vec::new(),
            shown: 0,
            total: 0,
            query: Some(query),
            fetched_at: None,
            loading,
            error: None,
        }
    }

    pub fn from_snapshot(snapshot: LeaderboardSnapshot, filter: &LeaderboardFilter) -> Self {
        let entries = filter.apply(&snapshot.entries);
        LeaderboardResponse {
            shown: entries.len(),
            total: snapshot.entries.len(),
            entries,
            query: snapshot.query,
            fetched_at: snapshot.fetched_at,
            loading: snapshot.loading,
            error: snapshot.error,
        }
    }
}
