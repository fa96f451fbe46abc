use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use utoipa::ToSchema;

use super::{is_loading, LoadingGuard};
use crate::{
    external::External,
    models::{FetchError, LeaderboardEntry, Period},
    random::RandomSource,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardQuery {
    pub date: NaiveDate,
    pub period: Period,
    pub token: String,
}

#[derive(Default)]
struct BoardState {
    entries: Vec<LeaderboardEntry>,
    query: Option<LeaderboardQuery>,
    fetched_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct LeaderboardSnapshot {
    pub entries: Vec<LeaderboardEntry>,
    pub query: Option<LeaderboardQuery>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The leaderboard currently on display.
///
/// Each refresh takes a generation number. A response is only applied while
/// its generation is still the newest one issued, so a slow response to an
/// older query can never overwrite a newer one. An empty batch keeps the
/// entries already on display.
#[derive(Default)]
pub struct LeaderboardBoard {
    state: RwLock<BoardState>,
    in_flight: AtomicUsize,
    generation: AtomicU64,
}

impl LeaderboardBoard {
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetches and applies `query`. Without a token nothing is requested and
    /// the board is left exactly as it was.
    pub async fn refresh(
        &self,
        external: &External,
        query: LeaderboardQuery,
        random: &RandomSource,
    ) -> Result<(), FetchError> {
        if query.token.is_empty() {
            debug!("No token for {} {}, skipping leaderboard fetch", query.period, query.date);
            return Ok(());
        }

        let generation = self.next_generation();
        let _loading = LoadingGuard::raise(&self.in_flight);

        let result = external
            .fetch_leaderboard(query.date, query.period, &query.token, random)
            .await;
        self.apply(generation, query, result).await
    }

    async fn apply(
        &self,
        generation: u64,
        query: LeaderboardQuery,
        result: Result<Vec<LeaderboardEntry>, FetchError>,
    ) -> Result<(), FetchError> {
        let mut state = self.state.write().await;

        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(
                "Dropping leaderboard response #{} for {:?}, superseded",
                generation, query
            );
            return result.map(|_| ());
        }

        match result {
            Ok(entries) if entries.is_empty() => {
                debug!("Empty leaderboard for {:?}, keeping previous entries", query);
                Ok(())
            }
            Ok(entries) => {
                info!(
                    "Leaderboard updated: {} entries for {} {} {}",
                    entries.len(),
                    query.token,
                    query.period,
                    query.date
                );
                state.entries = entries;
                state.query = Some(query);
                state.fetched_at = Some(Utc::now());
                state.error = None;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching leaderboard: {}", e);
                state.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub async fn snapshot(&self) -> LeaderboardSnapshot {
        let state = self.state.read().await;
        LeaderboardSnapshot {
            entries: state.entries.clone(),
            query: state.query.clone(),
            fetched_at: state.fetched_at,
            loading: is_loading(&self.in_flight),
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(token: &str) -> LeaderboardQuery {
        LeaderboardQuery {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            period: Period::Daily,
            token: token.to_string(),
        }
    }

    fn entry(rank: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            address: format!("0x{rank}"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_response_keeps_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .and(query_param("token", "CHZ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"rank": 1, "wallet": "0xabc", "total_buy_amount": 10, "total_usd_volume": 500}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .and(query_param("token", "USDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let external = External::new(&server.uri(), &server.uri());
        let random = RandomSource::new(Some(4));
        let board = LeaderboardBoard::default();

        board.refresh(&external, query("CHZ"), &random).await.unwrap();
        let before = board.snapshot().await;
        assert_eq!(before.entries.len(), 1);

        board.refresh(&external, query("USDT"), &random).await.unwrap();
        let after = board.snapshot().await;
        assert_eq!(after.entries, before.entries);
        assert_eq!(after.query.map(|q| q.token), Some("CHZ".to_string()));
        assert!(!after.loading);
    }

    #[tokio::test]
    async fn test_failure_keeps_entries_and_reports() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let external = External::new(&server.uri(), &server.uri());
        let board = LeaderboardBoard::default();
        let generation = board.next_generation();
        board
            .apply(generation, query("CHZ"), Ok(vec![entry(1), entry(2)]))
            .await
            .unwrap();

        let err = board
            .refresh(&external, query("CHZ"), &RandomSource::new(Some(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)));

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.error.as_deref(), Some("HTTP error! status: 500"));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let board = LeaderboardBoard::default();
        let older = board.next_generation();
        let newer = board.next_generation();

        board
            .apply(newer, query("USDT"), Ok(vec![entry(7)]))
            .await
            .unwrap();
        board
            .apply(older, query("CHZ"), Ok(vec![entry(1), entry(2)]))
            .await
            .unwrap();

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.entries, vec![entry(7)]);
        assert_eq!(snapshot.query, Some(query("USDT")));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let board = LeaderboardBoard::default();
        let first = board.next_generation();
        let _ = board
            .apply(first, query("CHZ"), Err(FetchError::Status(StatusCode::BAD_GATEWAY)))
            .await;
        assert!(board.snapshot().await.error.is_some());

        let second = board.next_generation();
        board
            .apply(second, query("CHZ"), Ok(vec![entry(1)]))
            .await
            .unwrap();
        let snapshot = board.snapshot().await;
        assert!(snapshot.error.is_none());
        assert!(snapshot.fetched_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_token_leaves_board_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let external = External::new(&server.uri(), &server.uri());
        let board = LeaderboardBoard::default();

        let in_flight = board.next_generation();
        board
            .refresh(&external, query(""), &RandomSource::new(Some(1)))
            .await
            .unwrap();
        board
            .apply(in_flight, query("CHZ"), Ok(vec![entry(1)]))
            .await
            .unwrap();

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.entries, vec![entry(1)]);
        assert_eq!(snapshot.query, Some(query("CHZ")));
        assert!(!snapshot.loading);
    }
}

