use chrono::{NaiveDate, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    models::{
        leaderboard::build_entries, FetchError, LeaderboardEntry, Period, RawLeaderboardRecord,
        Swap, Token, TokenListResponse,
    },
    random::RandomSource,
    Config,
};

pub const DEFAULT_TOKEN_DIRECTORY_URL: &str =
    "https://raw.githubusercontent.com/kewlexchange/assets/main/chiliz/index.json";
pub const DEFAULT_API_BASE: &str = "https://api.example.com";

/// Upstream reads. Every call is a single attempt; retrying is left to the
/// caller.
pub struct External {
    client: Client,
    token_directory_url: String,
    api_base: String,
}

/// ISO-8601 form of the calendar day's UTC midnight, e.g.
/// `2024-06-01T00:00:00.000Z`.
pub fn iso_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl External {
    pub fn new(token_directory_url: &str, api_base: &str) -> Self {
        External {
            client: Client::new(),
            token_directory_url: token_directory_url.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.token_directory_url, &config.api_base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Reads the token list and fills in the market metrics it lacks.
    pub async fn load_token_directory(
        &self,
        random: &RandomSource,
    ) -> Result<Vec<Token>, FetchError> {
        let list: TokenListResponse = self
            .get_json(self.client.get(&self.token_directory_url))
            .await
            .inspect_err(|e| warn!("Error fetching tokens: {}", e))?;

        let tokens: Vec<Token> = random.with(|rng| {
            list.tokens
                .into_iter()
                .map(|token| token.with_synthetic_metrics(rng))
                .collect()
        });
        info!("Loaded {} tokens from '{}'", tokens.len(), list.name);
        Ok(tokens)
    }

    /// Raw per-wallet aggregates for one leaderboard window.
    pub async fn get_leaderboard_records(
        &self,
        date: NaiveDate,
        period: Period,
        token_symbol: &str,
    ) -> Result<Vec<RawLeaderboardRecord>, FetchError> {
        let request = self
            .client
            .get(format!("{}/leaderboard", self.api_base))
            .query(&[
                ("date", iso_date(date).as_str()),
                ("period", period.as_str()),
                ("token", token_symbol),
            ]);
        self.get_json(request)
            .await
            .inspect_err(|e| warn!("Error fetching leaderboard for {}: {}", token_symbol, e))
    }

    /// Ranked entries for `token_symbol`. Without a symbol nothing is
    /// requested and the result is empty.
    pub async fn fetch_leaderboard(
        &self,
        date: NaiveDate,
        period: Period,
        token_symbol: &str,
        random: &RandomSource,
    ) -> Result<Vec<LeaderboardEntry>, FetchError> {
        if token_symbol.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .get_leaderboard_records(date, period, token_symbol)
            .await?;
        let fetched_at = Utc::now();
        let entries = random.with(|rng| build_entries(&records, fetched_at, rng));
        debug!(
            "Mapped {} leaderboard entries for {} ({} {})",
            entries.len(),
            token_symbol,
            period,
            date
        );
        Ok(entries)
    }

    /// Recent swaps of a token, or one wallet's swaps when `address` is set.
    pub async fn fetch_swaps(
        &self,
        token_symbol: &str,
        address: Option<&str>,
    ) -> Result<Vec<Swap>, FetchError> {
        if token_symbol.is_empty() {
            return Ok(Vec::new());
        }

        let request = match address {
            Some(address) => self
                .client
                .get(format!("{}/usertransactions", self.api_base))
                .query(&[("ticker", token_symbol), ("address", address)]),
            None => self
                .client
                .get(format!("{}/swaps", self.api_base))
                .query(&[("ticker", token_symbol)]),
        };

        let swaps: Vec<Swap> = self
            .get_json(request)
            .await
            .inspect_err(|e| warn!("Error fetching swaps for {}: {}", token_symbol, e))?;
        debug!("Fetched {} swaps for {}", swaps.len(), token_symbol);
        Ok(swaps)
    }
}
