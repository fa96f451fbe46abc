use std::sync::atomic::AtomicUsize;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};
use utoipa::ToSchema;

use super::{is_loading, LoadingGuard};
use crate::{
    external::External,
    models::{FetchError, Token},
    random::RandomSource,
};

#[derive(Default)]
struct TokenState {
    tokens: Vec<Token>,
    selected: Option<Token>,
    error: Option<String>,
}

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct TokenSnapshot {
    pub tokens: Vec<Token>,
    pub selected: Option<Token>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Loaded token list plus the token the dashboard is currently showing.
#[derive(Default)]
pub struct TokenDirectory {
    state: RwLock<TokenState>,
    in_flight: AtomicUsize,
}

impl TokenDirectory {
    /// Reloads the directory. The current selection survives when its
    /// address is still listed; otherwise the first token is selected.
    pub async fn refresh(
        &self,
        external: &External,
        random: &RandomSource,
    ) -> Result<usize, FetchError> {
        let _loading = LoadingGuard::raise(&self.in_flight);
        self.state.write().await.error = None;

        let result = external.load_token_directory(random).await;
        let mut state = self.state.write().await;
        match result {
            Ok(tokens) => {
                let kept = state.selected.as_ref().and_then(|selected| {
                    tokens
                        .iter()
                        .find(|t| t.address.eq_ignore_ascii_case(&selected.address))
                        .cloned()
                });
                state.selected = kept.or_else(|| tokens.first().cloned());
                state.tokens = tokens;
                info!("Token directory holds {} tokens", state.tokens.len());
                Ok(state.tokens.len())
            }
            Err(e) => {
                error!("Error fetching tokens: {}", e);
                state.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Selects the listed token with `address`. Unknown addresses leave the
    /// selection unchanged and yield `None`.
    pub async fn select(&self, address: &str) -> Option<Token> {
        let mut state = self.state.write().await;
        let token = state
            .tokens
            .iter()
            .find(|t| t.address.eq_ignore_ascii_case(address))
            .cloned()?;
        state.selected = Some(token.clone());
        Some(token)
    }

    pub async fn selected(&self) -> Option<Token> {
        self.state.read().await.selected.clone()
    }

    /// Symbol of the selected token, empty when nothing is selected.
    pub async fn selected_symbol(&self) -> String {
        self.selected()
            .await
            .map(|token| token.symbol)
            .unwrap_or_default()
    }

    pub async fn snapshot(&self) -> TokenSnapshot {
        let state = self.state.read().await;
        TokenSnapshot {
            tokens: state.tokens.clone(),
            selected: state.selected.clone(),
            loading: is_loading(&self.in_flight),
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn directory_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn list(addresses: &[(&str, &str)]) -> serde_json::Value {
        let tokens: Vec<_> = addresses
            .iter()
            .map(|(address, symbol)| {
                json!({"chainId": 88888, "address": address, "name": symbol, "symbol": symbol, "decimals": 18, "logoURI": ""})
            })
            .collect();
        json!({ "name": "test", "tokens": tokens })
    }

    #[tokio::test]
    async fn test_refresh_selects_first_token() {
        let server = directory_server(list(&[("0xA", "CHZ"), ("0xB", "USDT")])).await;
        let external = External::new(&format!("{}/tokens.json", server.uri()), &server.uri());
        let directory = TokenDirectory::default();

        assert_eq!(directory.selected_symbol().await, "");
        let count = directory
            .refresh(&external, &RandomSource::new(Some(1)))
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(directory.selected_symbol().await, "CHZ");
        let snapshot = directory.snapshot().await;
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_refresh_keeps_existing_selection() {
        let server = directory_server(list(&[("0xA", "CHZ"), ("0xB", "USDT")])).await;
        let external = External::new(&format!("{}/tokens.json", server.uri()), &server.uri());
        let random = RandomSource::new(Some(1));
        let directory = TokenDirectory::default();

        directory.refresh(&external, &random).await.unwrap();
        assert_eq!(directory.select("0xb").await.map(|t| t.symbol), Some("USDT".into()));
        directory.refresh(&external, &random).await.unwrap();
        assert_eq!(directory.selected_symbol().await, "USDT");
    }

    #[tokio::test]
    async fn test_select_unknown_address() {
        let server = directory_server(list(&[("0xA", "CHZ")])).await;
        let external = External::new(&format!("{}/tokens.json", server.uri()), &server.uri());
        let directory = TokenDirectory::default();
        directory
            .refresh(&external, &RandomSource::new(Some(1)))
            .await
            .unwrap();

        assert!(directory.select("0xZZ").await.is_none());
        assert_eq!(directory.selected_symbol().await, "CHZ");
    }

    #[tokio::test]
    async fn test_refresh_failure_records_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let external = External::new(&format!("{}/tokens.json", server.uri()), &server.uri());
        let directory = TokenDirectory::default();

        assert!(directory
            .refresh(&external, &RandomSource::new(Some(1)))
            .await
            .is_err());
        let snapshot = directory.snapshot().await;
        assert_eq!(snapshot.error.as_deref(), Some("HTTP error! status: 503"));
        assert!(snapshot.tokens.is_empty());
        assert!(!snapshot.loading);
    }
}
