use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub chain_id: u64,
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

/// Token-list document published by the exchange. Only `tokens` is used.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TokenListResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Token {
    /// Fills the market metrics the token list does not carry.
    pub fn with_synthetic_metrics<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.price = Some(rng.gen_range(0.01..0.11));
        self.change_24h = Some(rng.gen_range(-10.0..10.0));
        self.volume_24h = Some(rng.gen_range(100_000.0..2_100_000.0));
        self.market_cap = Some(rng.gen_range(1_000_000.0..101_000_000.0));
        self
    }
}
