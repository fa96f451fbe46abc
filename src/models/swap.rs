use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One executed trade as served by the swap endpoints. Field names are the
/// upstream wire names.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct Swap {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "TxHash")]
    pub tx_hash: String,
    #[serde(rename = "TxFromAddress")]
    pub tx_from_address: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "FromTokenAmount", default)]
    pub from_token_amount: f64,
    #[serde(rename = "ToTokenAmount", default)]
    pub to_token_amount: f64,
    #[serde(rename = "PriceFrom", default)]
    pub price_from: f64,
    #[serde(rename = "PriceTo", default)]
    pub price_to: f64,
    #[serde(rename = "PriceFromInUSD", default)]
    pub price_from_in_usd: f64,
    #[serde(rename = "PriceToInUSD", default)]
    pub price_to_in_usd: f64,
    #[serde(rename = "FromTokenTotalInUSD", default)]
    pub from_token_total_in_usd: f64,
    #[serde(rename = "ToTokenTotalInUSD", default)]
    pub to_token_total_in_usd: f64,
    #[serde(rename = "FromTokenSymbol", default)]
    pub from_token_symbol: String,
    #[serde(rename = "ToTokenSymbol", default)]
    pub to_token_symbol: String,
    #[serde(rename = "FromTokenAddress", default)]
    pub from_token_address: String,
    #[serde(rename = "ToTokenAddress", default)]
    pub to_token_address: String,
    #[serde(rename = "FromTokenImage", default)]
    pub from_token_image: String,
    #[serde(rename = "ToTokenImage", default)]
    pub to_token_image: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum SwapSide {
    Buy,
    Sell,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, ToSchema)]
pub struct PriceChange {
    pub value: f64,
    pub percentage: f64,
    pub is_positive: bool,
}

impl Swap {
    /// A swap that spends `ticker` is a sell of it, anything else a buy.
    pub fn side(&self, ticker: &str) -> SwapSide {
        if self.from_token_symbol == ticker {
            SwapSide::Sell
        } else {
            SwapSide::Buy
        }
    }

    pub fn price_change(&self) -> PriceChange {
        let value = self.price_to_in_usd - self.price_from_in_usd;
        let percentage = if self.price_from_in_usd != 0.0 {
            value / self.price_from_in_usd * 100.0
        } else {
            0.0
        };
        PriceChange {
            value,
            percentage,
            is_positive: value > 0.0,
        }
    }
}

/// `0x1234...abcd` style abbreviation. Addresses of ten characters or fewer
/// are returned as is.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
