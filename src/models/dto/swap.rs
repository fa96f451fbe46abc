use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::swap::{shorten_address, PriceChange, Swap, SwapSide};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SwapQuery {
    pub ticker: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SwapView {
    #[serde(flatten)]
    pub swap: Swap,
    pub side: SwapSide,
    pub price_change: PriceChange,
    pub short_address: String,
}

impl SwapView {
    pub fn new(swap: Swap, ticker: &str) -> Self {
        SwapView {
            side: swap.side(ticker),
            price_change: swap.price_change(),
            short_address: shorten_address(&swap.tx_from_address),
            swap,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SwapsResponse {
    pub ticker: String,
    pub address: Option<String>,
    pub swaps: Vec<SwapView>,
}

impl SwapsResponse {
    pub fn new(ticker: String, address: Option<String>, swaps: Vec<Swap>) -> Self {
        let swaps = swaps
            .into_iter()
            .map(|swap| SwapView::new(swap, &ticker))
            .collect();
        SwapsResponse {
            ticker,
            address,
            swaps,
        }
    }
}
