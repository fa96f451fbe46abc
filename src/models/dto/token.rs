use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::services::filter::TokenSort;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    pub search: Option<String>,
    pub sort_by: Option<TokenSort>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectToken {
    pub address: String,
}
