use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    models::Period,
    services::calendar::{CalendarView, Direction},
};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    pub period: Option<Period>,
    pub month: Option<NaiveDate>,
    pub selected: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigateQuery {
    pub selected: Option<NaiveDate>,
    pub view: CalendarView,
    pub direction: Direction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigateResponse {
    pub selected: NaiveDate,
    pub week_of_month: u32,
    pub changed: bool,
}
