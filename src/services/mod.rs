pub mod calendar;
pub mod filter;
