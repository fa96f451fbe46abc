use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Period;

/// Years shown by the yearly overview, current year included.
const YEARS_SHOWN: i32 = 6;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Week,
    Month,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct CompetitionData {
    pub volume: f64,
    pub change: f64,
    pub prize_pool: u64,
    pub is_active: bool,
    pub is_current: bool,
    pub volume_label: String,
    pub prize_pool_label: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_focus: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub competition: CompetitionData,
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct Calendar {
    pub period: Period,
    pub label: String,
    pub description: String,
    pub selected: NaiveDate,
    pub cells: Vec<CalendarCell>,
    pub summary: CompetitionData,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Whole Sunday-first weeks covering the month of `month`. The walk keeps
/// going past the last day until it lands on a Sunday.
pub fn month_grid(month: NaiveDate) -> Vec<NaiveDate> {
    let last = last_of_month(month);
    let mut current = sunday_on_or_before(first_of_month(month));
    let mut days = Vec::with_capacity(42);

    while current <= last || current.weekday() != Weekday::Sun {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// Six consecutive week starts, the first being the Sunday on or before the
/// 1st of the month.
pub fn weeks_of_month(month: NaiveDate) -> Vec<NaiveDate> {
    let start = sunday_on_or_before(first_of_month(month));
    (0..6)
        .filter_map(|i| start.checked_add_days(Days::new(i * 7)))
        .collect()
}

pub fn months_of_year(year: i32) -> Vec<NaiveDate> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .collect()
}

pub fn recent_years(year: i32) -> Vec<NaiveDate> {
    (0..YEARS_SHOWN)
        .rev()
        .filter_map(|back| NaiveDate::from_ymd_opt(year - back, 1, 1))
        .collect()
}

/// The last `count` days ending with `today`, oldest first.
pub fn recent_days(today: NaiveDate, count: u64) -> Vec<NaiveDate> {
    (0..count)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}

/// First days of the last `count` months ending with the current one.
pub fn recent_months(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = first_of_month(today);
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

/// Moves the selection by one week or one month. Moving forward past
/// `today` leaves the selection where it was.
pub fn navigate(
    selected: NaiveDate,
    view: CalendarView,
    direction: Direction,
    today: NaiveDate,
) -> NaiveDate {
    let moved = match (view, direction) {
        (CalendarView::Week, Direction::Previous) => selected.checked_sub_days(Days::new(7)),
        (CalendarView::Week, Direction::Next) => selected.checked_add_days(Days::new(7)),
        (CalendarView::Month, Direction::Previous) => selected.checked_sub_months(Months::new(1)),
        (CalendarView::Month, Direction::Next) => selected.checked_add_months(Months::new(1)),
    };

    match (moved, direction) {
        (Some(date), Direction::Next) if date > today => selected,
        (Some(date), _) => date,
        (None, _) => selected,
    }
}

pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000.0 {
        format!("{:.1}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("{:.1}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.0}K", volume / 1_000.0)
    } else {
        format!("{:.0}", volume)
    }
}

pub fn format_prize_pool(prize: f64) -> String {
    if prize >= 1_000_000.0 {
        format!("${:.1}M", prize / 1_000_000.0)
    } else if prize >= 1_000.0 {
        format!("${:.0}K", prize / 1_000.0)
    } else {
        format!("${:.0}", prize)
    }
}

/// Illustrative competition figures for one calendar slot.
pub fn competition_data<R: Rng + ?Sized>(
    date: NaiveDate,
    period: Period,
    today: NaiveDate,
    rng: &mut R,
) -> CompetitionData {
    let volume = rng.gen_range(800_000.0..2_800_000.0) * period.multiplier();
    let change = rng.gen_range(-17.5..17.5);
    let prize_pool = rng.gen_range(0.0..40_000.0_f64).floor() as u64 + 8_000;

    CompetitionData {
        volume,
        change,
        prize_pool,
        is_active: date <= today,
        is_current: date == today,
        volume_label: format_volume(volume),
        prize_pool_label: format_prize_pool(prize_pool as f64),
    }
}

fn same_slot(period: Period, slot: NaiveDate, date: NaiveDate) -> bool {
    match period {
        Period::Daily => slot == date,
        Period::Weekly => {
            let end = slot.checked_add_days(Days::new(6)).unwrap_or(slot);
            slot <= date && date <= end
        }
        Period::Monthly => slot.year() == date.year() && slot.month() == date.month(),
        Period::Yearly => slot.year() == date.year(),
    }
}

fn period_info(period: Period) -> (&'static str, &'static str) {
    match period {
        Period::Daily => ("Daily", "Monthly Calendar View"),
        Period::Weekly => ("Weekly", "Weekly Overview"),
        Period::Monthly => ("Monthly", "Monthly Overview"),
        Period::Yearly => ("Yearly", "Yearly Overview"),
    }
}

/// Lays out the competition calendar for `period` around `month`.
pub fn build_calendar<R: Rng + ?Sized>(
    period: Period,
    month: NaiveDate,
    selected: NaiveDate,
    today: NaiveDate,
    rng: &mut R,
) -> Calendar {
    let slots = match period {
        Period::Daily => month_grid(month),
        Period::Weekly => weeks_of_month(month),
        Period::Monthly => months_of_year(month.year()),
        Period::Yearly => recent_years(month.year()),
    };

    let cells = slots
        .into_iter()
        .map(|date| CalendarCell {
            date,
            in_focus: match period {
                Period::Daily => date.month() == month.month() && date.year() == month.year(),
                _ => true,
            },
            is_selected: same_slot(period, date, selected),
            is_today: same_slot(period, date, today),
            competition: competition_data(date, period, today, rng),
        })
        .collect();

    let (label, description) = period_info(period);
    Calendar {
        period,
        label: label.to_string(),
        description: description.to_string(),
        selected,
        cells,
        summary: competition_data(selected, period, today, rng),
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct RecentActivity {
    pub days: Vec<CalendarCell>,
    pub months: Vec<CalendarCell>,
}

/// Rolling sidebars of the last 28 days and the last 6 months.
pub fn build_recent<R: Rng + ?Sized>(
    selected: NaiveDate,
    today: NaiveDate,
    rng: &mut R,
) -> RecentActivity {
    let mut cells = |dates: Vec<NaiveDate>, period: Period| -> Vec<CalendarCell> {
        dates
            .into_iter()
            .map(|date| CalendarCell {
                date,
                in_focus: true,
                is_selected: same_slot(period, date, selected),
                is_today: same_slot(period, date, today),
                competition: competition_data(date, period, today, rng),
            })
            .collect()
    };

    RecentActivity {
        days: cells(recent_days(today, 28), Period::Daily),
        months: cells(recent_months(today, 6), Period::Monthly),
    }
}
