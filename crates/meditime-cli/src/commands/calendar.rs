use chrono::{Datelike, Local, NaiveDate};
use meditime_core::storage::history;
use meditime_core::stats;

use super::common;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Print a month grid, marking meditated days with `*` and today with
/// brackets.
pub fn run(year: Option<i32>, month: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("invalid month: {year}-{month}"))?;

    let storage = common::open_storage();
    let full = history::load(&*storage)?;
    let meditated = stats::meditated_days_in_month(&full, year, month);

    println!("{} {}", MONTH_NAMES[(month - 1) as usize], year);
    println!("  Su   Mo   Tu   We   Th   Fr   Sa");

    // Week rows start on Sunday, like the original calendar grid.
    let mut line = String::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        line.push_str("     ");
    }
    for day in 1..=days_in_month(year, month) {
        let is_today = today.year() == year && today.month() == month && today.day() == day;
        let mark = if meditated.contains(&day) { '*' } else { ' ' };
        if is_today {
            line.push_str(&format!("[{day:2}{mark}]"));
        } else {
            line.push_str(&format!(" {day:2}{mark} "));
        }
        if (first.weekday().num_days_from_sunday() + day) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }
    println!();
    println!("* meditated  [ ] today");
    Ok(())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}
