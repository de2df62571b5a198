//! Demo & intro call booking.

use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use crate::error::{Result, ValidationError};
use crate::store::keys;

/// Bookable time slots, GMT.
pub const AVAILABLE_SLOTS: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30",
];

/// Weekdays from `today` onwards are bookable.
pub fn is_bookable(date: NaiveDate, today: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && date >= today
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoBooking {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl DemoBooking {
    /// Pick a date. Any previously chosen time is cleared.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.time = None;
    }

    pub fn select_time(&mut self, time: impl Into<String>) {
        self.time = Some(time.into());
    }

    /// Validate against an explicit "today".
    pub fn validate_on(&self, today: NaiveDate) -> std::result::Result<(), ValidationError> {
        let (Some(date), Some(time)) = (self.date, self.time.as_deref()) else {
            return Err(ValidationError::BookingIncomplete);
        };
        if !is_bookable(date, today) {
            return Err(ValidationError::UnavailableDate(date));
        }
        if !AVAILABLE_SLOTS.contains(&time) {
            return Err(ValidationError::UnavailableSlot(time.to_string()));
        }
        Ok(())
    }

    /// e.g. "Your demo call is scheduled for October 20th, 2026 at 10:00".
    pub fn confirmation(&self) -> Option<String> {
        let date = self.date?;
        let time = self.time.as_deref()?;
        Some(format!(
            "Your demo call is scheduled for {} {}{}, {} at {}",
            date.format("%B"),
            date.day(),
            ordinal_suffix(date.day()),
            date.year(),
            time
        ))
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

impl OnboardingForm for DemoBooking {
    const KEY: &'static str = keys::DEMO_BOOKING;
    const LATENCY: Duration = Duration::from_millis(2000);

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.validate_on(Utc::now().date_naive())
    }

    fn fields(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "date": self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            "time": self.time,
        }))
    }
}
