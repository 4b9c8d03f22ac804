//! Subscription model and calendar arithmetic.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Billing period unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    Month,
    Year,
}

/// A tracked subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Free-form type label ("streaming", "domain", ...).
    #[serde(default)]
    pub custom_type: Option<String>,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub period_value: u32,
    pub period_unit: PeriodUnit,
    /// Days before expiry at which reminders fire.
    #[serde(default = "default_reminder_days")]
    pub reminder_days: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

pub(crate) fn default_reminder_days() -> i64 {
    7
}

pub(crate) fn default_true() -> bool {
    true
}

/// Add one billing period to a date.
///
/// Month and year steps clamp to the end of the target month, so
/// 2024-01-31 + 1 month lands on 2024-02-29.
pub fn add_period(date: NaiveDate, value: u32, unit: PeriodUnit) -> NaiveDate {
    let result = match unit {
        PeriodUnit::Day => date.checked_add_days(Days::new(value as u64)),
        PeriodUnit::Month => date.checked_add_months(Months::new(value)),
        PeriodUnit::Year => date.checked_add_months(Months::new(value.saturating_mul(12))),
    };
    // Only reachable by stepping past NaiveDate's representable range.
    result.unwrap_or(date)
}

/// Whole days from `today` until `date`; negative when past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Roll an expired date forward period by period until it is in the future.
/// Returns `None` when the date is not due for renewal yet.
pub fn advance_past_expiry(
    expiry: NaiveDate,
    value: u32,
    unit: PeriodUnit,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if expiry > today || value == 0 {
        return None;
    }

    let mut next = expiry;
    while next <= today {
        next = add_period(next, value, unit);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_addition_clamps_to_month_end() {
        // 2024 is a leap year.
        assert_eq!(
            add_period(date(2024, 1, 31), 1, PeriodUnit::Month),
            date(2024, 2, 29)
        );
        assert_eq!(
            add_period(date(2023, 1, 31), 1, PeriodUnit::Month),
            date(2023, 2, 28)
        );
        assert_eq!(
            add_period(date(2024, 3, 31), 1, PeriodUnit::Month),
            date(2024, 4, 30)
        );
    }

    #[test]
    fn day_and_year_addition() {
        assert_eq!(
            add_period(date(2024, 2, 28), 2, PeriodUnit::Day),
            date(2024, 3, 1)
        );
        assert_eq!(
            add_period(date(2024, 2, 29), 1, PeriodUnit::Year),
            date(2025, 2, 28)
        );
        assert_eq!(
            add_period(date(2024, 6, 15), 3, PeriodUnit::Year),
            date(2027, 6, 15)
        );
    }

    #[test]
    fn days_until_counts_signed_days() {
        assert_eq!(days_until(date(2026, 8, 10), date(2026, 8, 7)), 3);
        assert_eq!(days_until(date(2026, 8, 7), date(2026, 8, 7)), 0);
        assert_eq!(days_until(date(2026, 8, 1), date(2026, 8, 7)), -6);
    }

    #[test]
    fn advance_rolls_until_future() {
        // Expired three months ago on a monthly period: lands next month.
        let renewed =
            advance_past_expiry(date(2026, 5, 7), 1, PeriodUnit::Month, date(2026, 8, 7));
        assert_eq!(renewed, Some(date(2026, 9, 7)));
    }

    #[test]
    fn advance_leaves_future_dates_alone() {
        assert_eq!(
            advance_past_expiry(date(2026, 9, 1), 1, PeriodUnit::Month, date(2026, 8, 7)),
            None
        );
    }

    #[test]
    fn advance_on_expiry_day_rolls_one_period() {
        let renewed =
            advance_past_expiry(date(2026, 8, 7), 1, PeriodUnit::Month, date(2026, 8, 7));
        assert_eq!(renewed, Some(date(2026, 9, 7)));
    }

    #[test]
    fn advance_with_zero_period_is_rejected() {
        // A zero-length period would loop forever.
        assert_eq!(
            advance_past_expiry(date(2026, 8, 1), 0, PeriodUnit::Day, date(2026, 8, 7)),
            None
        );
    }

    #[test]
    fn subscription_json_uses_camel_case() {
        let sub = Subscription {
            id: "s1".to_string(),
            name: "Cloud storage".to_string(),
            custom_type: Some("storage".to_string()),
            start_date: date(2024, 1, 31),
            expiry_date: date(2024, 2, 29),
            period_value: 1,
            period_unit: PeriodUnit::Month,
            reminder_days: 7,
            is_active: true,
            auto_renew: true,
            notes: None,
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["startDate"], "2024-01-31");
        assert_eq!(json["expiryDate"], "2024-02-29");
        assert_eq!(json["periodUnit"], "month");
        assert_eq!(json["isActive"], true);
    }
}
