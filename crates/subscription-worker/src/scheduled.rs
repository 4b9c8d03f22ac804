//! Scheduled reminder dispatch.
//!
//! Runs on an interval from `main`: rolls auto-renewing subscriptions past
//! their expiry, collects everything inside its reminder window, and sends
//! one digest through the configured notification channels.

use chrono::{NaiveDate, Utc};
use notifier::{DispatchOutcome, Message, Notifier};
use tracing::info;

use crate::models::{self, Subscription};
use crate::state::AppState;
use crate::store;

/// Outcome of one reminder sweep.
#[derive(Debug, Default)]
pub struct ReminderReport {
    /// Subscriptions examined.
    pub checked: usize,
    /// Auto-renewals applied.
    pub renewed: usize,
    /// Subscriptions inside their reminder window.
    pub due: usize,
    /// Per-channel dispatch outcomes (empty when nothing was due).
    pub outcomes: Vec<DispatchOutcome>,
}

/// Examine every active subscription and dispatch due reminders.
pub async fn run_reminder_check(state: &AppState) -> kv_store::Result<ReminderReport> {
    let today = Utc::now().date_naive();
    let mut report = ReminderReport::default();
    let mut due: Vec<Subscription> = Vec::new();

    for mut subscription in store::list_subscriptions(&state.subs).await? {
        if !subscription.is_active {
            continue;
        }
        report.checked += 1;

        if subscription.auto_renew {
            if let Some(next) = models::advance_past_expiry(
                subscription.expiry_date,
                subscription.period_value,
                subscription.period_unit,
                today,
            ) {
                info!(
                    subscription = %subscription.name,
                    expiry = %next,
                    "Auto-renewed subscription"
                );
                subscription.expiry_date = next;
                store::save_subscription(&state.subs, &mut subscription).await?;
                report.renewed += 1;
            }
        }

        let days = models::days_until(subscription.expiry_date, today);
        if days <= subscription.reminder_days {
            due.push(subscription);
        }
    }

    report.due = due.len();

    if !due.is_empty() {
        let settings = store::get_settings(&state.subs).await?;
        let notifier = Notifier::new(settings.to_notifier_config());
        let message = build_digest(&due, today);
        report.outcomes = notifier.broadcast(&message).await;
    }

    Ok(report)
}

/// One digest message covering every due subscription.
pub fn build_digest(due: &[Subscription], today: NaiveDate) -> Message {
    let mut lines = Vec::with_capacity(due.len());
    for subscription in due {
        let days = models::days_until(subscription.expiry_date, today);
        let timing = if days > 0 {
            format!("expires in {days} day{}", if days == 1 { "" } else { "s" })
        } else if days == 0 {
            "expires today".to_string()
        } else {
            format!("expired {} day{} ago", -days, if days == -1 { "" } else { "s" })
        };

        lines.push(format!(
            "- {} ({}): {} on {}",
            subscription.name,
            subscription.custom_type.as_deref().unwrap_or("other"),
            timing,
            subscription.expiry_date
        ));
    }

    Message::new("Subscription reminders", lines.join("\n"))
        .with_description(format!("{} subscription(s) need attention", due.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodUnit;

    fn subscription(name: &str, expiry: NaiveDate) -> Subscription {
        Subscription {
            id: name.to_string(),
            name: name.to_string(),
            custom_type: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            expiry_date: expiry,
            period_value: 1,
            period_unit: PeriodUnit::Month,
            reminder_days: 7,
            is_active: true,
            auto_renew: false,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn digest_covers_future_today_and_past() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let due = vec![
            subscription("Soon", NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
            subscription("Today", today),
            subscription("Late", NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()),
        ];

        let message = build_digest(&due, today);
        assert!(message.body.contains("Soon (other): expires in 3 days"));
        assert!(message.body.contains("Today (other): expires today"));
        assert!(message.body.contains("Late (other): expired 2 days ago"));
        assert_eq!(
            message.description.as_deref(),
            Some("3 subscription(s) need attention")
        );
    }

    #[test]
    fn digest_uses_singular_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let due = vec![subscription(
            "Tomorrow",
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
        )];

        let message = build_digest(&due, today);
        assert!(message.body.contains("expires in 1 day on"));
    }
}
