use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::plan::Plan;

/// Used when the plan cannot be resolved while computing the expiry.
pub const FALLBACK_DURATION_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "expired" => Ok(SubscriptionStatus::Expired),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            other => Err(format!("unknown subscription status: {}", other)),
        }
    }
}

/// Edge from a user to a plan they paid for. At most one per (user, plan).
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewSubscription {
    /// An active subscription starting at `now`. `plan` is the resolved plan
    /// record, if the lookup succeeded.
    pub fn active(
        user_id: Uuid,
        plan_id: Uuid,
        plan: Option<&Plan>,
        now: DateTime<Utc>,
    ) -> Result<Self, ExpiryOutOfRange> {
        Ok(Self {
            user_id,
            plan_id,
            status: SubscriptionStatus::Active,
            expires_at: expires_at(now, plan.map(|p| p.duration))?,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("subscription expiry falls outside the supported date range")]
pub struct ExpiryOutOfRange;

/// `start` plus the plan duration in days, or plus 30 days when the duration
/// is unknown.
pub fn expires_at(start: DateTime<Utc>, duration_days: Option<i32>) -> Result<DateTime<Utc>, ExpiryOutOfRange> {
    let days = duration_days
        .map(i64::from)
        .unwrap_or(FALLBACK_DURATION_DAYS);
    let span = Duration::try_days(days).ok_or(ExpiryOutOfRange)?;
    start.checked_add_signed(span).ok_or(ExpiryOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 10, 15, 0).unwrap()
    }

    fn plan(duration: i32) -> Plan {
        Plan {
            id: Uuid::new_v4(),
            title: "Plan".into(),
            description: "d".into(),
            price: 10.0,
            duration,
            trainer_id: Uuid::new_v4(),
            content: String::new(),
            image: String::new(),
            created_at: instant(),
            updated_at: instant(),
        }
    }

    #[test]
    fn expiry_adds_plan_duration_in_days() {
        let t = instant();
        let p = plan(30);
        let sub = NewSubscription::active(Uuid::new_v4(), p.id, Some(&p), t).unwrap();

        assert_eq!(sub.expires_at, t + Duration::days(30));
        assert_eq!(sub.expires_at - sub.created_at, Duration::days(30));
        assert_eq!(sub.status, SubscriptionStatus::Active);
    }

    #[test]
    fn expiry_uses_plan_specific_duration() {
        let t = instant();
        let p = plan(7);
        let sub = NewSubscription::active(Uuid::new_v4(), p.id, Some(&p), t).unwrap();
        assert_eq!(sub.expires_at, t + Duration::days(7));
    }

    #[test]
    fn unresolved_plan_falls_back_to_thirty_days() {
        let t = instant();
        let sub = NewSubscription::active(Uuid::new_v4(), Uuid::new_v4(), None, t).unwrap();
        assert_eq!(sub.expires_at, t + Duration::days(30));
    }

    #[test]
    fn oversized_duration_is_an_error_not_a_panic() {
        let p = plan(i32::MAX);
        assert_eq!(
            NewSubscription::active(Uuid::new_v4(), p.id, Some(&p), instant()).unwrap_err(),
            ExpiryOutOfRange
        );
        assert!(expires_at(instant(), Some(36_500)).is_ok());
    }

    #[test]
    fn status_parses_from_column_text() {
        assert_eq!(
            "cancelled".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Cancelled
        );
        assert!("paused".parse::<SubscriptionStatus>().is_err());
    }
}
