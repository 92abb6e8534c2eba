use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::dtos::api_response::FieldError;
use crate::models::plan::{NewPlan, PlanChanges, PlanWithTrainer};
use crate::models::user::PublicProfile;

/// Body of `POST /plans`. Numeric fields arrive as JSON values so that a
/// bad number is reported per field instead of failing the whole body.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanDTO {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub duration: Option<Value>,
    pub content: Option<String>,
    pub image: Option<String>,
}

/// Body of `PUT /plans/{id}`. Any subset of fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlanDTO {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub duration: Option<Value>,
    pub content: Option<String>,
    pub image: Option<String>,
}

/// Accepts a JSON number or a numeric string, like a form post would send.
fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (price.is_finite() && price >= 0.0).then_some(price)
}

fn parse_duration(value: &Value) -> Option<i32> {
    let days = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 {
                    return None;
                }
                f as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if !(1..=MAX_DURATION_DAYS).contains(&days) {
        return None;
    }
    i32::try_from(days).ok()
}

fn required_text(value: Option<String>, field: &str, message: &str, errors: &mut Vec<FieldError>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, message));
            String::new()
        }
    }
}

fn optional_text(value: Option<String>, field: &str, message: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let v = value?.trim().to_string();
    if v.is_empty() {
        errors.push(FieldError::new(field, message));
        return None;
    }
    Some(v)
}

const PRICE_MSG: &str = "Price must be a positive number";
/// Upper bound on a plan duration, in days.
pub const MAX_DURATION_DAYS: i64 = 36_500;
const DURATION_MSG: &str = "Duration must be between 1 and 36500 days";

impl CreatePlanDTO {
    pub fn validate(self, trainer_id: Uuid) -> Result<NewPlan, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required_text(self.title, "title", "Title is required", &mut errors);
        let description = required_text(
            self.description,
            "description",
            "Description is required",
            &mut errors,
        );
        let price = self.price.as_ref().and_then(parse_price);
        if price.is_none() {
            errors.push(FieldError::new("price", PRICE_MSG));
        }
        let duration = self.duration.as_ref().and_then(parse_duration);
        if duration.is_none() {
            errors.push(FieldError::new("duration", DURATION_MSG));
        }

        match (price, duration) {
            (Some(price), Some(duration)) if errors.is_empty() => Ok(NewPlan {
                title,
                description,
                price,
                duration,
                trainer_id,
                content: self.content.unwrap_or_default(),
                image: self.image.unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }
}

impl UpdatePlanDTO {
    pub fn validate(self) -> Result<PlanChanges, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = optional_text(self.title, "title", "Title cannot be empty", &mut errors);
        let description = optional_text(
            self.description,
            "description",
            "Description cannot be empty",
            &mut errors,
        );
        let price = match &self.price {
            None => None,
            Some(v) => {
                let parsed = parse_price(v);
                if parsed.is_none() {
                    errors.push(FieldError::new("price", PRICE_MSG));
                }
                parsed
            }
        };
        let duration = match &self.duration {
            None => None,
            Some(v) => {
                let parsed = parse_duration(v);
                if parsed.is_none() {
                    errors.push(FieldError::new("duration", DURATION_MSG));
                }
                parsed
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PlanChanges {
            title,
            description,
            price,
            duration,
            content: self.content,
            image: self.image,
        })
    }
}

/// Plan as sent to clients. `content` is left out of the JSON entirely when
/// the viewer may not see it; `isSubscribed` only appears on views that
/// compute it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub trainer: Option<PublicProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subscribed: Option<bool>,
}

impl PlanOut {
    /// Unfiltered view, content included.
    pub fn full(p: PlanWithTrainer) -> Self {
        let PlanWithTrainer { plan, trainer } = p;
        Self {
            id: plan.id,
            title: plan.title,
            description: plan.description,
            price: plan.price,
            duration: plan.duration,
            trainer,
            content: Some(plan.content),
            image: plan.image,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            is_subscribed: None,
        }
    }

    pub fn with_subscription(mut self, subscribed: bool) -> Self {
        self.is_subscribed = Some(subscribed);
        self
    }

    pub fn without_content(mut self) -> Self {
        self.content = None;
        self
    }
}
