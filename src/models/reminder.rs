use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{days_until_expiry, ExpiryStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Category {
    Food,
    Medicine,
    Document,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Medicine => "Medicine",
            Category::Document => "Document",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Category::Food),
            "Medicine" => Ok(Category::Medicine),
            "Document" => Ok(Category::Document),
            "Other" => Ok(Category::Other),
            other => Err(format!(
                "Invalid category '{}'. Expected one of: Food, Medicine, Document, Other",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort rank: High sorts before Medium before Low.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(format!(
                "Invalid priority '{}'. Expected one of: High, Medium, Low",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub expiry_date: DateTime<Utc>,
    pub category: Category,
    pub priority: Priority,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReminderRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    pub description: Option<String>,

    pub barcode: Option<String>,

    pub expiry_date: DateTime<Utc>,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReminderRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub barcode: Option<String>,

    pub expiry_date: Option<DateTime<Utc>>,

    pub category: Option<Category>,

    pub priority: Option<Priority>,

    pub is_completed: Option<bool>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_empty");
        err.message = Some("title must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn validate_optional_title(title: &String) -> Result<(), ValidationError> {
    validate_title(title)
}

/// A reminder as served over the API: the stored fields plus the two values
/// derived from the request's reference instant.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder, now: DateTime<Utc>) -> Self {
        let status = ExpiryStatus::of(reminder.expiry_date, now);
        let days_until_expiry = days_until_expiry(reminder.expiry_date, now);
        ReminderResponse {
            reminder,
            days_until_expiry,
            status,
        }
    }
}
