use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::models::{Category, Reminder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "expired" => Ok(StatusFilter::Expired),
            other => Err(format!(
                "Invalid status '{}'. Expected one of: all, active, expired",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    ExpiryDate,
    Priority,
    Category,
    /// Any unrecognized sort key: the input order is kept as-is.
    Unsorted,
}

impl FromStr for SortBy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "expiryDate" => SortBy::ExpiryDate,
            "priority" => SortBy::Priority,
            "category" => SortBy::Category,
            _ => SortBy::Unsorted,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub sort_by: SortBy,
}

/// Filters and sorts a reminder list against a reference instant, returning a
/// new vector. The expired/not-expired test here is the plain comparison
/// `expiry_date < now`, which is deliberately coarser than the four-bucket
/// display status and must stay that way.
pub fn apply(reminders: &[Reminder], filter: &ListFilter, now: DateTime<Utc>) -> Vec<Reminder> {
    let mut result: Vec<Reminder> = reminders
        .iter()
        .filter(|r| match filter.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => r.category == category,
        })
        .filter(|r| {
            let is_expired = r.expiry_date < now;
            match filter.status {
                StatusFilter::All => true,
                StatusFilter::Active => !is_expired,
                StatusFilter::Expired => is_expired,
            }
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties keep their original relative order.
    match filter.sort_by {
        SortBy::ExpiryDate => result.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date)),
        SortBy::Priority => result.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
        SortBy::Category => {
            result.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()))
        }
        SortBy::Unsorted => {}
    }

    result
}
