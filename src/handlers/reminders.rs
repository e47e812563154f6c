use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{end_of_day, CategoryFilter, ListFilter, SortBy, StatusFilter};
use crate::error::{AppError, AppResult};
use crate::models::{Category, CreateReminderRequest, ReminderResponse, UpdateReminderRequest};
use crate::services::product_catalog;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
}

impl ListQuery {
    /// Category and status must be one of their enumerated values; an unknown
    /// sort key is accepted and leaves the store order untouched.
    fn into_filter(self) -> AppResult<ListFilter> {
        let category = match self.category {
            Some(value) => value
                .parse::<CategoryFilter>()
                .map_err(AppError::ValidationError)?,
            None => CategoryFilter::All,
        };

        let status = match self.status {
            Some(value) => value
                .parse::<StatusFilter>()
                .map_err(AppError::ValidationError)?,
            None => StatusFilter::All,
        };

        // never fails: unknown sort keys become SortBy::Unsorted
        let sort_by = match self.sort_by {
            Some(value) => value.parse::<SortBy>().unwrap_or_default(),
            None => SortBy::ExpiryDate,
        };

        Ok(ListFilter {
            category,
            status,
            sort_by,
        })
    }
}

pub async fn list_reminders(
    State(service): State<crate::AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<ReminderResponse>>> {
    let filter = params.into_filter()?;
    let now = Utc::now();

    let reminders = service.list_reminders(&filter, now).await?;
    let response = reminders
        .into_iter()
        .map(|r| ReminderResponse::new(r, now))
        .collect();

    Ok(Json(response))
}

pub async fn upcoming_reminders(
    State(service): State<crate::AppState>,
) -> AppResult<Json<Vec<ReminderResponse>>> {
    let now = Utc::now();

    let reminders = service.upcoming_reminders(now).await?;
    let response = reminders
        .into_iter()
        .map(|r| ReminderResponse::new(r, now))
        .collect();

    Ok(Json(response))
}

pub async fn get_reminder(
    State(service): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReminderResponse>> {
    let reminder = service.get_reminder(id).await?;
    Ok(Json(ReminderResponse::new(reminder, Utc::now())))
}

pub async fn create_reminder(
    State(service): State<crate::AppState>,
    Json(req): Json<CreateReminderRequest>,
) -> AppResult<(StatusCode, Json<ReminderResponse>)> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let reminder = service.create_reminder(req).await?;
    let response = ReminderResponse::new(reminder, Utc::now());
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_reminder(
    State(service): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReminderRequest>,
) -> AppResult<Json<ReminderResponse>> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let reminder = service.update_reminder(id, req).await?;
    Ok(Json(ReminderResponse::new(reminder, Utc::now())))
}

pub async fn delete_reminder(
    State(service): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    service.delete_reminder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct ProductSuggestion {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub suggested_expiry_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BarcodeLookupResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSuggestion>,
}

/// Barcode lookup: an already-tracked reminder wins over the product catalog;
/// a catalog hit yields a template for pre-filling the create form.
pub async fn lookup_barcode(
    State(service): State<crate::AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<BarcodeLookupResponse>> {
    let now = Utc::now();

    if let Some(reminder) = service.find_by_barcode(&barcode).await? {
        return Ok(Json(BarcodeLookupResponse {
            exists: true,
            reminder: Some(ReminderResponse::new(reminder, now)),
            product: None,
        }));
    }

    if let Some(product) = product_catalog::lookup(&barcode) {
        let suggestion = ProductSuggestion {
            title: product.title.to_string(),
            description: product.description.to_string(),
            category: product.category,
            suggested_expiry_date: end_of_day(now + Duration::days(product.shelf_life_days)),
        };
        return Ok(Json(BarcodeLookupResponse {
            exists: false,
            reminder: None,
            product: Some(suggestion),
        }));
    }

    Err(AppError::NotFound(format!(
        "No product found for barcode {}",
        barcode
    )))
}
