//! Axum route handlers for the stateless catalog API.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{summary, ListingFilter};
use crate::errors::AppError;
use crate::models::listing::{Listing, ListingType};
use crate::models::profile::{EmploymentType, Industry, JobRole, MAX_SELECTIONS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(rename = "type")]
    pub listing_type: Option<ListingType>,
    #[serde(flatten)]
    pub filter: ListingFilter,
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub total: usize,
    pub summary: String,
    pub listings: Vec<Listing>,
    pub dataset_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub roles: Vec<&'static str>,
    pub industries: Vec<&'static str>,
    pub employment_types: Vec<&'static str>,
    pub max_selections: usize,
}

/// GET /api/v1/listings
pub async fn handle_list_listings(
    State(state): State<AppState>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<ListingsResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let listings: Vec<Listing> = match query.listing_type {
        Some(kind) => state
            .catalog
            .query(kind, &query.filter)
            .into_iter()
            .cloned()
            .collect(),
        None => state
            .catalog
            .all()
            .iter()
            .filter(|l| query.filter.matches(l))
            .cloned()
            .collect(),
    };

    Ok(Json(ListingsResponse {
        total: listings.len(),
        summary: summary(listings.len()),
        listings,
        dataset_error: state.catalog.load_error().map(str::to_string),
    }))
}

/// GET /api/v1/listings/:id
pub async fn handle_get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, AppError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Listing {id} not found")))
}

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        roles: JobRole::ALL.iter().map(JobRole::label).collect(),
        industries: Industry::ALL.iter().map(Industry::label).collect(),
        employment_types: EmploymentType::ALL
            .iter()
            .map(EmploymentType::label)
            .collect(),
        max_selections: MAX_SELECTIONS,
    })
}
