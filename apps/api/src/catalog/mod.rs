//! Catalog: the read-only listing dataset, loaded once at startup from CSV.
//!
//! A load failure never aborts startup: the catalog comes up empty with
//! `load_error` set, and every view renders zero results.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::models::listing::{Listing, ListingType};

pub mod filter;
pub mod handlers;

pub use filter::{summary, ListingFilter};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate listing id '{0}'")]
    DuplicateId(String),
}

/// One CSV row. Tags arrive as a single comma-separated cell.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    id: String,
    #[serde(rename = "type")]
    listing_type: ListingType,
    subtype: String,
    title: String,
    company: String,
    industry: String,
    employment_type: String,
    #[serde(default)]
    firm_type: Option<String>,
    #[serde(default)]
    region: Option<String>,
    deadline: NaiveDate,
    #[serde(default)]
    tags: Option<String>,
    description: String,
    #[serde(default)]
    reason: Option<String>,
}

impl From<ListingRecord> for Listing {
    fn from(r: ListingRecord) -> Self {
        Listing {
            id: r.id.trim().to_string(),
            listing_type: r.listing_type,
            subtype: r.subtype,
            title: r.title,
            company: r.company,
            deadline: r.deadline,
            industry: r.industry,
            employment_type: r.employment_type,
            firm_type: non_blank(r.firm_type),
            region: non_blank(r.region),
            tags: r.tags.as_deref().map(split_tags).unwrap_or_default(),
            description: r.description,
            reason: non_blank(r.reason),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_tags(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
    load_error: Option<String>,
}

impl Catalog {
    /// Loads the dataset, degrading to an empty catalog on any failure.
    pub fn load(path: &Path) -> Self {
        match read_listings(path) {
            Ok(listings) => {
                info!(
                    "Loaded {} listings from {}",
                    listings.len(),
                    path.display()
                );
                Self::from_listings(listings)
            }
            Err(e) => {
                error!("Failed to load dataset {}: {e}", path.display());
                Self {
                    listings: Vec::new(),
                    load_error: Some(format!("Error loading data: {e}")),
                }
            }
        }
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            load_error: None,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn of_type(&self, listing_type: ListingType) -> impl Iterator<Item = &Listing> {
        self.listings
            .iter()
            .filter(move |l| l.listing_type == listing_type)
    }

    /// Listings of one type passing `filter`, in dataset order.
    pub fn query(&self, listing_type: ListingType, filter: &ListingFilter) -> Vec<&Listing> {
        self.of_type(listing_type)
            .filter(|l| filter.matches(l))
            .collect()
    }
}

fn read_listings(path: &Path) -> Result<Vec<Listing>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let mut seen = HashSet::new();
    let mut listings = Vec::new();
    for result in reader.deserialize() {
        let record: ListingRecord = result?;
        let listing = Listing::from(record);
        if !seen.insert(listing.id.clone()) {
            return Err(CatalogError::DuplicateId(listing.id));
        }
        listings.push(listing);
    }

    Ok(listings)
}
