use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dataset `type` column. Wire values are the dataset's own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingType {
    #[serde(rename = "채용", alias = "job")]
    Job,
    #[serde(rename = "비교과", alias = "program")]
    Program,
}

/// A job posting or extracurricular program. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub subtype: String,
    pub title: String,
    pub company: String,
    pub deadline: NaiveDate,
    pub industry: String,
    pub employment_type: String,
    pub firm_type: Option<String>,
    pub region: Option<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub reason: Option<String>,
}
