// Prompt constants for reason generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::listing::Listing;
use crate::models::profile::UserProfile;

/// System prompt for reason generation.
pub const REASON_SYSTEM: &str = "You are a career advisor for Korean university students. \
    You explain briefly why a job posting or extracurricular program suits a student. \
    Write every reason in Korean, one or two sentences, polite register.";

/// Replace `{profile}` and `{listings}` before sending.
pub const REASON_PROMPT_TEMPLATE: &str = r#"Given the student profile and the listings below, write one short recommendation reason per listing.

Return a JSON object with this EXACT schema (no extra fields):
{
  "reasons": [
    {"listing_id": "1", "reason": "파이썬 관심사와 백엔드 직무 경험을 쌓기에 적합한 공고입니다."}
  ]
}

Rules:
- Use only the listing ids given below. Do NOT invent listings.
- Ground every reason in the profile (roles, industries, keywords, employment preferences) and the listing fields.
- If a listing has no visible connection to the profile, skip it rather than inventing one.

STUDENT PROFILE:
{profile}

LISTINGS:
{listings}"#;

#[derive(Serialize)]
struct ListingBrief<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    subtype: &'a str,
    industry: &'a str,
    employment_type: &'a str,
    tags: &'a [String],
}

/// Builds the user prompt. Personal contact details are not sent.
pub fn build_reason_prompt(profile: &UserProfile, listings: &[Listing]) -> Result<String, AppError> {
    let profile_json = json!({
        "year": profile.academic.year,
        "major": profile.academic.major,
        "roles": profile.career.roles,
        "industries": profile.career.industries,
        "employment_types": profile.personal.employment_types,
        "keywords": profile.keywords,
    });

    let briefs: Vec<ListingBrief<'_>> = listings
        .iter()
        .map(|l| ListingBrief {
            id: &l.id,
            title: &l.title,
            company: &l.company,
            subtype: &l.subtype,
            industry: &l.industry,
            employment_type: &l.employment_type,
            tags: &l.tags,
        })
        .collect();

    let profile_text =
        serde_json::to_string_pretty(&profile_json).map_err(|e| AppError::Internal(e.into()))?;
    let listings_text =
        serde_json::to_string_pretty(&briefs).map_err(|e| AppError::Internal(e.into()))?;

    Ok(REASON_PROMPT_TEMPLATE
        .replace("{profile}", &profile_text)
        .replace("{listings}", &listings_text))
}
