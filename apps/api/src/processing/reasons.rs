//! Reason generation: pluggable, trait-based producer of the per-listing
//! "AI 추천 이유" text.
//!
//! Default: `StaticReasonGenerator` (no call; views fall back to dataset or
//! static text). Optional: `LlmReasonGenerator`, enabled via ENABLE_LLM_REASONS.
//!
//! `AppState` holds an `Arc<dyn ReasonGenerator>`, chosen at startup.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::credential::Credential;
use crate::models::listing::Listing;
use crate::models::profile::UserProfile;
use crate::processing::prompts::{build_reason_prompt, REASON_SYSTEM};

#[async_trait]
pub trait ReasonGenerator: Send + Sync {
    /// Returns reasons keyed by listing id. Missing ids are fine.
    async fn generate(
        &self,
        profile: &UserProfile,
        listings: &[Listing],
        credential: &Credential,
    ) -> Result<HashMap<String, String>, AppError>;

    /// Backend label for logs.
    fn backend(&self) -> &'static str;
}

pub struct StaticReasonGenerator;

#[async_trait]
impl ReasonGenerator for StaticReasonGenerator {
    async fn generate(
        &self,
        _profile: &UserProfile,
        _listings: &[Listing],
        _credential: &Credential,
    ) -> Result<HashMap<String, String>, AppError> {
        Ok(HashMap::new())
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}

/// Asks the chat model for one short justification per listing.
pub struct LlmReasonGenerator(pub LlmClient);

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReasonItem {
    pub listing_id: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReasonPayload {
    #[serde(default)]
    pub reasons: Vec<ReasonItem>,
}

#[async_trait]
impl ReasonGenerator for LlmReasonGenerator {
    async fn generate(
        &self,
        profile: &UserProfile,
        listings: &[Listing],
        credential: &Credential,
    ) -> Result<HashMap<String, String>, AppError> {
        if listings.is_empty() {
            return Ok(HashMap::new());
        }

        let prompt = build_reason_prompt(profile, listings)?;
        let system = format!("{REASON_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

        let payload: ReasonPayload = self
            .0
            .call_json(credential.expose(), &prompt, &system)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        let reasons = collect_reasons(payload, listings);
        debug!("LLM produced {} reasons", reasons.len());
        Ok(reasons)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Keeps non-blank reasons for ids that exist in `listings`; first one wins.
pub(crate) fn collect_reasons(payload: ReasonPayload, listings: &[Listing]) -> HashMap<String, String> {
    let known: HashSet<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    let mut reasons = HashMap::new();
    for item in payload.reasons {
        let reason = item.reason.trim();
        if reason.is_empty() || !known.contains(item.listing_id.as_str()) {
            continue;
        }
        reasons
            .entry(item.listing_id)
            .or_insert_with(|| reason.to_string());
    }
    reasons
}
