// AI processing step: two fixed-latency stages, then the session moves on.
// Listing order is never changed here. Reason text comes from a pluggable
// `ReasonGenerator`; all LLM calls go through llm_client.

pub mod prompts;
pub mod reasons;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::models::credential::Credential;
use crate::models::listing::Listing;
use crate::models::profile::UserProfile;

pub use reasons::{LlmReasonGenerator, ReasonGenerator, StaticReasonGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    JobFit,
    KeywordMatching,
}

impl ProcessingStage {
    pub const ALL: [ProcessingStage; 2] = [ProcessingStage::JobFit, ProcessingStage::KeywordMatching];

    pub const HEADLINE: &'static str = "AI가 당신에게 맞는 공고를 분석하는 중입니다...";

    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStage::JobFit => "직무 적합도 평가 중...",
            ProcessingStage::KeywordMatching => "키워드 매칭 중...",
        }
    }
}

/// Snapshot handed to the pipeline so no session lock is held while it runs.
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub profile: UserProfile,
    pub credential: Credential,
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingReport {
    pub stages_completed: Vec<ProcessingStage>,
    pub reasons: HashMap<String, String>,
}

/// Runs both stages with `stage_delay` each. The reason generator is consulted
/// during keyword matching; its failure degrades to no reasons.
pub async fn run_processing(
    request: ProcessingRequest,
    generator: Arc<dyn ReasonGenerator>,
    stage_delay: Duration,
) -> ProcessingReport {
    let mut report = ProcessingReport::default();

    for stage in ProcessingStage::ALL {
        info!("Processing stage: {}", stage.label());

        if stage == ProcessingStage::KeywordMatching {
            let (reasons, ()) = tokio::join!(
                generate_reasons(&request, generator.as_ref()),
                tokio::time::sleep(stage_delay)
            );
            report.reasons = reasons;
        } else {
            tokio::time::sleep(stage_delay).await;
        }

        report.stages_completed.push(stage);
    }

    info!(
        "Processing finished after {} stages: {} reasons for {} listings",
        report.stages_completed.len(),
        report.reasons.len(),
        request.listings.len()
    );
    report
}

async fn generate_reasons(
    request: &ProcessingRequest,
    generator: &dyn ReasonGenerator,
) -> HashMap<String, String> {
    match generator
        .generate(&request.profile, &request.listings, &request.credential)
        .await
    {
        Ok(reasons) => reasons,
        Err(e) => {
            warn!(
                "Reason generation via {} failed, using fallback reasons: {e}",
                generator.backend()
            );
            HashMap::new()
        }
    }
}
