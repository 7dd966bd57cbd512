use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ListingFilter;
use crate::models::credential::Credential;
use crate::models::listing::ListingType;
use crate::models::profile::UserProfile;
use crate::wizard::Page;

pub const SAVED_MESSAGE: &str = "저장되었습니다!";
pub const UNSAVED_MESSAGE: &str = "저장이 취소되었습니다.";
pub const APPLIED_MESSAGE: &str = "지원이 완료되었습니다!";
pub const CREDENTIAL_REQUIRED_MESSAGE: &str = "API Key가 필요합니다.";

/// Everything one interactive session knows. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub page: Page,
    pub profile: UserProfile,
    pub selected_listing: Option<String>,
    pub saved_listings: BTreeSet<String>,
    pub filter: ListingFilter,
    pub active_tab: ListingType,
    /// Reasons produced during processing, keyed by listing id.
    pub reasons: HashMap<String, String>,
    #[serde(skip)]
    pub credential: Option<Credential>,
    /// Set while a processing run is in flight; only its completion is accepted.
    #[serde(skip)]
    pub processing_run: Option<Uuid>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            page: Page::Landing,
            profile: UserProfile::default(),
            selected_listing: None,
            saved_listings: BTreeSet::new(),
            filter: ListingFilter::default(),
            active_tab: ListingType::Job,
            reasons: HashMap::new(),
            credential: None,
            processing_run: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saved(&self, listing_id: &str) -> bool {
        self.saved_listings.contains(listing_id)
    }
}

/// Why an action did not move the session forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum BlockReason {
    MissingFields { fields: Vec<&'static str> },
    TooManySelections { field: &'static str, max: usize },
    MissingCredential,
    UnknownListing { listing_id: String },
    NoListingSelected,
    ProcessingInProgress,
    StaleProcessingRun,
    NotAvailable { action: &'static str, page: Page },
}

impl BlockReason {
    pub fn message(&self) -> String {
        match self {
            BlockReason::MissingFields { fields } => {
                format!("Required fields are empty: {}", fields.join(", "))
            }
            BlockReason::TooManySelections { field, max } => {
                format!("At most {max} {field} may be selected")
            }
            BlockReason::MissingCredential => CREDENTIAL_REQUIRED_MESSAGE.to_string(),
            BlockReason::UnknownListing { listing_id } => {
                format!("Listing {listing_id} does not exist")
            }
            BlockReason::NoListingSelected => "No listing is selected".to_string(),
            BlockReason::ProcessingInProgress => "Recommendations are already being prepared".to_string(),
            BlockReason::StaleProcessingRun => "Processing result no longer applies".to_string(),
            BlockReason::NotAvailable { action, page } => {
                format!("'{action}' is not available on {page:?}")
            }
        }
    }
}

/// Transient notice returned with an action outcome. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    Blocked {
        reason: BlockReason,
        message: String,
    },
    Saved { message: &'static str },
    Unsaved { message: &'static str },
    Applied { message: &'static str },
}

impl Signal {
    pub fn blocked(reason: BlockReason) -> Self {
        let message = reason.message();
        Signal::Blocked { reason, message }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Signal::Blocked { .. })
    }
}

/// Side effect the caller must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the processing stages, then apply `Action::ProcessingComplete`
    /// carrying the same `run`.
    RunProcessing { run: Uuid },
}

/// Result of applying one action.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub signal: Option<Signal>,
    pub effect: Option<Effect>,
}

impl Transition {
    pub fn to(state: SessionState) -> Self {
        Self {
            state,
            signal: None,
            effect: None,
        }
    }

    pub fn blocked(state: SessionState, reason: BlockReason) -> Self {
        Self {
            state,
            signal: Some(Signal::blocked(reason)),
            effect: None,
        }
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}
