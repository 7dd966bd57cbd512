//! Page views: what the client draws for the session's current page.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{summary, Catalog, ListingFilter};
use crate::models::listing::{Listing, ListingType};
use crate::models::profile::{EmploymentType, Industry, JobRole, MAX_SELECTIONS};
use crate::processing::ProcessingStage;
use crate::wizard::Page;
use crate::wizard::session::SessionState;

pub const FALLBACK_REASON: &str = "이 공고는 회원님의 관심사와 직무 적합도가 높습니다.";

#[derive(Debug, Clone, Serialize)]
pub struct ListingCard {
    pub id: String,
    pub subtype: String,
    pub title: String,
    pub company: String,
    pub deadline: NaiveDate,
    pub tags: Vec<String>,
    pub saved: bool,
}

impl ListingCard {
    fn new(listing: &Listing, state: &SessionState) -> Self {
        Self {
            id: listing.id.clone(),
            subtype: listing.subtype.clone(),
            title: listing.title.clone(),
            company: listing.company.clone(),
            deadline: listing.deadline,
            tags: listing.tags.clone(),
            saved: state.is_saved(&listing.id),
        }
    }
}

/// One recommendations tab.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPanel {
    pub listing_type: ListingType,
    pub total: usize,
    pub summary: String,
    pub cards: Vec<ListingCard>,
}

impl ListingPanel {
    fn build(listing_type: ListingType, catalog: &Catalog, state: &SessionState) -> Self {
        let cards: Vec<_> = catalog
            .query(listing_type, &state.filter)
            .into_iter()
            .map(|l| ListingCard::new(l, state))
            .collect();
        Self {
            listing_type,
            total: cards.len(),
            summary: summary(cards.len()),
            cards,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Landing {
        title: &'static str,
        headline: &'static str,
    },
    AcademicInfo {
        year: String,
        major: String,
    },
    CareerInterests {
        roles: Vec<JobRole>,
        industries: Vec<Industry>,
        role_options: Vec<&'static str>,
        industry_options: Vec<&'static str>,
        max_selections: usize,
    },
    PersonalInfo {
        name: String,
        email: String,
        employment_types: Vec<EmploymentType>,
        employment_options: Vec<&'static str>,
    },
    Keywords {
        keywords: Vec<String>,
        notification_opt_in: bool,
    },
    AiProcessing {
        headline: &'static str,
        credential_required: bool,
        stages: Vec<&'static str>,
    },
    Recommendations {
        active_tab: ListingType,
        filter: ListingFilter,
        filter_active: bool,
        jobs: ListingPanel,
        programs: ListingPanel,
        saved_count: usize,
        dataset_error: Option<String>,
    },
    Detail {
        listing: Listing,
        reason: String,
        saved: bool,
    },
    Saved {
        summary: String,
        cards: Vec<ListingCard>,
    },
}

/// The reason shown on a detail page: session-generated first, then the
/// dataset column, then the static fallback.
pub fn reason_for(listing: &Listing, state: &SessionState) -> String {
    state
        .reasons
        .get(&listing.id)
        .or(listing.reason.as_ref())
        .cloned()
        .unwrap_or_else(|| FALLBACK_REASON.to_string())
}

pub fn render(state: &SessionState, catalog: &Catalog) -> PageView {
    match state.page {
        Page::Landing => PageView::Landing {
            title: "Y-OUR Career",
            headline: "커리어연세의 중요한 공고, 놓치지 않게.",
        },
        Page::AcademicInfo => PageView::AcademicInfo {
            year: state.profile.academic.year.clone(),
            major: state.profile.academic.major.clone(),
        },
        Page::CareerInterests => PageView::CareerInterests {
            roles: state.profile.career.roles.clone(),
            industries: state.profile.career.industries.clone(),
            role_options: JobRole::ALL.iter().map(JobRole::label).collect(),
            industry_options: Industry::ALL.iter().map(Industry::label).collect(),
            max_selections: MAX_SELECTIONS,
        },
        Page::PersonalInfo => PageView::PersonalInfo {
            name: state.profile.personal.name.clone(),
            email: state.profile.personal.email.clone(),
            employment_types: state.profile.personal.employment_types.clone(),
            employment_options: EmploymentType::ALL
                .iter()
                .map(EmploymentType::label)
                .collect(),
        },
        Page::Keywords => PageView::Keywords {
            keywords: state.profile.keywords.clone(),
            notification_opt_in: state.profile.notification_opt_in,
        },
        Page::AiProcessing => PageView::AiProcessing {
            headline: ProcessingStage::HEADLINE,
            credential_required: state.credential.is_none(),
            stages: ProcessingStage::ALL.iter().map(ProcessingStage::label).collect(),
        },
        Page::Recommendations => recommendations(state, catalog),
        Page::Detail => {
            let selected = state
                .selected_listing
                .as_deref()
                .and_then(|id| catalog.get(id));
            match selected {
                Some(listing) => PageView::Detail {
                    listing: listing.clone(),
                    reason: reason_for(listing, state),
                    saved: state.is_saved(&listing.id),
                },
                None => recommendations(state, catalog),
            }
        }
        Page::Saved => {
            let cards: Vec<_> = catalog
                .all()
                .iter()
                .filter(|l| state.is_saved(&l.id))
                .map(|l| ListingCard::new(l, state))
                .collect();
            PageView::Saved {
                summary: summary(cards.len()),
                cards,
            }
        }
    }
}

fn recommendations(state: &SessionState, catalog: &Catalog) -> PageView {
    PageView::Recommendations {
        active_tab: state.active_tab,
        filter: state.filter.clone(),
        filter_active: state.filter.is_active(),
        jobs: ListingPanel::build(ListingType::Job, catalog, state),
        programs: ListingPanel::build(ListingType::Program, catalog, state),
        saved_count: state.saved_listings.len(),
        dataset_error: catalog.load_error().map(str::to_string),
    }
}
