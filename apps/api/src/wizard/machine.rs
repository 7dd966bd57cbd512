//! Wizard state machine: `(state, action) -> state`, no I/O.
//!
//! Forward order: Landing → AcademicInfo → CareerInterests → PersonalInfo →
//! Keywords → AiProcessing → Recommendations ⇄ Detail (and ⇄ Saved).
//! A failed guard leaves the page unchanged and returns a `Blocked` signal.
//! Actions that do not belong to the current page are blocked the same way.

use std::collections::HashMap;

use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::credential::Credential;
use crate::models::listing::ListingType;
use crate::models::profile::{
    dedup_selection, EmploymentType, Industry, JobRole, MAX_SELECTIONS,
};
use crate::wizard::action::Action;
use crate::wizard::Page;
use crate::wizard::session::{
    BlockReason, Effect, SessionState, Signal, Transition, APPLIED_MESSAGE, SAVED_MESSAGE,
    UNSAVED_MESSAGE,
};

/// Applies `action` to `state`.
pub fn transition(state: SessionState, action: Action, catalog: &Catalog) -> Transition {
    let mut t = step(state, action, catalog);
    redirect_unselected_detail(&mut t.state);
    t
}

/// `Detail` without a resolvable selection falls back to `Recommendations`.
fn redirect_unselected_detail(state: &mut SessionState) {
    if state.page == Page::Detail && state.selected_listing.is_none() {
        state.page = Page::Recommendations;
    }
}

fn step(mut state: SessionState, action: Action, catalog: &Catalog) -> Transition {
    if let Action::Restart = action {
        return Transition::to(SessionState::new());
    }

    match (state.page, action) {
        (Page::Landing, Action::Start) => {
            state.page = Page::AcademicInfo;
            Transition::to(state)
        }

        (Page::AcademicInfo, Action::SubmitAcademic { year, major }) => {
            submit_academic(state, &year, &major)
        }

        (Page::CareerInterests, Action::SubmitCareer { roles, industries }) => {
            submit_career(state, &roles, &industries)
        }

        (
            Page::PersonalInfo,
            Action::SubmitPersonal {
                name,
                email,
                employment_types,
            },
        ) => submit_personal(state, &name, &email, &employment_types),

        (Page::Keywords, Action::AddKeyword { keyword }) => {
            state.profile.add_keyword(&keyword);
            Transition::to(state)
        }
        (Page::Keywords, Action::RemoveKeyword { keyword }) => {
            state.profile.remove_keyword(&keyword);
            Transition::to(state)
        }
        (Page::Keywords, Action::SetNotificationOptIn { opt_in }) => {
            state.profile.notification_opt_in = opt_in;
            Transition::to(state)
        }
        (Page::Keywords, Action::RequestRecommendations) => {
            state.page = Page::AiProcessing;
            // A credential kept from earlier in the session skips the prompt.
            if state.credential.is_some() {
                start_processing(state)
            } else {
                Transition::to(state)
            }
        }

        (Page::AiProcessing, Action::SubmitCredential { .. })
            if state.processing_run.is_some() =>
        {
            Transition::blocked(state, BlockReason::ProcessingInProgress)
        }
        (Page::AiProcessing, Action::SubmitCredential { api_key }) => {
            match Credential::parse(&api_key) {
                Some(credential) => {
                    state.credential = Some(credential);
                    start_processing(state)
                }
                None => Transition::blocked(state, BlockReason::MissingCredential),
            }
        }
        (Page::AiProcessing, Action::ProcessingComplete { run, reasons }) => {
            complete_processing(state, run, reasons)
        }

        (
            Page::Recommendations,
            Action::UpdateFilter {
                search,
                industry,
                employment_type,
            },
        ) => {
            if let Some(search) = search {
                state.filter.search = search;
            }
            if let Some(industry) = industry {
                state.filter.industry = industry;
            }
            if let Some(employment_type) = employment_type {
                state.filter.employment_type = employment_type;
            }
            Transition::to(state)
        }
        (Page::Recommendations, Action::ResetFilters) => {
            state.filter = Default::default();
            Transition::to(state)
        }
        (Page::Recommendations, Action::SelectTab { tab }) => {
            state.active_tab = tab;
            Transition::to(state)
        }
        (Page::Recommendations | Page::Detail, Action::SearchTag { tag }) => {
            state.filter.search = tag.trim().to_string();
            state.page = Page::Recommendations;
            Transition::to(state)
        }
        (Page::Recommendations, Action::ShowSaved) => {
            state.page = Page::Saved;
            Transition::to(state)
        }
        (Page::Recommendations | Page::Saved, Action::OpenDetail { listing_id }) => {
            open_detail(state, listing_id, catalog)
        }

        (Page::Detail, Action::Save) => with_selection(state, |state, id| {
            state.saved_listings.insert(id);
            Signal::Saved {
                message: SAVED_MESSAGE,
            }
        }),
        (Page::Detail, Action::Unsave) => with_selection(state, |state, id| {
            state.saved_listings.remove(&id);
            Signal::Unsaved {
                message: UNSAVED_MESSAGE,
            }
        }),
        (Page::Detail, Action::Apply) => with_selection(state, |_, _| Signal::Applied {
            message: APPLIED_MESSAGE,
        }),
        (Page::Detail | Page::Saved, Action::Back) => {
            state.page = Page::Recommendations;
            Transition::to(state)
        }

        (page, action) => {
            let reason = BlockReason::NotAvailable {
                action: action.name(),
                page,
            };
            Transition::blocked(state, reason)
        }
    }
}

/// Onboarding text fields count as present once trimmed to something.
fn missing(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

fn submit_academic(mut state: SessionState, year: &str, major: &str) -> Transition {
    let missing = missing(&[("year", year), ("major", major)]);
    if !missing.is_empty() {
        return Transition::blocked(state, BlockReason::MissingFields { fields: missing });
    }

    state.profile.academic.year = year.trim().to_string();
    state.profile.academic.major = major.trim().to_string();
    state.page = Page::CareerInterests;
    Transition::to(state)
}

fn submit_career(mut state: SessionState, roles: &[JobRole], industries: &[Industry]) -> Transition {
    let roles = dedup_selection(roles);
    let industries = dedup_selection(industries);

    if roles.is_empty() {
        return Transition::blocked(
            state,
            BlockReason::MissingFields {
                fields: vec!["roles"],
            },
        );
    }
    if roles.len() > MAX_SELECTIONS {
        return Transition::blocked(
            state,
            BlockReason::TooManySelections {
                field: "roles",
                max: MAX_SELECTIONS,
            },
        );
    }
    if industries.len() > MAX_SELECTIONS {
        return Transition::blocked(
            state,
            BlockReason::TooManySelections {
                field: "industries",
                max: MAX_SELECTIONS,
            },
        );
    }

    state.profile.career.roles = roles;
    state.profile.career.industries = industries;
    state.page = Page::PersonalInfo;
    Transition::to(state)
}

fn submit_personal(
    mut state: SessionState,
    name: &str,
    email: &str,
    employment_types: &[EmploymentType],
) -> Transition {
    let missing = missing(&[("name", name), ("email", email)]);
    if !missing.is_empty() {
        return Transition::blocked(state, BlockReason::MissingFields { fields: missing });
    }

    state.profile.personal.name = name.trim().to_string();
    state.profile.personal.email = email.trim().to_string();
    state.profile.personal.employment_types = dedup_selection(employment_types);
    state.page = Page::Keywords;
    Transition::to(state)
}

fn start_processing(mut state: SessionState) -> Transition {
    let run = Uuid::new_v4();
    state.processing_run = Some(run);
    Transition::to(state).with_effect(Effect::RunProcessing { run })
}

/// Only the run started last is accepted. Anything else comes from before a
/// restart or a superseded attempt.
fn complete_processing(
    mut state: SessionState,
    run: Uuid,
    reasons: HashMap<String, String>,
) -> Transition {
    if state.processing_run != Some(run) {
        return Transition::blocked(state, BlockReason::StaleProcessingRun);
    }

    state.processing_run = None;
    state.reasons = reasons
        .into_iter()
        .filter(|(_, reason)| !reason.trim().is_empty())
        .collect();
    state.page = Page::Recommendations;
    state.active_tab = ListingType::Job;
    Transition::to(state)
}

fn open_detail(mut state: SessionState, listing_id: String, catalog: &Catalog) -> Transition {
    if catalog.get(&listing_id).is_none() {
        return Transition::blocked(state, BlockReason::UnknownListing { listing_id });
    }
    state.selected_listing = Some(listing_id);
    state.page = Page::Detail;
    Transition::to(state)
}

fn with_selection(
    mut state: SessionState,
    apply: impl FnOnce(&mut SessionState, String) -> Signal,
) -> Transition {
    match state.selected_listing.clone() {
        Some(id) => {
            let signal = apply(&mut state, id);
            Transition::to(state).with_signal(signal)
        }
        None => Transition::blocked(state, BlockReason::NoListingSelected),
    }
}
