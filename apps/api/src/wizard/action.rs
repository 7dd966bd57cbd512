use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::models::listing::ListingType;
use crate::models::profile::{EmploymentType, Industry, JobRole};

/// A single user action. Arrives as `{"action": "<name>", ...fields}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // Onboarding
    Start,
    SubmitAcademic {
        year: String,
        major: String,
    },
    SubmitCareer {
        roles: Vec<JobRole>,
        #[serde(default)]
        industries: Vec<Industry>,
    },
    SubmitPersonal {
        name: String,
        email: String,
        #[serde(default)]
        employment_types: Vec<EmploymentType>,
    },
    AddKeyword {
        keyword: String,
    },
    RemoveKeyword {
        keyword: String,
    },
    SetNotificationOptIn {
        opt_in: bool,
    },
    RequestRecommendations,

    // Processing
    SubmitCredential {
        api_key: String,
    },
    /// Fed back by the server once the processing stages finish.
    #[serde(skip)]
    ProcessingComplete {
        run: Uuid,
        reasons: HashMap<String, String>,
    },

    // Recommendations
    UpdateFilter {
        search: Option<String>,
        industry: Option<String>,
        employment_type: Option<String>,
    },
    ResetFilters,
    SelectTab {
        tab: ListingType,
    },
    SearchTag {
        tag: String,
    },
    ShowSaved,
    OpenDetail {
        listing_id: String,
    },

    // Detail
    Save,
    Unsave,
    Apply,
    Back,

    Restart,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::SubmitAcademic { .. } => "submit_academic",
            Action::SubmitCareer { .. } => "submit_career",
            Action::SubmitPersonal { .. } => "submit_personal",
            Action::AddKeyword { .. } => "add_keyword",
            Action::RemoveKeyword { .. } => "remove_keyword",
            Action::SetNotificationOptIn { .. } => "set_notification_opt_in",
            Action::RequestRecommendations => "request_recommendations",
            Action::SubmitCredential { .. } => "submit_credential",
            Action::ProcessingComplete { .. } => "processing_complete",
            Action::UpdateFilter { .. } => "update_filter",
            Action::ResetFilters => "reset_filters",
            Action::SelectTab { .. } => "select_tab",
            Action::SearchTag { .. } => "search_tag",
            Action::ShowSaved => "show_saved",
            Action::OpenDetail { .. } => "open_detail",
            Action::Save => "save",
            Action::Unsave => "unsave",
            Action::Apply => "apply",
            Action::Back => "back",
            Action::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_tagged_actions() {
        let action: Action = serde_json::from_value(json!({
            "action": "submit_career",
            "roles": ["개발 / IT"]
        }))
        .unwrap();
        match action {
            Action::SubmitCareer { roles, industries } => {
                assert_eq!(roles, vec![JobRole::DevelopmentIt]);
                assert!(industries.is_empty());
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_tab_accepts_dataset_label_and_alias() {
        let by_label: Action =
            serde_json::from_value(json!({"action": "select_tab", "tab": "비교과"})).unwrap();
        let by_alias: Action =
            serde_json::from_value(json!({"action": "select_tab", "tab": "program"})).unwrap();
        for action in [by_label, by_alias] {
            assert!(matches!(
                action,
                Action::SelectTab {
                    tab: ListingType::Program
                }
            ));
        }
    }

    #[test]
    fn test_processing_complete_not_accepted_from_clients() {
        let result: Result<Action, _> =
            serde_json::from_value(json!({"action": "processing_complete", "reasons": {}}));
        assert!(result.is_err());
    }
}
