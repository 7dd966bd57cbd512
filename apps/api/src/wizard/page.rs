use serde::{Deserialize, Serialize};

/// Every screen a session can be on. Forward order follows declaration order
/// up to `Recommendations`; `Detail` and `Saved` hang off it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Landing,
    AcademicInfo,
    CareerInterests,
    PersonalInfo,
    Keywords,
    AiProcessing,
    Recommendations,
    Detail,
    Saved,
}
