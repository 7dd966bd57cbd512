use serde::{Deserialize, Serialize};

/// Upper bound on role and industry selections in the career step.
pub const MAX_SELECTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobRole {
    #[serde(rename = "기획 / 전략")]
    PlanningStrategy,
    #[serde(rename = "마케팅 / 광고")]
    MarketingAdvertising,
    #[serde(rename = "디자인 / 콘텐츠")]
    DesignContent,
    #[serde(rename = "개발 / IT")]
    DevelopmentIt,
    #[serde(rename = "데이터 / 분석")]
    DataAnalytics,
    #[serde(rename = "운영 / 교육")]
    OperationsEducation,
}

impl JobRole {
    pub const ALL: [JobRole; 6] = [
        JobRole::PlanningStrategy,
        JobRole::MarketingAdvertising,
        JobRole::DesignContent,
        JobRole::DevelopmentIt,
        JobRole::DataAnalytics,
        JobRole::OperationsEducation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobRole::PlanningStrategy => "기획 / 전략",
            JobRole::MarketingAdvertising => "마케팅 / 광고",
            JobRole::DesignContent => "디자인 / 콘텐츠",
            JobRole::DevelopmentIt => "개발 / IT",
            JobRole::DataAnalytics => "데이터 / 분석",
            JobRole::OperationsEducation => "운영 / 교육",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "IT / 테크")]
    Tech,
    #[serde(rename = "미디어 / 엔터")]
    MediaEntertainment,
    #[serde(rename = "교육/EdTech")]
    EdTech,
    #[serde(rename = "금융 / 핀테크")]
    Finance,
    #[serde(rename = "소비재 / 패션 / 뷰티")]
    ConsumerGoods,
    #[serde(rename = "공공 / 연구")]
    PublicResearch,
}

impl Industry {
    pub const ALL: [Industry; 6] = [
        Industry::Tech,
        Industry::MediaEntertainment,
        Industry::EdTech,
        Industry::Finance,
        Industry::ConsumerGoods,
        Industry::PublicResearch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Tech => "IT / 테크",
            Industry::MediaEntertainment => "미디어 / 엔터",
            Industry::EdTech => "교육/EdTech",
            Industry::Finance => "금융 / 핀테크",
            Industry::ConsumerGoods => "소비재 / 패션 / 뷰티",
            Industry::PublicResearch => "공공 / 연구",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "인턴")]
    Intern,
    #[serde(rename = "정규직")]
    FullTime,
    #[serde(rename = "계약직")]
    Contract,
    #[serde(rename = "파트타임")]
    PartTime,
    #[serde(rename = "프리랜서")]
    Freelance,
    #[serde(rename = "상관없음")]
    Any,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 6] = [
        EmploymentType::Intern,
        EmploymentType::FullTime,
        EmploymentType::Contract,
        EmploymentType::PartTime,
        EmploymentType::Freelance,
        EmploymentType::Any,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Intern => "인턴",
            EmploymentType::FullTime => "정규직",
            EmploymentType::Contract => "계약직",
            EmploymentType::PartTime => "파트타임",
            EmploymentType::Freelance => "프리랜서",
            EmploymentType::Any => "상관없음",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicInfo {
    pub year: String,
    pub major: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerInterests {
    pub roles: Vec<JobRole>,
    pub industries: Vec<Industry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub employment_types: Vec<EmploymentType>,
}

/// Profile assembled step by step by the onboarding wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub academic: AcademicInfo,
    pub career: CareerInterests,
    pub personal: PersonalInfo,
    /// Insertion-ordered, no duplicates.
    pub keywords: Vec<String>,
    pub notification_opt_in: bool,
}

impl UserProfile {
    /// Adds a trimmed keyword. Returns false when it was blank or already present.
    pub fn add_keyword(&mut self, raw: &str) -> bool {
        let keyword = raw.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword.trim());
        self.keywords.len() != before
    }
}

/// Drops repeated selections while keeping first-seen order.
pub fn dedup_selection<T: PartialEq + Copy>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}
