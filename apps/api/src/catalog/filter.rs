use serde::{Deserialize, Serialize};

use crate::models::listing::Listing;

/// Sentinel meaning "do not filter on this dimension".
pub const ALL: &str = "All";

/// Search and dropdown filters shared by both recommendation tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    pub search: String,
    pub industry: String,
    pub employment_type: String,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            industry: ALL.to_string(),
            employment_type: ALL.to_string(),
        }
    }
}

fn is_unfiltered(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ALL
}

impl ListingFilter {
    /// Search is a case-insensitive substring test over title and company.
    /// Industry and employment type are exact matches. Employment type is
    /// compared against the `employment_type` column only, never `subtype`.
    pub fn matches(&self, listing: &Listing) -> bool {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty()
            && !listing.title.to_lowercase().contains(&query)
            && !listing.company.to_lowercase().contains(&query)
        {
            return false;
        }

        if !is_unfiltered(&self.industry) && listing.industry != self.industry.trim() {
            return false;
        }

        if !is_unfiltered(&self.employment_type)
            && listing.employment_type != self.employment_type.trim()
        {
            return false;
        }

        true
    }

    /// True when any dimension narrows the result set.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !is_unfiltered(&self.industry)
            || !is_unfiltered(&self.employment_type)
    }
}

/// Result-count caption shown above each listing panel.
pub fn summary(count: usize) -> String {
    format!("총 {count}건의 공고")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{listing, sample_catalog};
    use crate::catalog::Catalog;
    use crate::models::listing::ListingType;

    fn ux_catalog() -> Catalog {
        let mut design = listing("1", ListingType::Job, "UX Designer Intern", "피키");
        design.industry = "IT / 테크".to_string();
        let mut studio = listing("2", ListingType::Job, "브랜드 디자이너", "ux studio");
        studio.industry = "미디어 / 엔터".to_string();
        studio.employment_type = "정규직".to_string();
        let mut finance = listing("3", ListingType::Job, "투자팀 인턴", "매쉬업벤처스");
        finance.industry = "금융 / 핀테크".to_string();
        finance.tags = vec!["UX".to_string()];
        Catalog::from_listings(vec![design, studio, finance])
    }

    #[test]
    fn test_search_matches_title_or_company_case_insensitive() {
        let catalog = ux_catalog();
        let filter = ListingFilter {
            search: "UX".to_string(),
            ..Default::default()
        };
        let ids: Vec<_> = catalog
            .query(ListingType::Job, &filter)
            .into_iter()
            .map(|l| l.id.as_str())
            .collect();
        // Tags are not searched.
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_all_leaves_dimension_unfiltered() {
        let catalog = ux_catalog();
        let filter = ListingFilter::default();
        assert!(!filter.is_active());
        assert_eq!(catalog.query(ListingType::Job, &filter).len(), 3);
    }

    #[test]
    fn test_industry_is_exact_match() {
        let catalog = ux_catalog();
        let filter = ListingFilter {
            industry: "금융 / 핀테크".to_string(),
            ..Default::default()
        };
        let hits = catalog.query(ListingType::Job, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");

        let partial = ListingFilter {
            industry: "금융".to_string(),
            ..Default::default()
        };
        assert!(catalog.query(ListingType::Job, &partial).is_empty());
    }

    #[test]
    fn test_employment_type_ignores_subtype() {
        let mut only_subtype = listing("9", ListingType::Job, "제목", "회사");
        only_subtype.subtype = "정규직".to_string();
        only_subtype.employment_type = "채용연계 인턴".to_string();
        let filter = ListingFilter {
            employment_type: "정규직".to_string(),
            ..Default::default()
        };
        assert!(!filter.matches(&only_subtype));
    }

    #[test]
    fn test_no_match_summary_reads_zero() {
        let catalog = sample_catalog();
        let filter = ListingFilter {
            search: "없는공고".to_string(),
            ..Default::default()
        };
        let hits = catalog.query(ListingType::Job, &filter);
        assert_eq!(summary(hits.len()), "총 0건의 공고");
    }
}
