//! Canned answer shown when the QA service cannot be reached.

use govq_core::{AskResponse, Dataset};

use super::response::fill_quality_score;

const FALLBACK_ANSWER: &str = "Based on the data provided, the available dataset for labour force statistics is:

**6202.0 Labour Force, Australia - Table 25. Underutilised persons by State, Territory and Sex (expanded analytical series), Monthly**

This dataset contains detailed monthly time series data covering:

**Geographic coverage:** Australia and all states/territories (NSW, Victoria, Queensland, South Australia, Western Australia, Tasmania, Northern Territory, Australian Capital Territory)

**Breakdowns available:**
- By sex (Persons, Males, Females)
- Employment status (Employed total, Employed full-time, Employed part-time)
- Underemployment categories (expanded analytical series) including:
  - Underemployed total
  - Underemployed full-time (with sub-categories for economic reasons and preference for more hours)
  - Underemployed part-time (with sub-categories for economic reasons and preference for more hours)

**Time coverage:** Monthly data from July 2014 through to July 2025 (133 observations per series)

**Data characteristics:**
- Original series type
- Stock data type
- Monthly frequency
- Units in thousands (000)

This dataset provides comprehensive labour force underutilisation statistics that can be analyzed by jurisdiction, sex, and employment type over an 11-year period.";

const LABOUR_FORCE_URL: &str =
    "https://www.abs.gov.au/statistics/labour/employment-and-unemployment/labour-force-australia";

/// The fixed answer and single dataset used in place of a failed request.
pub fn fallback_response() -> AskResponse {
    let mut dataset = Dataset {
        agency: "Australian Bureau of Statistics".to_string(),
        title: "6202.0 Labour Force, Australia - Table 25. Underutilised persons by State, Territory and Sex \
                (expanded analytical series), Monthly"
            .to_string(),
        topics: ["labour", "employment", "underutilisation", "australia"]
            .into_iter()
            .map(String::from)
            .collect(),
        date: None,
        url: LABOUR_FORCE_URL.to_string(),
        download_url: Some(format!("{LABOUR_FORCE_URL}/latest-release/6202025.xlsx")),
        quality_score: None,
    };
    fill_quality_score(&mut dataset);

    AskResponse { answer: FALLBACK_ANSWER.to_string(), datasets: vec![dataset] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let response = fallback_response();
        assert!(response.answer.starts_with("Based on the data provided"));
        assert_eq!(response.datasets.len(), 1);

        let dataset = &response.datasets[0];
        assert_eq!(dataset.agency, "Australian Bureau of Statistics");
        assert!(dataset.title.contains("(expanded analytical series), Monthly"));
        assert!(dataset.download_url.as_deref().unwrap().ends_with("6202025.xlsx"));
        assert!(dataset.quality_score.is_some());
    }

    #[test]
    fn test_fallback_is_fixed() {
        assert_eq!(fallback_response(), fallback_response());
    }
}
