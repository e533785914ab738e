use log::info;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::NormalizedServiceRecord;

const UNSPECIFIED: &str = "Unspecified";

/// Summary of one language's transformed directory.
#[derive(Debug, Serialize, PartialEq)]
pub struct DirectoryReport {
    pub language: String,
    pub total: usize,
    pub referral_required: usize,
    pub referral_not_required: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_region: BTreeMap<String, usize>,
}

impl DirectoryReport {
    pub fn from_services(language: &str, services: &[NormalizedServiceRecord]) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_region = BTreeMap::new();
        let mut referral_required = 0;

        for service in services {
            *by_category.entry(label(service.category.name.as_ref())).or_insert(0) += 1;
            *by_region.entry(label(service.region.as_ref())).or_insert(0) += 1;
            if service.referral.required {
                referral_required += 1;
            }
        }

        info!("Collected directory stats for language: {}", language);

        DirectoryReport {
            language: language.to_string(),
            total: services.len(),
            referral_required,
            referral_not_required: services.len() - referral_required,
            by_category,
            by_region,
        }
    }

    pub fn referral_required_percentage(&self) -> f64 {
        if self.total > 0 {
            (self.referral_required as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDocument {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub languages: Vec<DirectoryReport>,
}

fn label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNSPECIFIED.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => UNSPECIFIED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawServiceRecord;
    use crate::transform::normalize;
    use serde_json::json;

    fn services() -> Vec<NormalizedServiceRecord> {
        let point = json!({ "type": "Point", "coordinates": [35.9, 31.9] });
        let raw: Vec<RawServiceRecord> = serde_json::from_value(json!([
            { "id": 1, "category": "Health", "region": "Amman", "locationAlternate": point.clone(),
              "referralMethod": { "IA Form": true } },
            { "id": 2, "category": "Health", "region": "Irbid", "locationAlternate": point.clone(),
              "referralMethod": { "Referral is not required": true } },
            { "id": 3, "category": "", "locationAlternate": point.clone() }
        ]))
        .unwrap();
        normalize(raw)
    }

    #[test]
    fn counts_categories_regions_and_referrals() {
        let report = DirectoryReport::from_services("en", &services());
        assert_eq!(report.total, 3);
        assert_eq!(report.referral_required, 1);
        assert_eq!(report.referral_not_required, 2);
        assert_eq!(report.by_category.get("Health"), Some(&2));
        assert_eq!(report.by_category.get(UNSPECIFIED), Some(&1));
        assert_eq!(report.by_region.get("Irbid"), Some(&1));
        assert_eq!(report.by_region.get(UNSPECIFIED), Some(&1));
    }

    #[test]
    fn empty_directory_has_zero_percentage() {
        let report = DirectoryReport::from_services("ar", &[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.referral_required_percentage(), 0.0);
    }

    #[test]
    fn non_string_labels_use_json_text() {
        assert_eq!(label(Some(&json!(12))), "12");
        assert_eq!(label(Some(&Value::Null)), UNSPECIFIED);
    }
}
