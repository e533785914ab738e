use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value; // Opaque export fields are carried as-is

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// Anything but an array means no hours; entries that are not slot objects are skipped.
fn office_hour_slots<'de, D>(deserializer: D) -> Result<Option<Vec<RawOfficeHours>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
        ),
        _ => None,
    })
}

// Raw data structs (shape owned by the ActivityInfo export)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceRecord {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub original_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub service_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub region: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub organization: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub sub_category: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Value>, // May contain a nested `location` geometry
    #[serde(default, deserialize_with = "present")]
    pub location_alternate: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub services_provided: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub nationality: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub intake_criteria: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub accessibility: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub coverage: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub availability: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub referral_method: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub referral_next_steps: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub feedback_mechanism: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub feedback_delay: Option<Value>,
    #[serde(default, deserialize_with = "present", rename = "Legal Documents Required")]
    pub legal_documents_required: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub complaints_mechanism: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub hotline_phone: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub info_link: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub public_address: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub additional_details: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub comments: Option<Value>,
    #[serde(default, deserialize_with = "office_hour_slots")]
    pub office_hours: Option<Vec<RawOfficeHours>>,
}

/// One office-hours slot. Values are display text and may be null or non-strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOfficeHours {
    #[serde(default)]
    pub day: Option<Value>,
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
}

// Normalized structs consumed by the browsing UI
// Missing fields stay missing and explicit nulls are written as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedServiceRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub original_id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,
    pub logo_url: String,
    pub organization: Organization,
    pub category: Category,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub services_provided: Option<Value>,
    pub location: LocationFeature,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub intake_criteria: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub availability: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub referral_method: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub referral_next_steps: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub feedback_mechanism: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub feedback_delay: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub legal_documents_required: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub complaints_mechanism: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hotline_phone: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub info_link: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub public_address: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub comments: Option<Value>,
    pub referral: Referral,
    pub office_hours: Vec<OfficeHours>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Organization {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    pub sub_category: SubCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

/// GeoJSON-style wrapper the map layer consumes directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Value,
}

impl LocationFeature {
    pub fn new(geometry: Value) -> Self {
        LocationFeature {
            feature_type: "Feature".to_string(),
            geometry,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Referral {
    pub required: bool,
    #[serde(rename = "type", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub referral_type: Option<Value>, // Raw referralMethod, kept for display
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfficeHours {
    pub name: String,
    pub time: String, // Comma-separated "start-end" ranges
}
