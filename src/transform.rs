// transform.rs
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::models::{
    Category, LocationFeature, NormalizedServiceRecord, OfficeHours, Organization,
    RawOfficeHours, RawServiceRecord, Referral, SubCategory,
};

const REFERRALS_NOT_ACCEPTED: &str = "Referrals not accepted";
const REFERRAL_NOT_REQUIRED: &str = "Referral is not required";

/// Counts collected while normalizing one language's export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    pub input: usize,
    pub duplicates: usize,
    pub unlocated: usize,
    pub output: usize,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub services: Vec<NormalizedServiceRecord>,
    pub stats: TransformStats,
}

/// Transforms raw export records into the shape the browsing UI understands.
pub fn normalize(raw_services: Vec<RawServiceRecord>) -> Vec<NormalizedServiceRecord> {
    normalize_with_stats(raw_services).services
}

/// Same as [`normalize`], also reporting how many records were dropped and why.
///
/// The first record carrying a given id claims it, even when that record is
/// then dropped for lacking geometry. Later records with the same id are
/// skipped regardless of their own geometry.
pub fn normalize_with_stats(raw_services: Vec<RawServiceRecord>) -> Normalized {
    let mut stats = TransformStats {
        input: raw_services.len(),
        ..TransformStats::default()
    };
    let mut seen_ids: HashSet<Option<String>> = HashSet::new();
    let mut services = Vec::with_capacity(raw_services.len());

    for raw in raw_services {
        if !seen_ids.insert(id_key(raw.id.as_ref())) {
            debug!("Skipping duplicate service record with id {:?}", raw.id);
            stats.duplicates += 1;
            continue;
        }

        let geometry = match resolve_geometry(&raw) {
            Some(geometry) => geometry,
            None => {
                debug!("Skipping service record {:?} with no location", raw.id);
                stats.unlocated += 1;
                continue;
            }
        };

        services.push(transform_service(raw, geometry));
    }

    stats.output = services.len();
    Normalized { services, stats }
}

/// Decides whether a service needs a referral from its raw `referralMethod`.
///
/// An absent or falsy value needs no referral. A mapping is checked for the two
/// opt-out flags; any other truthy value (including an empty mapping) requires one.
pub fn derive_referral(referral_method: Option<&Value>) -> Referral {
    let required = match referral_method {
        None => false,
        Some(value) if !is_truthy(value) => false,
        Some(Value::Object(methods)) => {
            let not_accepted = methods.get(REFERRALS_NOT_ACCEPTED) == Some(&Value::Bool(true));
            let not_required = methods.get(REFERRAL_NOT_REQUIRED).map_or(false, is_truthy);
            !(not_accepted || not_required)
        }
        Some(_) => true,
    };

    Referral {
        required,
        referral_type: referral_method.cloned(),
    }
}

/// Groups office-hour slots by day, keeping the order days first appear in.
pub fn group_office_hours(slots: &[RawOfficeHours]) -> Vec<OfficeHours> {
    let mut days: Vec<(String, Vec<String>)> = Vec::new();
    let mut day_index: HashMap<String, usize> = HashMap::new();

    for slot in slots {
        let day = display_text(slot.day.as_ref());
        let range = format!(
            "{}-{}",
            display_text(slot.start.as_ref()),
            display_text(slot.end.as_ref())
        );
        let idx = *day_index.entry(day.clone()).or_insert_with(|| {
            days.push((day, Vec::new()));
            days.len() - 1
        });
        days[idx].1.push(range);
    }

    days.into_iter()
        .map(|(name, ranges)| OfficeHours {
            name,
            time: ranges.join(", "),
        })
        .collect()
}

fn transform_service(raw: RawServiceRecord, geometry: Value) -> NormalizedServiceRecord {
    let organization = raw.organization.as_ref();
    let organization_name = display_text_or_empty(organization.and_then(|o| o.get("title")));
    let logo_url = display_text_or_empty(organization.and_then(|o| o.get("logoURL")));
    let referral = derive_referral(raw.referral_method.as_ref());
    let office_hours = group_office_hours(raw.office_hours.as_deref().unwrap_or(&[]));

    NormalizedServiceRecord {
        id: raw.id,
        original_id: raw.original_id,
        name: raw.service_name,
        region: raw.region,
        logo_url,
        organization: Organization {
            name: organization_name,
        },
        category: Category {
            name: raw.category,
            sub_category: SubCategory {
                name: raw.sub_category,
            },
        },
        start_date: raw.start_date,
        end_date: raw.end_date,
        services_provided: raw.services_provided,
        location: LocationFeature::new(geometry),
        nationality: raw.nationality,
        intake_criteria: raw.intake_criteria,
        accessibility: raw.accessibility,
        coverage: raw.coverage,
        availability: raw.availability,
        referral_method: raw.referral_method,
        referral_next_steps: raw.referral_next_steps,
        feedback_mechanism: raw.feedback_mechanism,
        feedback_delay: raw.feedback_delay,
        legal_documents_required: raw.legal_documents_required,
        complaints_mechanism: raw.complaints_mechanism,
        hotline_phone: raw.hotline_phone,
        info_link: raw.info_link,
        public_address: raw.public_address,
        additional_details: raw.additional_details,
        comments: raw.comments,
        referral,
        office_hours,
    }
}

/// `None` when neither geometry is set. A truthy `locationAlternate` wins;
/// a falsy one is only used when there is no nested `location.location`.
fn resolve_geometry(raw: &RawServiceRecord) -> Option<Value> {
    let alternate = non_null(raw.location_alternate.as_ref());
    let nested = non_null(raw.location.as_ref().and_then(|location| location.get("location")));

    match (alternate, nested) {
        (Some(alternate), _) if is_truthy(alternate) => Some(alternate.clone()),
        (_, Some(nested)) => Some(nested.clone()),
        (alternate, None) => alternate.cloned(),
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

// Canonical JSON text keeps "7", 7 and null apart; a missing id is `None`.
fn id_key(id: Option<&Value>) -> Option<String> {
    id.map(Value::to_string)
}

// Slot text: strings as-is, null or missing as empty, anything else as JSON text.
fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn display_text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => display_text(Some(v)),
        _ => String::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
