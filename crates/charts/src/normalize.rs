//! Property Normalizer
//!
//! Rewrites the lowercase-concatenated dataset property names the service
//! sometimes emits into canonical camelCase. Works on a deep copy.

use serde_json::Value;

/// Alias -> canonical dataset property names.
const DATASET_RENAMES: &[(&str, &str)] = &[
    ("backgroundcolor", "backgroundColor"),
    ("bordercolor", "borderColor"),
    ("borderwidth", "borderWidth"),
    ("pointbackgroundcolor", "pointBackgroundColor"),
    ("pointbordercolor", "pointBorderColor"),
    ("pointborderwidth", "pointBorderWidth"),
    ("pointradius", "pointRadius"),
    ("pointhoverradius", "pointHoverRadius"),
];

/// Return a normalized copy of `candidate`; the input is left untouched.
pub fn normalize_candidate(candidate: &Value) -> Value {
    let mut copy = candidate.clone();
    let datasets = copy
        .get_mut("chart_config")
        .and_then(|config| config.get_mut("datasets"))
        .and_then(Value::as_array_mut);

    if let Some(datasets) = datasets {
        for dataset in datasets.iter_mut() {
            normalize_dataset(dataset);
        }
    }
    copy
}

/// Rename aliased keys of one dataset in place.
///
/// When both spellings are present the canonical one wins and the alias is
/// dropped, so no alias survives normalization.
fn normalize_dataset(dataset: &mut Value) {
    let map = match dataset.as_object_mut() {
        Some(m) => m,
        None => return,
    };

    for &(alias, canonical) in DATASET_RENAMES {
        if let Some(value) = map.remove(alias) {
            if map.contains_key(canonical) {
                tracing::debug!(
                    "[PropertyNormalizer] Dropping '{}' in favour of existing '{}'",
                    alias,
                    canonical
                );
            } else {
                map.insert(canonical.to_string(), value);
            }
        }
    }
}

/// True when no dataset carries a known alias.
pub fn is_canonical(candidate: &Value) -> bool {
    candidate
        .get("chart_config")
        .and_then(|config| config.get("datasets"))
        .and_then(Value::as_array)
        .map(|datasets| {
            datasets.iter().all(|dataset| {
                dataset.as_object().map_or(true, |map| {
                    DATASET_RENAMES
                        .iter()
                        .all(|(alias, _)| !map.contains_key(*alias))
                })
            })
        })
        .unwrap_or(true)
}
