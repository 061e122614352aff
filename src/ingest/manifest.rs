//! Manifest parsing: JSON and CSV variants.
//!
//! Both variants produce the same intermediate [`RawRecord`] rows. JSON is
//! strict: the top level must be an array and every element must validate,
//! or the whole batch fails with the element index. CSV is permissive:
//! erroneous rows are dropped, unknown columns pass through as attributes,
//! and only a fully empty result is an error.

use super::record::{Attribute, RawRecord, CANONICAL_FIELDS};
use super::IngestError;

/// Parse a JSON manifest: a top-level array of record objects.
pub(crate) fn parse_json(bytes: &[u8]) -> Result<Vec<RawRecord>, IngestError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|_| IngestError::InvalidJson)?;

    let Some(elements) = value.as_array() else {
        return Err(IngestError::InvalidJson);
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| parse_json_element(index, element))
        .collect()
}

fn parse_json_element(
    index: usize,
    element: &serde_json::Value,
) -> Result<RawRecord, IngestError> {
    let Some(object) = element.as_object() else {
        return Err(IngestError::MalformedRecord {
            index,
            reason: "expected an object".to_string(),
        });
    };

    let mut raw = RawRecord {
        name: scalar_field(object, "name").unwrap_or_default(),
        description: scalar_field(object, "description"),
        image: scalar_field(object, "image"),
        animation_url: scalar_field(object, "animation_url"),
        external_url: scalar_field(object, "external_url"),
        background_color: scalar_field(object, "background_color"),
        price_amount: scalar_field(object, "price_amount"),
        price_currency: scalar_field(object, "price_currency"),
        supply: scalar_field(object, "supply"),
        attributes: Vec::new(),
    };

    if raw.name.trim().is_empty() {
        return Err(IngestError::MalformedRecord {
            index,
            reason: "missing required field 'name'".to_string(),
        });
    }

    if let Some(amount) = raw.price_amount.as_deref() {
        if !amount.trim().is_empty() && !is_non_negative_decimal(amount) {
            return Err(IngestError::MalformedRecord {
                index,
                reason: format!("price_amount '{amount}' is not a non-negative number"),
            });
        }
    }

    if let Some(supply) = raw.supply.as_deref() {
        if !supply.trim().is_empty() && !is_positive_decimal(supply) {
            return Err(IngestError::MalformedRecord {
                index,
                reason: format!("supply '{supply}' is not a positive number"),
            });
        }
    }

    if let Some(entries) = object.get("attributes").and_then(|v| v.as_array()) {
        raw.attributes = entries
            .iter()
            .filter_map(|entry| {
                let pair = entry.as_object()?;
                let trait_type = scalar_value(pair.get("trait_type")?)?;
                let value = scalar_value(pair.get("value")?)?;
                if trait_type.is_empty() || value.is_empty() {
                    return None;
                }
                Some(Attribute { trait_type, value })
            })
            .collect();
    }

    Ok(raw)
}

/// Parse a CSV manifest with header normalization.
///
/// Header names are trimmed and lower-cased only when that form matches one
/// of the nine canonical field names; anything else is preserved verbatim
/// and treated as a free-form attribute column. Rows the parser rejects are
/// dropped; rows that are entirely blank or lack a name are dropped too
/// (every record must carry a non-empty name).
pub(crate) fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<Header> = match reader.headers() {
        Ok(headers) => headers.iter().map(normalize_header).collect(),
        Err(_) => return Err(IngestError::NoCsvRows),
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let Ok(row) = row else {
            dropped += 1;
            continue;
        };

        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut raw = RawRecord::default();
        for (slot, cell) in headers.iter().zip(row.iter()) {
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            match slot {
                Header::Canonical(field) => assign_canonical(&mut raw, field, value),
                Header::Extra(column) => raw.attributes.push(Attribute {
                    trait_type: column.clone(),
                    value: value.to_string(),
                }),
            }
        }

        if raw.name.trim().is_empty() {
            dropped += 1;
            continue;
        }

        records.push(raw);
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped invalid csv rows");
    }

    if records.is_empty() {
        return Err(IngestError::NoCsvRows);
    }

    Ok(records)
}

enum Header {
    Canonical(&'static str),
    Extra(String),
}

fn normalize_header(raw: &str) -> Header {
    let candidate = raw.trim().to_lowercase();
    CANONICAL_FIELDS
        .iter()
        .copied()
        .find(|field| *field == candidate)
        .map_or_else(|| Header::Extra(raw.to_string()), Header::Canonical)
}

fn assign_canonical(raw: &mut RawRecord, field: &str, value: &str) {
    let value = value.to_string();
    match field {
        "name" => raw.name = value,
        "description" => raw.description = Some(value),
        "image" => raw.image = Some(value),
        "animation_url" => raw.animation_url = Some(value),
        "external_url" => raw.external_url = Some(value),
        "background_color" => raw.background_color = Some(value),
        "price_amount" => raw.price_amount = Some(value),
        "price_currency" => raw.price_currency = Some(value),
        "supply" => raw.supply = Some(value),
        _ => unreachable!("normalize_header only yields canonical fields"),
    }
}

/// Accept strings and numbers; manifests hand-authored from templates often
/// carry numeric price/supply literals.
fn scalar_field(
    object: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    object.get(key).and_then(scalar_value)
}

fn scalar_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn is_non_negative_decimal(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(|n| n.is_finite() && n >= 0.0)
}

pub(crate) fn is_positive_decimal(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(|n| n.is_finite() && n > 0.0)
}
