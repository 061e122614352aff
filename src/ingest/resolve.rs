//! Asset resolution and field defaulting.
//!
//! Manifest authors reference media three ways, without declaring which:
//! explicit filenames of uploaded assets, positional convention (row *i*
//! pairs with the *i*-th uploaded asset), or plain external URLs. Resolution
//! supports all three. Positional fallback is a batch-wide decision: the
//! moment any record filename-matches an uploaded asset for a field, that
//! field is "explicitly mapped" and positional pairing is disabled for the
//! whole batch (mixing the two styles silently would misassign assets).

use std::collections::HashSet;

use super::files::UploadFile;
use super::record::{AssetSource, NormalizedRecord, RawRecord, NATIVE_TOKEN_ADDRESS};

/// Resolve media fields and apply defaults, producing the final records.
/// `image` resolves against the uploaded image list, `animation_url`
/// against the other-asset list, independently.
pub(crate) fn normalize(
    raws: Vec<RawRecord>,
    images: &[UploadFile],
    other_assets: &[UploadFile],
) -> Vec<NormalizedRecord> {
    let image_values: Vec<Option<String>> = raws.iter().map(|r| r.image.clone()).collect();
    let animation_values: Vec<Option<String>> =
        raws.iter().map(|r| r.animation_url.clone()).collect();

    let resolved_images = resolve_field(&image_values, images);
    let resolved_animations = resolve_field(&animation_values, other_assets);

    raws.into_iter()
        .zip(resolved_images)
        .zip(resolved_animations)
        .map(|((raw, image), animation_url)| NormalizedRecord {
            name: raw.name,
            description: raw.description,
            image,
            animation_url,
            external_url: raw.external_url,
            background_color: raw.background_color,
            price_amount: defaulted(raw.price_amount, "1"),
            price_currency: defaulted(raw.price_currency, NATIVE_TOKEN_ADDRESS),
            supply: defaulted(raw.supply, "1"),
            attributes: raw.attributes,
        })
        .collect()
}

/// Resolve one media field across the whole batch.
///
/// Per record `i`: exact filename match wins; otherwise, only when no
/// record in the batch filename-matched this field, the asset at positional
/// index `i`; otherwise the raw value as a literal URL/path; otherwise
/// nothing. The filename set is built once per call.
fn resolve_field(values: &[Option<String>], assets: &[UploadFile]) -> Vec<Option<AssetSource>> {
    let filenames: HashSet<&str> = assets.iter().map(|f| f.name.as_str()).collect();
    let explicitly_mapped = values
        .iter()
        .flatten()
        .any(|value| filenames.contains(value.as_str()));

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if let Some(value) = value {
                if filenames.contains(value.as_str()) {
                    return Some(AssetSource::Uploaded(value.clone()));
                }
            }
            if !explicitly_mapped {
                if let Some(asset) = assets.get(index) {
                    return Some(AssetSource::Uploaded(asset.name.clone()));
                }
            }
            value.as_ref().map(|v| AssetSource::Remote(v.clone()))
        })
        .collect()
}

fn defaulted(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
