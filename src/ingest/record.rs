//! Record shapes produced by the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// Placeholder address for a chain's native currency (rather than a token
/// contract). Used as the default `price_currency`.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// The nine canonical manifest field names, as they appear in the template
/// headers users download. CSV header normalization only applies to these;
/// anything else is a free-form attribute column.
pub const CANONICAL_FIELDS: [&str; 9] = [
    "name",
    "description",
    "image",
    "animation_url",
    "external_url",
    "background_color",
    "price_amount",
    "price_currency",
    "supply",
];

/// Where a media field resolved from: an uploaded file in the same batch,
/// or a literal URL/path taken verbatim from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    /// Filename of an asset uploaded alongside the manifest.
    Uploaded(String),
    /// The manifest value itself, treated as an external URL or path.
    Remote(String),
}

/// One trait pair attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// One manifest row/element in canonical shape, with assets resolved and
/// defaults applied. Field names serialize to the canonical manifest names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<AssetSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<AssetSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Decimal string; defaults to "1".
    pub price_amount: String,
    /// Chain address string; defaults to the native-token sentinel.
    pub price_currency: String,
    /// Decimal string; defaults to "1".
    pub supply: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

/// A manifest row/element as parsed, before asset resolution and
/// defaulting. Media fields are still raw strings at this stage.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRecord {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub animation_url: Option<String>,
    pub external_url: Option<String>,
    pub background_color: Option<String>,
    pub price_amount: Option<String>,
    pub price_currency: Option<String>,
    pub supply: Option<String>,
    pub attributes: Vec<Attribute>,
}
