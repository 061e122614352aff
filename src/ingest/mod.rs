//! Batch file ingestion.
//!
//! Turns a heterogeneous file drop (one CSV or JSON manifest plus loose
//! asset files) into a validated, normalized record list, or a single
//! descriptive error. The pipeline is pure: ingesting the same file set
//! twice yields structurally identical results.

mod files;
mod manifest;
mod record;
mod resolve;
mod validate;

use thiserror::Error;

pub use files::{classify, ManifestKind, UploadFile, UploadSet};
pub use record::{AssetSource, Attribute, NormalizedRecord, CANONICAL_FIELDS, NATIVE_TOKEN_ADDRESS};
pub use validate::{validate_record, RecordIssues};

/// Terminal ingestion failures. Display strings are user-facing.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No valid files found. Please upload a manifest file.")]
    NoManifest,

    /// The JSON manifest was unparseable or its top level was not an array.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// No CSV row survived parsing and the name requirement.
    #[error("No valid CSV data found")]
    NoCsvRows,

    /// A JSON manifest element failed validation; JSON batches have no
    /// partial success.
    #[error("Invalid record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Ingest a batch drop end to end: classify, parse the manifest, resolve
/// assets, apply defaults.
pub fn ingest(files: Vec<UploadFile>) -> Result<Vec<NormalizedRecord>, IngestError> {
    let set = classify(files);

    let Some((manifest_file, kind)) = set.manifest else {
        return Err(IngestError::NoManifest);
    };

    tracing::debug!(
        manifest = %manifest_file.name,
        images = set.images.len(),
        other_assets = set.other_assets.len(),
        "ingesting batch"
    );

    let raws = match kind {
        ManifestKind::Json => manifest::parse_json(&manifest_file.bytes)?,
        ManifestKind::Csv => manifest::parse_csv(&manifest_file.bytes)?,
    };

    Ok(resolve::normalize(raws, &set.images, &set.other_assets))
}
