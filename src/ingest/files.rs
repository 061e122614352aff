//! Upload classification.
//!
//! A batch drop is a heterogeneous set of files: at most one manifest
//! (CSV or JSON) describing the records, plus loose asset files the
//! manifest refers to. Classification is deterministic and happens before
//! any parsing.

use std::path::Path;

use anyhow::{Context, Result};

/// In-memory handle for one dropped file: name, declared media type, raw
/// bytes. This is the pipeline's only boundary input.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Load a file from disk, inferring the media type from its extension.
    /// Used by the CLI; browser drops declare their own media types.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("invalid file name: {}", path.display()))?
            .to_string();

        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let media_type = media_type_for_name(&name).to_string();
        Ok(Self {
            name,
            media_type,
            bytes,
        })
    }

    fn has_extension(&self, ext: &str) -> bool {
        self.name.to_ascii_lowercase().ends_with(ext)
    }
}

/// Which manifest format a file was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Json,
    Csv,
}

/// Result of classifying a batch drop.
#[derive(Debug, Default)]
pub struct UploadSet {
    /// The single retained manifest, if any.
    pub manifest: Option<(UploadFile, ManifestKind)>,
    pub images: Vec<UploadFile>,
    pub other_assets: Vec<UploadFile>,
}

/// Classify dropped files into manifest, images, and other assets.
///
/// Per-file rule, in priority order: JSON media type or `.json` suffix →
/// JSON manifest; else CSV media type or `.csv` suffix → CSV manifest; else
/// `image/*` media type → image; else other asset. The name suffix wins
/// when the declared media type is ambiguous (generic binary).
///
/// Retention policy when several files classify as manifest: a JSON
/// manifest always outranks a CSV manifest, regardless of drop order;
/// among manifests of the same kind, the last one wins.
pub fn classify(files: Vec<UploadFile>) -> UploadSet {
    let mut set = UploadSet::default();

    for file in files {
        if file.media_type == "application/json" || file.has_extension(".json") {
            set.manifest = Some((file, ManifestKind::Json));
        } else if file.media_type == "text/csv" || file.has_extension(".csv") {
            match set.manifest {
                // JSON outranks CSV.
                Some((_, ManifestKind::Json)) => set.other_assets.push(file),
                _ => set.manifest = Some((file, ManifestKind::Csv)),
            }
        } else if file.media_type.starts_with("image/") {
            set.images.push(file);
        } else {
            set.other_assets.push(file);
        }
    }

    set
}

/// Media type inferred from a file name's extension.
fn media_type_for_name(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    let ext = lower.rsplit('.').next().unwrap_or("");
    match ext {
        "json" => "application/json",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "glb" => "model/gltf-binary",
        _ => "application/octet-stream",
    }
}
