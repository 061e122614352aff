//! End-to-end ingestion tests driving the pipeline from files on disk,
//! the way the CLI does.

use std::fs;
use std::path::Path;

use launchpad::ingest::{
    self, AssetSource, IngestError, UploadFile, NATIVE_TOKEN_ADDRESS,
};
use tempfile::TempDir;

fn load(dir: &Path, names: &[&str]) -> Vec<UploadFile> {
    names
        .iter()
        .map(|name| UploadFile::from_path(&dir.join(name)).unwrap())
        .collect()
}

#[test]
fn test_csv_template_with_positional_images() {
    let dir = TempDir::new().unwrap();
    // The documented template headers, verbatim.
    fs::write(
        dir.path().join("batch.csv"),
        "name,description,image,animation_url,external_url,background_color,price_amount,price_currency,supply\n\
         Alpha,first,,,,#112233,2,,10\n\
         Beta,second,,,,,,,\n",
    )
    .unwrap();
    fs::write(dir.path().join("0.png"), b"png0").unwrap();
    fs::write(dir.path().join("1.png"), b"png1").unwrap();

    let records =
        ingest::ingest(load(dir.path(), &["batch.csv", "0.png", "1.png"])).unwrap();

    assert_eq!(records.len(), 2);

    // No row referenced a filename, so positional pairing applies.
    assert_eq!(
        records[0].image,
        Some(AssetSource::Uploaded("0.png".to_string()))
    );
    assert_eq!(
        records[1].image,
        Some(AssetSource::Uploaded("1.png".to_string()))
    );

    // Row values survive; omitted fields default.
    assert_eq!(records[0].price_amount, "2");
    assert_eq!(records[0].supply, "10");
    assert_eq!(records[0].background_color.as_deref(), Some("#112233"));
    assert_eq!(records[1].price_amount, "1");
    assert_eq!(records[1].supply, "1");
    assert_eq!(records[1].price_currency, NATIVE_TOKEN_ADDRESS);

    // Everything here passes review-time validation.
    for record in &records {
        assert!(ingest::validate_record(record).is_clean());
    }
}

#[test]
fn test_json_manifest_with_explicit_mapping() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("batch.json"),
        r#"[
            {"name": "Mapped", "image": "logo.png"},
            {"name": "Unmapped"}
        ]"#,
    )
    .unwrap();
    fs::write(dir.path().join("logo.png"), b"logo").unwrap();
    fs::write(dir.path().join("spare.png"), b"spare").unwrap();

    let records =
        ingest::ingest(load(dir.path(), &["batch.json", "logo.png", "spare.png"])).unwrap();

    // Explicit mapping anywhere in the batch disables positional fallback:
    // the unmapped record gets nothing rather than spare.png.
    assert_eq!(
        records[0].image,
        Some(AssetSource::Uploaded("logo.png".to_string()))
    );
    assert_eq!(records[1].image, None);
}

#[test]
fn test_only_assets_yields_no_manifest_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.png"), b"png").unwrap();

    let err = ingest::ingest(load(dir.path(), &["photo.png"])).unwrap_err();
    assert!(matches!(err, IngestError::NoManifest));
    assert_eq!(
        err.to_string(),
        "No valid files found. Please upload a manifest file."
    );
}

#[test]
fn test_reingesting_same_files_is_idempotent() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("batch.csv"),
        "name,image,edition\nA,,one\nB,,two\n",
    )
    .unwrap();
    fs::write(dir.path().join("0.png"), b"png0").unwrap();
    fs::write(dir.path().join("1.png"), b"png1").unwrap();

    let names = ["batch.csv", "0.png", "1.png"];
    let first = ingest::ingest(load(dir.path(), &names)).unwrap();
    let second = ingest::ingest(load(dir.path(), &names)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].attributes[0].trait_type, "edition");
}

#[test]
fn test_json_manifest_beats_csv_in_same_drop() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("batch.csv"), "name\nFromCsv\n").unwrap();
    fs::write(
        dir.path().join("batch.json"),
        r#"[{"name": "FromJson"}]"#,
    )
    .unwrap();

    let records =
        ingest::ingest(load(dir.path(), &["batch.csv", "batch.json"])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "FromJson");
}
