use std::io::Write;

use heatmap_rs::HeatmapError;
use heatmap_rs::api::{DatasetSource, LoaderConfig, REFERENCE_DATASET_URL, load_dataset};
use heatmap_rs::core::{Dataset, DatasetDocument};

const SAMPLE_JSON: &str = r#"{
  "baseTemperature": 8.66,
  "monthlyVariance": [
    { "year": 1753, "month": 1, "variance": -1.366 },
    { "year": 1753, "month": 2, "variance": -2.223 },
    { "year": 1754, "month": 1, "variance": 0.2 }
  ]
}"#;

fn load_json(raw: &str) -> Result<Dataset, HeatmapError> {
    load_dataset(&DatasetSource::Json(raw.to_owned()), &LoaderConfig::default())
}

#[test]
fn parses_reference_document_shape() {
    let dataset = load_json(SAMPLE_JSON).expect("valid document");

    assert_eq!(dataset.base_temperature(), 8.66);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.year_extent(), (1753, 1754));
    assert_eq!(dataset.first_record().month, 1);
    assert_eq!(dataset.last_record().year, 1754);
}

#[test]
fn month_outside_calendar_is_malformed() {
    let raw = r#"{"baseTemperature": 8.0, "monthlyVariance": [
        {"year": 2000, "month": 1, "variance": 0.1},
        {"year": 2000, "month": 13, "variance": 0.1}
    ]}"#;
    let err = load_json(raw).expect_err("month 13 must fail");
    assert!(matches!(err, HeatmapError::MalformedRecord { index: 1, .. }));
}

#[test]
fn month_zero_is_malformed() {
    let raw = r#"{"baseTemperature": 8.0, "monthlyVariance": [
        {"year": 2000, "month": 0, "variance": 0.1}
    ]}"#;
    let err = load_json(raw).expect_err("month 0 must fail");
    assert!(matches!(err, HeatmapError::MalformedRecord { index: 0, .. }));
}

#[test]
fn duplicate_year_month_is_malformed() {
    let raw = r#"{"baseTemperature": 8.0, "monthlyVariance": [
        {"year": 2000, "month": 5, "variance": 0.1},
        {"year": 2001, "month": 5, "variance": 0.2},
        {"year": 2000, "month": 5, "variance": 0.3}
    ]}"#;
    let err = load_json(raw).expect_err("duplicate must fail");
    assert!(matches!(err, HeatmapError::MalformedRecord { index: 2, .. }));
}

#[test]
fn empty_record_list_is_degenerate() {
    let raw = r#"{"baseTemperature": 8.0, "monthlyVariance": []}"#;
    let err = load_json(raw).expect_err("empty must fail");
    assert!(matches!(err, HeatmapError::DegenerateDataset(_)));
}

#[test]
fn unparsable_json_is_a_load_error() {
    for raw in ["", "not json", r#"{"baseTemperature": 8.0}"#] {
        let err = load_json(raw).expect_err("bad document must fail");
        assert!(matches!(err, HeatmapError::Load(_)), "unexpected error for `{raw}`");
    }
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SAMPLE_JSON.as_bytes()).expect("write json");

    let dataset = load_dataset(
        &DatasetSource::File(file.path().to_path_buf()),
        &LoaderConfig::default(),
    )
    .expect("file load");
    assert_eq!(dataset.len(), 3);
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_dataset(
        &DatasetSource::File(dir.path().join("absent.json")),
        &LoaderConfig::default(),
    )
    .expect_err("missing file must fail");
    assert!(matches!(err, HeatmapError::Load(_)));
}

#[test]
fn document_converts_into_dataset() {
    let document: DatasetDocument = serde_json::from_str(SAMPLE_JSON).expect("document");
    let dataset = Dataset::try_from(document.clone()).expect("dataset");
    assert_eq!(dataset.records(), document.monthly_variance.as_slice());
}

#[test]
fn reference_source_points_at_published_dataset() {
    assert_eq!(
        DatasetSource::reference(),
        DatasetSource::Url(REFERENCE_DATASET_URL.to_owned())
    );
    assert!(LoaderConfig::default().user_agent.starts_with("heatmap-rs/"));
}
