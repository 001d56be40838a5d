//! Integration tests for bizpilot-core
//!
//! These tests exercise the full generate → derive → train → persist → load →
//! predict workflow against a real artifact on disk.

use bizpilot_core::{
    derive, generate,
    import::{read_csv, write_csv},
    AppConfig, Dataset, Error, ForestParams, ModelStore, ScenarioInput, ScenarioModel,
    ScenarioPipeline,
};
use tempfile::TempDir;

fn pipeline_in(dir: &TempDir) -> ScenarioPipeline {
    ScenarioPipeline::new(
        ModelStore::new(dir.path().join("scenario_model.json.gz")),
        ForestParams::default(),
    )
}

// =============================================================================
// Pipeline Contract
// =============================================================================

#[test]
fn test_predict_before_train_fails_with_model_not_found() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);

    let err = pipeline
        .predict(ScenarioInput::new(30000.0, 15000.0, 6))
        .unwrap_err();
    assert!(matches!(err, Error::ModelNotFound(_)));
}

#[test]
fn test_train_on_empty_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);

    let err = pipeline.train(&Dataset::default()).unwrap_err();
    assert!(matches!(err, Error::InsufficientData(_)));
}

#[test]
fn test_full_scenario_workflow() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);

    let dataset = generate();
    assert_eq!(dataset.len(), 12);

    let summary = pipeline.train(&dataset).expect("training should succeed");
    assert_eq!(summary.samples, 12);
    assert_eq!(summary.n_trees, 100);
    assert_eq!(summary.seed, 42);

    let derived = derive(&dataset).unwrap();
    let profits: Vec<f64> = derived.iter().filter_map(|r| r.profit).collect();
    let lo = profits.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = profits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Predicting on a training record lands near its true profit
    for record in &derived {
        let input = ScenarioInput::new(
            record.revenue,
            record.expenses,
            i64::from(record.month.unwrap()),
        );
        let predicted = pipeline.predict(input).unwrap();
        let actual = record.profit.unwrap();
        assert!(
            (predicted - actual).abs() <= 0.5 * (hi - lo),
            "predicted {} for actual {}",
            predicted,
            actual
        );
    }
}

#[test]
fn test_training_is_reproducible_across_pipelines() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let a = pipeline_in(&dir_a);
    let b = pipeline_in(&dir_b);

    a.train(&generate()).unwrap();
    b.train(&generate()).unwrap();

    let input = ScenarioInput::new(27500.0, 12500.0, 4);
    let pa = a.predict(input).unwrap();
    let pb = b.predict(input).unwrap();
    assert!((pa - pb).abs() < 1e-6);
}

#[test]
fn test_out_of_range_inputs_are_accepted() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);
    pipeline.train(&generate()).unwrap();

    let profit = pipeline
        .predict(ScenarioInput::new(-1000.0, 1e7, 42))
        .unwrap();
    assert!(profit.is_finite());
}

#[test]
fn test_retrain_overwrites_artifact() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);
    pipeline.train(&generate()).unwrap();

    let first_half = Dataset::new(generate().into_records()[..6].to_vec());
    pipeline.train(&first_half).unwrap();

    let info = pipeline.model_info().unwrap();
    assert_eq!(info.samples, 6);

    let model: ScenarioModel = pipeline.store().load().unwrap();
    assert_eq!(model.samples(), 6);
}

#[test]
fn test_corrupt_artifact_reported() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);
    std::fs::write(pipeline.store().path(), b"\x1f\x8bgarbage").unwrap();

    let err = pipeline
        .predict(ScenarioInput::new(1.0, 1.0, 1))
        .unwrap_err();
    assert!(matches!(err, Error::CorruptArtifact(_)));
}

// =============================================================================
// Data Ingestion
// =============================================================================

#[test]
fn test_train_from_exported_csv() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);

    let mut csv = Vec::new();
    write_csv(&derive(&generate()).unwrap(), &mut csv).unwrap();
    let dataset = read_csv(csv.as_slice()).unwrap();
    assert_eq!(dataset.len(), 12);

    let summary = pipeline.train(&dataset).unwrap();
    assert_eq!(summary.samples, 12);
}

#[test]
fn test_schema_error_blocks_training() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir);

    let csv = "date,revenue,expenses\n2022-01-31,1000,\n";
    let err = read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
    assert!(!pipeline.store().exists());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_drives_pipeline() {
    let dir = TempDir::new().unwrap();
    let artifact = dir.path().join("custom").join("model.json.gz");
    let config_path = dir.path().join("bizpilot.toml");
    std::fs::write(
        &config_path,
        format!(
            "[scenario]\nn_trees = 15\nartifact_path = {:?}\n",
            artifact.display().to_string()
        ),
    )
    .unwrap();

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let pipeline = config.scenario.pipeline();

    let summary = pipeline
        .train(&bizpilot_core::generate_with(&config.generator))
        .unwrap();
    assert_eq!(summary.n_trees, 15);
    assert!(artifact.exists());

    let report = config
        .compliance
        .check_default("Data privacy, Cybersecurity")
        .unwrap();
    assert_eq!(report.missing, vec!["Software licensing".to_string()]);
    assert!(config.workflow.suggestion().needs_optimization);
}
