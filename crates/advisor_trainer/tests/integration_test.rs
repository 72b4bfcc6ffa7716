//! End-to-end tests: train, write artifacts, load them back and predict.

use anyhow::Result;
use stack_advisor_core::{load_artifacts, AdvisorError, Predictor};
use stack_advisor_trainer::{train_from_csv, Dataset, Trainer, TrainingParams};
use std::io::Write;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

fn trained_predictor(dir: &TempDir) -> Result<Predictor> {
    let trained = Trainer::new(TrainingParams::default())?.train(&Dataset::sample())?;
    trained.save(dir.path())?;
    Ok(Predictor::new(Arc::new(load_artifacts(dir.path())?)))
}

#[test]
fn test_reloaded_predictor_reproduces_training_rows() -> Result<()> {
    let dir = TempDir::new()?;
    let predictor = trained_predictor(&dir)?;

    for row in Dataset::sample().rows() {
        let rec = predictor.recommend_stack(
            row.project_type.label(),
            row.team_size,
            row.perf_need.label(),
            row.experience.label(),
        )?;
        assert_eq!(rec.stack, row.stack, "row {row:?}");
        assert_eq!(rec.confidence_pct, 100);
    }
    Ok(())
}

#[test]
fn test_web_app_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let rec = trained_predictor(&dir)?.recommend_stack("Web App", 3, "Medium", "Intermediate")?;
    assert!(rec.to_string().contains("Django + PostgreSQL"));
    Ok(())
}

#[test]
fn test_real_time_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let rec = trained_predictor(&dir)?.recommend_stack("Real-time App", 6, "High", "Expert")?;
    assert!(rec.to_string().contains("Node.js + Redis"));
    Ok(())
}

#[test]
fn test_team_size_slider_bounds() -> Result<()> {
    let dir = TempDir::new()?;
    let predictor = trained_predictor(&dir)?;

    for team_size in [1, 10] {
        let rec = predictor.recommend_stack("API", team_size, "Low", "Beginner")?;
        assert!(!rec.stack.is_empty());
    }
    Ok(())
}

#[test]
fn test_unknown_project_type_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let err = trained_predictor(&dir)?
        .recommend_stack("Mobile App", 3, "Medium", "Intermediate")
        .unwrap_err();

    assert!(matches!(err, AdvisorError::UnknownCategoryValue { .. }));
    Ok(())
}

#[test]
fn test_artifacts_byte_identical_across_runs() -> Result<()> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    for dir in [&first, &second] {
        Trainer::new(TrainingParams::default())?
            .with_created_at(1_700_000_000)
            .train(&Dataset::sample())?
            .save(dir.path())?;
    }

    for file in ["encoders.json", "model.json"] {
        let a = std::fs::read(first.path().join(file))?;
        let b = std::fs::read(second.path().join(file))?;
        assert_eq!(a, b, "{file} differs between runs");
    }
    Ok(())
}

#[test]
fn test_encoders_json_shape() -> Result<()> {
    let dir = TempDir::new()?;
    trained_predictor(&dir)?;

    let raw = std::fs::read_to_string(dir.path().join("encoders.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(
        value["project_type"]["classes"],
        serde_json::json!(["API", "ML App", "Real-time App", "Web App"])
    );
    assert_eq!(value["stack"]["column"], "stack");
    Ok(())
}

#[test]
fn test_train_from_csv() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "project_type,team_size,perf_need,experience,stack")?;
    writeln!(file, "API,2,Low,Beginner,Flask + SQLite")?;
    writeln!(file, "API,8,High,Expert,Go + PostgreSQL")?;
    writeln!(file, "ML App,4,Medium,Intermediate,FastAPI + PyTorch")?;
    file.flush()?;

    let trained = train_from_csv(file.path(), TrainingParams::default())?;
    let predictor = Predictor::new(Arc::new(trained.into_artifacts()?));

    let rec = predictor.recommend_stack("API", 8, "High", "Expert")?;
    assert_eq!(rec.stack, "Go + PostgreSQL");

    // "Web App" is a valid category but was never seen in this dataset
    let err = predictor
        .recommend_stack("Web App", 3, "Low", "Beginner")
        .unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::UnknownCategoryValue { feature: "project_type", .. }
    ));
    Ok(())
}
