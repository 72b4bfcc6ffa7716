//! Labelled dataset loading and encoding
//!
//! Rows carry typed categories, so an unknown label is rejected while the
//! dataset is read, never during training.

use anyhow::{Context, Result};
use stack_advisor_core::{
    Column, EncoderSet, Experience, FeatureVector, LabelEncoder, PerfNeed, ProjectType,
};
use std::path::Path;

/// Expected CSV header, in column order
pub const CSV_HEADER: [&str; 5] = ["project_type", "team_size", "perf_need", "experience", "stack"];

/// One labelled example
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledRow {
    pub project_type: ProjectType,
    pub team_size: u32,
    pub perf_need: PerfNeed,
    pub experience: Experience,
    pub stack: String,
}

impl LabeledRow {
    pub fn new(
        project_type: ProjectType,
        team_size: u32,
        perf_need: PerfNeed,
        experience: Experience,
        stack: &str,
    ) -> Self {
        Self {
            project_type,
            team_size,
            perf_need,
            experience,
            stack: stack.to_string(),
        }
    }
}

/// Integer-encoded dataset ready for tree building
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedDataset {
    pub features: Vec<Vec<i64>>,
    pub targets: Vec<u32>,
    pub n_classes: usize,
}

/// Training dataset of labelled rows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<LabeledRow>,
}

impl Dataset {
    /// The built-in five-row synthetic dataset
    pub fn sample() -> Self {
        use Experience::*;
        use PerfNeed::*;
        use ProjectType::*;

        Self {
            rows: vec![
                LabeledRow::new(WebApp, 3, Medium, Intermediate, "Django + PostgreSQL"),
                LabeledRow::new(Api, 2, Low, Beginner, "Flask + SQLite"),
                LabeledRow::new(MlApp, 5, Medium, Expert, "FastAPI + TensorFlow"),
                LabeledRow::new(RealTimeApp, 6, High, Expert, "Node.js + Redis"),
                LabeledRow::new(WebApp, 1, Low, Beginner, "Django + SQLite"),
            ],
        }
    }

    /// Build a dataset from rows, rejecting empty input and blank labels
    pub fn from_rows(rows: Vec<LabeledRow>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Dataset is empty");
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.team_size == 0 {
                anyhow::bail!("Row {}: team size must be positive", idx + 1);
            }
            if row.stack.trim().is_empty() {
                anyhow::bail!("Row {}: stack label is empty", idx + 1);
            }
        }
        Ok(Self { rows })
    }

    /// Load dataset from CSV file
    /// Expected format: project_type,team_size,perf_need,experience,stack
    /// A header line matching `CSV_HEADER` is optional. Fields may be quoted,
    /// lines starting with `#` are skipped and a leading BOM is ignored.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).context("Failed to read CSV file")?;
        let text = content.strip_prefix('\u{feff}').unwrap_or(content.as_str());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        let mut seen_data = false;

        for record in reader.records() {
            let record = record.context("Malformed CSV record")?;
            let line = record.position().map_or(0, |pos| pos.line());

            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() != CSV_HEADER.len() {
                anyhow::bail!(
                    "Line {}: expected {} columns, got {}",
                    line,
                    CSV_HEADER.len(),
                    record.len()
                );
            }

            if !seen_data && &record[0] == CSV_HEADER[0] {
                if record.iter().ne(CSV_HEADER) {
                    anyhow::bail!("Line {}: header must be {}", line, CSV_HEADER.join(","));
                }
                seen_data = true;
                continue;
            }
            seen_data = true;

            let row = LabeledRow {
                project_type: record[0]
                    .parse()
                    .with_context(|| format!("Line {line}: invalid project_type"))?,
                team_size: record[1]
                    .parse()
                    .with_context(|| format!("Line {line}: invalid team_size"))?,
                perf_need: record[2]
                    .parse()
                    .with_context(|| format!("Line {line}: invalid perf_need"))?,
                experience: record[3]
                    .parse()
                    .with_context(|| format!("Line {line}: invalid experience"))?,
                stack: record[4].to_string(),
            };
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fit one encoder per categorical column from the observed labels
    pub fn fit_encoders(&self) -> EncoderSet {
        EncoderSet {
            project_type: LabelEncoder::fit(
                Column::ProjectType,
                self.rows.iter().map(|r| r.project_type.label()),
            ),
            perf_need: LabelEncoder::fit(
                Column::PerfNeed,
                self.rows.iter().map(|r| r.perf_need.label()),
            ),
            experience: LabelEncoder::fit(
                Column::Experience,
                self.rows.iter().map(|r| r.experience.label()),
            ),
            stack: LabelEncoder::fit(Column::Stack, self.rows.iter().map(|r| r.stack.as_str())),
        }
    }

    /// Encode every row through `encoders`
    pub fn encode(&self, encoders: &EncoderSet) -> stack_advisor_core::Result<EncodedDataset> {
        let mut features = Vec::with_capacity(self.rows.len());
        let mut targets = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let fv = FeatureVector::encode(
                encoders,
                row.project_type,
                row.team_size,
                row.perf_need,
                row.experience,
            )?;
            features.push(fv.as_row().to_vec());
            targets.push(encoders.stack.encode(&row.stack)?);
        }

        Ok(EncodedDataset {
            features,
            targets,
            n_classes: encoders.stack.len(),
        })
    }

    /// Per-feature (min, max) of the encoded rows, for logging
    pub fn feature_stats(encoded: &EncodedDataset) -> Vec<(i64, i64)> {
        let width = encoded.features.first().map_or(0, Vec::len);
        let mut stats = vec![(i64::MAX, i64::MIN); width];

        for row in &encoded.features {
            for (i, &val) in row.iter().enumerate() {
                stats[i].0 = stats[i].0.min(val);
                stats[i].1 = stats[i].1.max(val);
            }
        }

        stats
    }
}
