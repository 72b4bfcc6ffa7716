//! Stack recommendation over loaded artifacts
//!
//! The predictor holds no mutable state. Artifacts are loaded once at startup
//! and injected as `Arc<Artifacts>`, so clones are cheap and calls can run
//! concurrently.

use crate::artifacts::Artifacts;
use crate::categories::{Experience, PerfNeed, ProjectType};
use crate::errors::{AdvisorError, Result};
use crate::features::{FeatureVector, TEAM_SIZE_RANGE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Typed inputs of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub project_type: ProjectType,
    pub team_size: u32,
    pub perf_need: PerfNeed,
    pub experience: Experience,
}

/// Decoded prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended stack label
    pub stack: String,

    /// Raw class code produced by the model
    pub class_code: u32,

    /// Share of training rows at the reached leaf that carry this label
    pub confidence_pct: u8,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "🔧 Recommended Tech Stack: {}", self.stack)
    }
}

#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
}

impl Predictor {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Recommend a stack for already-typed inputs
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation> {
        if !TEAM_SIZE_RANGE.contains(&request.team_size) {
            return Err(AdvisorError::InvalidTeamSize(request.team_size));
        }

        let Artifacts {
            encoders, model, ..
        } = self.artifacts.as_ref();

        let features = FeatureVector::encode(
            encoders,
            request.project_type,
            request.team_size,
            request.perf_need,
            request.experience,
        )?;
        let row = features.as_row();

        let class_code = model.predict(&row)?;
        let stack = encoders.stack.decode(class_code)?.to_string();
        let confidence_pct = confidence(&model.predict_distribution(&row)?, class_code);

        debug!(?features, class_code, %stack, "prediction");

        Ok(Recommendation {
            stack,
            class_code,
            confidence_pct,
        })
    }

    /// String-typed entry point; labels are parsed before any encoding happens
    pub fn recommend_stack(
        &self,
        project_type: &str,
        team_size: u32,
        perf_need: &str,
        experience: &str,
    ) -> Result<Recommendation> {
        let request = RecommendationRequest {
            project_type: project_type.parse()?,
            team_size,
            perf_need: perf_need.parse()?,
            experience: experience.parse()?,
        };
        self.recommend(&request)
    }
}

fn confidence(distribution: &[u32], class_code: u32) -> u8 {
    let total: u64 = distribution.iter().map(|&c| u64::from(c)).sum();
    let hits = distribution
        .get(class_code as usize)
        .copied()
        .map(u64::from)
        .unwrap_or(0);

    if total == 0 {
        return 0;
    }
    (hits * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Column;
    use crate::encoder::{EncoderSet, LabelEncoder};
    use crate::model::{ClassifierModel, FitParams, ModelMetadata};
    use crate::tree::{Node, Tree};

    // Splits on team size only: <= 4 -> "Flask + SQLite", else "Node.js + Redis"
    fn predictor() -> Predictor {
        let encoders = EncoderSet {
            project_type: LabelEncoder::fit(
                Column::ProjectType,
                ProjectType::ALL.iter().map(|p| p.label()),
            ),
            perf_need: LabelEncoder::fit(Column::PerfNeed, PerfNeed::ALL.iter().map(|p| p.label())),
            experience: LabelEncoder::fit(
                Column::Experience,
                Experience::ALL.iter().map(|e| e.label()),
            ),
            stack: LabelEncoder::fit(Column::Stack, ["Flask + SQLite", "Node.js + Redis"]),
        };
        let tree = Tree::new(vec![
            Node::internal(0, 1, 4, 1, 2),
            Node::leaf(1, 0, vec![3, 1]),
            Node::leaf(2, 1, vec![0, 2]),
        ]);
        let metadata = ModelMetadata {
            created_at: 0,
            training_rows: 6,
            max_depth_reached: 1,
            encoders_hash: encoders.hash_hex().unwrap(),
            params: FitParams::default(),
        };
        let model = ClassifierModel::new(tree, 4, 2, metadata);
        Predictor::new(Arc::new(Artifacts::new(encoders, model).unwrap()))
    }

    #[test]
    fn test_recommend_decodes_label() {
        let rec = predictor()
            .recommend_stack("API", 2, "Low", "Beginner")
            .unwrap();
        assert_eq!(rec.stack, "Flask + SQLite");
        assert_eq!(rec.class_code, 0);
        assert_eq!(rec.confidence_pct, 75);
        assert_eq!(rec.to_string(), "🔧 Recommended Tech Stack: Flask + SQLite");
    }

    #[test]
    fn test_team_size_bounds() {
        let p = predictor();
        assert!(p.recommend_stack("Web App", 1, "High", "Expert").is_ok());
        assert_eq!(
            p.recommend_stack("Web App", 10, "High", "Expert").unwrap().stack,
            "Node.js + Redis"
        );
        assert!(matches!(
            p.recommend_stack("Web App", 0, "High", "Expert"),
            Err(AdvisorError::InvalidTeamSize(0))
        ));
        assert!(matches!(
            p.recommend_stack("Web App", 11, "High", "Expert"),
            Err(AdvisorError::InvalidTeamSize(11))
        ));
    }

    #[test]
    fn test_unknown_inputs_rejected() {
        let p = predictor();
        let err = p.recommend_stack("Mobile App", 3, "Low", "Beginner").unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::UnknownCategoryValue { feature: "project_type", .. }
        ));
        assert!(err.is_user_input());

        let err = p.recommend_stack("API", 3, "Extreme", "Beginner").unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::UnknownCategoryValue { feature: "perf_need", .. }
        ));
    }

    #[test]
    fn test_confidence() {
        assert_eq!(confidence(&[1, 3], 1), 75);
        assert_eq!(confidence(&[0, 0], 0), 0);
        assert_eq!(confidence(&[2], 5), 0);
    }
}
