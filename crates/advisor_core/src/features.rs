//! Feature vector layout fed to the classifier

use crate::categories::{Experience, PerfNeed, ProjectType};
use crate::encoder::EncoderSet;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Column order of every feature row
pub const FEATURE_COLUMNS: [&str; 4] = ["project_type", "team_size", "perf_need", "experience"];

/// Number of features per row
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Team sizes accepted by the predictor
pub const TEAM_SIZE_RANGE: RangeInclusive<u32> = 1..=10;

/// Encoded inputs in the fixed classifier order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub project_type: u32,
    pub team_size: u32,
    pub perf_need: u32,
    pub experience: u32,
}

impl FeatureVector {
    /// Encode typed inputs through the trained encoders.
    ///
    /// A variant the encoders never saw during training is reported as
    /// `UnknownCategoryValue`.
    pub fn encode(
        encoders: &EncoderSet,
        project_type: ProjectType,
        team_size: u32,
        perf_need: PerfNeed,
        experience: Experience,
    ) -> Result<Self> {
        Ok(Self {
            project_type: encoders.project_type.encode(project_type.label())?,
            team_size,
            perf_need: encoders.perf_need.encode(perf_need.label())?,
            experience: encoders.experience.encode(experience.label())?,
        })
    }

    pub fn as_row(&self) -> [i64; FEATURE_COUNT] {
        [
            self.project_type as i64,
            self.team_size as i64,
            self.perf_need as i64,
            self.experience as i64,
        ]
    }
}
