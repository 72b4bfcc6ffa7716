//! Closed category types for the advisor inputs
//!
//! Every categorical input is a fixed enum. Strings are parsed into these
//! types at the boundary, so a value such as `"Mobile App"` is rejected with
//! [`AdvisorError::UnknownCategoryValue`] before it reaches an encoder.
//! Matching is exact: no trimming, no case folding.

use crate::errors::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident, column = $column:literal,
        { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Dataset column this category fills
            pub const COLUMN: Column = Column::$name;

            /// Human readable label, as shown in the UI and stored in encoders
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = AdvisorError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(AdvisorError::UnknownCategoryValue {
                        feature: $column,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

category! {
    /// Kind of project the recommendation is for
    ProjectType, column = "project_type",
    {
        WebApp => "Web App",
        Api => "API",
        MlApp => "ML App",
        RealTimeApp => "Real-time App",
    }
}

category! {
    /// Performance requirement of the project
    PerfNeed, column = "perf_need",
    {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

category! {
    /// Experience level of the development team
    Experience, column = "experience",
    {
        Beginner => "Beginner",
        Intermediate => "Intermediate",
        Expert => "Expert",
    }
}

/// Categorical dataset columns that carry a label encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ProjectType,
    PerfNeed,
    Experience,
    Stack,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::ProjectType,
        Column::PerfNeed,
        Column::Experience,
        Column::Stack,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::ProjectType => "project_type",
            Column::PerfNeed => "perf_need",
            Column::Experience => "experience",
            Column::Stack => "stack",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
