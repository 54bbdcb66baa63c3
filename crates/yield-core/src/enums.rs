//! KPI types, margin goals, and audit actions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and parse from the same strings through `FromStr`, so CLI arguments, config
//! files, and persisted documents share one vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// KpiOrientation
// ---------------------------------------------------------------------------

/// Which direction of a KPI counts as "better".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KpiOrientation {
    /// Lower is better (cost per unit of outcome).
    Cost,
    /// Higher is better (rate of outcome).
    Quality,
}

// ---------------------------------------------------------------------------
// KpiType
// ---------------------------------------------------------------------------

/// The KPI a campaign is optimized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KpiType {
    /// Cost per action.
    Cpa,
    /// Cost per click.
    Cpc,
    /// Cost per completed view.
    Cpcv,
    /// Click-through rate.
    Ctr,
    /// Video completion rate.
    Vcr,
}

impl KpiType {
    pub const ALL: [Self; 5] = [Self::Cpa, Self::Cpc, Self::Cpcv, Self::Ctr, Self::Vcr];

    #[must_use]
    pub const fn orientation(self) -> KpiOrientation {
        match self {
            Self::Cpa | Self::Cpc | Self::Cpcv => KpiOrientation::Cost,
            Self::Ctr | Self::Vcr => KpiOrientation::Quality,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpa => "cpa",
            Self::Cpc => "cpc",
            Self::Cpcv => "cpcv",
            Self::Ctr => "ctr",
            Self::Vcr => "vcr",
        }
    }
}

impl fmt::Display for KpiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KpiType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kpi| kpi.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown KPI type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// MarginGoal
// ---------------------------------------------------------------------------

/// Portfolio-level margin directive that biases every per-line adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarginGoal {
    Increase,
    Decrease,
}

impl MarginGoal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

impl fmt::Display for MarginGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarginGoal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(CoreError::Validation(format!(
                "unknown margin goal '{other}' (expected increase or decrease)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Action recorded in a campaign's audit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// The campaign document was first stored.
    Created,
    /// A reallocation proposal was applied.
    Optimized,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Optimized => "optimized",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
