use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A step of the lead workflow. Declaration order is the workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Loading potential prospects from sources
    Surveying,
    /// Reviewing prospects and scoring their potential
    Prospecting,
    /// Augmenting prospects with extracted information
    Mining,
    /// Finalizing prospects for contact and export
    Collecting,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Surveying,
        Stage::Prospecting,
        Stage::Mining,
        Stage::Collecting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Surveying => "surveying",
            Stage::Prospecting => "prospecting",
            Stage::Mining => "mining",
            Stage::Collecting => "collecting",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown stage: {s}"))
    }
}

/// Which stage chain is active for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowVariant {
    Three,
    #[default]
    Four,
}

const THREE_STAGES: [Stage; 3] = [Stage::Prospecting, Stage::Mining, Stage::Collecting];

impl WorkflowVariant {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            WorkflowVariant::Three => &THREE_STAGES,
            WorkflowVariant::Four => &Stage::ALL,
        }
    }
}

impl fmt::Display for WorkflowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowVariant::Three => f.write_str("three"),
            WorkflowVariant::Four => f.write_str("four"),
        }
    }
}

impl FromStr for WorkflowVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three" | "3" => Ok(WorkflowVariant::Three),
            "four" | "4" => Ok(WorkflowVariant::Four),
            other => Err(format!("unknown workflow variant: {other}")),
        }
    }
}
