//! # Domain Types
//!
//! The fixed universes of build options and capabilities a generated business
//! application can be configured with, the request sent to the generation service,
//! and the `wizard.done` reason.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build option of the generated project.
///
/// Variant order is the canonical submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectOption {
    Kjar,
    Model,
    Service,
}

impl ProjectOption {
    pub const ALL: [ProjectOption; 3] = [
        ProjectOption::Kjar,
        ProjectOption::Model,
        ProjectOption::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectOption::Kjar => "kjar",
            ProjectOption::Model => "model",
            ProjectOption::Service => "service",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kjar" => Some(ProjectOption::Kjar),
            "model" => Some(ProjectOption::Model),
            "service" => Some(ProjectOption::Service),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature capability of the generated project.
///
/// Variant order is the canonical submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Bpm,
    Brm,
    Planner,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::Bpm, Capability::Brm, Capability::Planner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Bpm => "bpm",
            Capability::Brm => "brm",
            Capability::Planner => "planner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bpm" => Some(Capability::Bpm),
            "brm" => Some(Capability::Brm),
            "planner" => Some(Capability::Planner),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const QUICK_DEFAULT_NAME: &str = "business-application";
pub const QUICK_DEFAULT_VERSION: &str = "7.10.0-SNAPSHOT";

/// Body of a generation request.
///
/// Built once when the terminal step is entered and never mutated afterwards;
/// a retry builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub name: String,
    pub version: String,
    pub options: Vec<String>,
    pub capabilities: Vec<String>,
}

impl SubmissionRequest {
    /// The preconfigured application offered by quick generate.
    pub fn quick_default() -> Self {
        Self {
            name: QUICK_DEFAULT_NAME.to_string(),
            version: QUICK_DEFAULT_VERSION.to_string(),
            options: ProjectOption::ALL.iter().map(|o| o.as_str().to_string()).collect(),
            capabilities: vec![Capability::Bpm.as_str().to_string()],
        }
    }

    /// File name the generated archive is delivered under.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.name)
    }
}

/// Reason carried by the `wizard.done` host signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneReason {
    Cancel,
    Done,
}

impl DoneReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoneReason::Cancel => "cancel",
            DoneReason::Done => "done",
        }
    }
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
