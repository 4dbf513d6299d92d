//! Typed input records of a bulk import request.
//!
//! The raw JSON is checked by [`super::validator::validate_structure`] first;
//! these types are deserialized only from payloads that passed it.

use serde::{Deserialize, Deserializer, Serialize};

use super::keys::strip_dataco_prefix;

/// The whole request body: a sequence of parent issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub parent_issues: Vec<ParentIssue>,
}

impl ImportBatch {
    /// Number of subtask rows across all parents.
    pub fn subtask_count(&self) -> usize {
        self.parent_issues.iter().map(|p| p.subtasks.len()).sum()
    }
}

/// One external ticket that must match an existing task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentIssue {
    /// External key, conventionally `DATACO-<number>`.
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub target_car: Option<TargetCars>,
    pub subtasks: Vec<SubtaskRecord>,
}

impl ParentIssue {
    /// The DATACO number the key refers to, prefix stripped.
    pub fn dataco_number(&self) -> &str {
        strip_dataco_prefix(&self.key)
    }

    /// Target vehicles as a sequence (a single id becomes a one-element list).
    pub fn target_cars(&self) -> Vec<String> {
        match &self.target_car {
            Some(TargetCars::One(car)) => vec![car.clone()],
            Some(TargetCars::Many(cars)) => cars.clone(),
            None => Vec::new(),
        }
    }
}

/// `target_car` arrives either as one vehicle id or as a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetCars {
    One(String),
    Many(Vec<String>),
}

/// One subtask row to normalize and persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub dataco_number: String,
    pub summary: String,
    pub issue_type: IssueKind,
    pub amount_needed: f64,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub road_type: Option<String>,
    #[serde(default)]
    pub day_time: Option<DayTimeInput>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl SubtaskRecord {
    /// The row's DATACO number, prefix stripped.
    pub fn normalized_key(&self) -> &str {
        strip_dataco_prefix(&self.dataco_number)
    }
}

/// External JIRA issue type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    Events,
    Hours,
    #[serde(rename = "Sub Task")]
    SubTask,
    Loops,
}

impl IssueKind {
    /// All recognized kinds, in the order they are listed to operators.
    pub const ALL: [IssueKind; 4] = [Self::Events, Self::Hours, Self::SubTask, Self::Loops];

    /// The exact JIRA literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::Hours => "Hours",
            Self::SubTask => "Sub Task",
            Self::Loops => "Loops",
        }
    }

    /// Parse the exact (case-sensitive) JIRA literal.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == label)
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `day_time` arrives as one external token or as an already-internal list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayTimeInput {
    Single(String),
    Sequence(Vec<String>),
}

/// Accept a DATACO number written either as a JSON string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
