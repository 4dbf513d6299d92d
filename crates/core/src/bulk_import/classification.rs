//! Calibration classification of parent issues and the rules it drives.
//!
//! A parent is a calibration batch when every one of its rows is either a
//! zero-amount non-Loops row or a `Sub Task` row. The classification relaxes
//! amount validation, forces the `events` type and adds calibration labels.
//! It depends on all sibling rows, so it is computed once per parent and
//! handed to the per-row code as a [`Classification`].

use super::payload::{IssueKind, ParentIssue};

// ── Labels ───────────────────────────────────────────────────────────

pub const LABEL_CALIBRATION: &str = "calibration";
pub const LABEL_STABILITY: &str = "stability";

/// Summary substrings (matched case-insensitively) and the approval label
/// each one implies. Only the first match is applied.
pub const APPROVAL_LABELS: &[(&str, &str)] = &[
    ("setup approval", "setup-approval"),
    ("calibration approval", "calibration-approval"),
    ("di validations", "di-validation"),
    ("gt approval", "gt-approval"),
    ("c2l approval", "c2l-approval"),
];

// ── Classification ───────────────────────────────────────────────────

/// Memoized classification of one parent issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Regular,
    Calibration,
}

impl Classification {
    pub fn is_calibration(&self) -> bool {
        matches!(self, Self::Calibration)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Calibration => "calibration",
        }
    }
}

impl From<bool> for Classification {
    fn from(calibration: bool) -> Self {
        if calibration {
            Self::Calibration
        } else {
            Self::Regular
        }
    }
}

/// Whether a single row qualifies as a calibration row.
///
/// Works on raw values so the structural validator can apply it before the
/// payload is known to be well-typed: a missing amount never counts as zero.
pub fn is_calibration_row(amount_needed: Option<f64>, issue_type: Option<&str>) -> bool {
    let sub_task = issue_type == Some(IssueKind::SubTask.as_str());
    let loops = issue_type == Some(IssueKind::Loops.as_str());
    (amount_needed == Some(0.0) && !loops) || sub_task
}

/// Classify a parent from its rows' `(amount_needed, issue_type)` pairs.
///
/// A parent without rows is vacuously calibration-classified.
pub fn classify_rows<'a, I>(rows: I) -> Classification
where
    I: IntoIterator<Item = (Option<f64>, Option<&'a str>)>,
{
    rows.into_iter()
        .all(|(amount, issue_type)| is_calibration_row(amount, issue_type))
        .into()
}

/// Classify a typed parent issue.
pub fn classify_parent(parent: &ParentIssue) -> Classification {
    classify_rows(
        parent
            .subtasks
            .iter()
            .map(|s| (Some(s.amount_needed), Some(s.issue_type.as_str()))),
    )
}

// ── Rules driven by the classification ───────────────────────────────

/// Whether an amount is acceptable for a row.
///
/// Amounts are never negative. Zero is allowed only on calibration parents
/// and on `Loops` rows.
pub fn amount_is_acceptable(amount: f64, kind: IssueKind, classification: Classification) -> bool {
    if amount.is_nan() || amount < 0.0 {
        return false;
    }
    amount > 0.0 || classification.is_calibration() || kind == IssueKind::Loops
}

/// The first approval label implied by a subtask summary, if any.
pub fn approval_label(summary: &str) -> Option<&'static str> {
    let summary = summary.to_lowercase();
    APPROVAL_LABELS
        .iter()
        .find(|(needle, _)| summary.contains(needle))
        .map(|(_, label)| *label)
}

/// Build the label set persisted for a row.
///
/// Regular rows keep their labels as given. Calibration rows additionally
/// get `calibration`, `stability` and the approval label derived from the
/// summary, without introducing duplicates.
pub fn augment_labels(
    existing: Option<&[String]>,
    summary: &str,
    classification: Classification,
) -> Vec<String> {
    let mut labels: Vec<String> = existing.map(<[String]>::to_vec).unwrap_or_default();
    if !classification.is_calibration() {
        return labels;
    }

    let mut push_unique = |label: &str| {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    };
    push_unique(LABEL_CALIBRATION);
    push_unique(LABEL_STABILITY);
    if let Some(label) = approval_label(summary) {
        push_unique(label);
    }
    labels
}
