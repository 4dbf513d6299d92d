//! Structural validation of a raw bulk import payload.
//!
//! Runs on the untyped JSON value before anything touches the store. All
//! violations are accumulated so the operator can fix a file in one pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::classification::{amount_is_acceptable, classify_rows};
use super::keys::strip_dataco_prefix;
use super::payload::IssueKind;
use super::vocabulary::{is_compound_road_type, is_unknown_weather};

/// Outcome of [`validate_structure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl StructureValidation {
    fn finish(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Check the shape of a bulk import payload.
///
/// Rules, each reported once per offending item:
///
/// - the top level is an object with a `parent_issues` array (otherwise
///   nothing else is checked);
/// - every parent has a non-empty string `key` and a `subtasks` array;
/// - every subtask has `dataco_number`, `summary`, a recognized
///   `issue_type` and a numeric `amount_needed`;
/// - `amount_needed` is non-negative, and positive unless the parent is
///   calibration-classified or the row is `Loops`.
///
/// A row with an unrecognized `issue_type` reports only that problem.
pub fn validate_structure(payload: &Value) -> StructureValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(parents) = payload.get("parent_issues").and_then(Value::as_array) else {
        errors.push("Payload must be an object with a parent_issues array".to_string());
        return StructureValidation::finish(errors, warnings);
    };

    for (index, parent) in parents.iter().enumerate() {
        validate_parent(index, parent, &mut errors, &mut warnings);
    }

    StructureValidation::finish(errors, warnings)
}

fn validate_parent(index: usize, parent: &Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let key = parent
        .get("key")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|k| !strip_dataco_prefix(k).trim().is_empty());
    let label = match key {
        Some(k) => k.to_string(),
        None => {
            errors.push(format!("Parent issue #{}: key is required", index + 1));
            format!("#{}", index + 1)
        }
    };

    let Some(subtasks) = parent.get("subtasks").and_then(Value::as_array) else {
        errors.push(format!("Parent issue {label}: subtasks must be an array"));
        return;
    };

    let classification = classify_rows(
        subtasks
            .iter()
            .map(|s| (amount_of(s), s.get("issue_type").and_then(Value::as_str))),
    );

    for (row_index, subtask) in subtasks.iter().enumerate() {
        let id = subtask_identifier(row_index, subtask);
        let prefix = format!("Subtask {id} in {label}");

        if dataco_number_of(subtask).is_none() {
            errors.push(format!("{prefix}: dataco_number is required"));
        }
        if !subtask
            .get("summary")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
        {
            errors.push(format!("{prefix}: summary is required"));
        }

        let raw_kind = subtask.get("issue_type");
        let Some(kind) = raw_kind.and_then(Value::as_str).and_then(IssueKind::from_label) else {
            errors.push(format!(
                "{prefix}: invalid issue_type {} (expected one of {})",
                raw_kind.map(Value::to_string).unwrap_or_else(|| "<missing>".into()),
                IssueKind::ALL.map(|k| k.as_str()).join(", ")
            ));
            continue;
        };

        match amount_of(subtask) {
            None => errors.push(format!("{prefix}: amount_needed must be a number")),
            Some(amount) if amount < 0.0 => {
                errors.push(format!("{prefix}: amount_needed must not be negative (got {amount})"))
            }
            Some(amount) if !amount_is_acceptable(amount, kind, classification) => errors.push(
                format!("{prefix}: amount_needed must be greater than 0 (got {amount})"),
            ),
            Some(amount) => {
                if kind == IssueKind::Loops && amount == 0.0 {
                    warnings.push(format!(
                        "{prefix}: Loops subtask has amount_needed 0 (placeholder)"
                    ));
                }
            }
        }

        if let Some(weather) = subtask.get("weather").and_then(Value::as_str) {
            if is_unknown_weather(weather) {
                warnings.push(format!(
                    "{prefix}: weather \"{weather}\" will be imported as Mixed"
                ));
            }
        }
        if let Some(road_type) = subtask.get("road_type").and_then(Value::as_str) {
            if is_compound_road_type(road_type) {
                warnings.push(format!(
                    "{prefix}: compound road_type \"{road_type}\", the first recognized segment will be used"
                ));
            }
        }
    }
}

fn amount_of(subtask: &Value) -> Option<f64> {
    subtask.get("amount_needed").and_then(Value::as_f64)
}

fn dataco_number_of(subtask: &Value) -> Option<String> {
    match subtask.get("dataco_number")? {
        Value::String(s) if !strip_dataco_prefix(s).trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifier used in messages: the DATACO number when present, otherwise
/// the 1-based position.
fn subtask_identifier(row_index: usize, subtask: &Value) -> String {
    dataco_number_of(subtask).unwrap_or_else(|| format!("#{}", row_index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(dataco: &str, issue_type: &str, amount: f64) -> Value {
        json!({
            "dataco_number": dataco,
            "summary": "Highway drive",
            "issue_type": issue_type,
            "amount_needed": amount,
        })
    }

    fn batch(subtasks: Vec<Value>) -> Value {
        json!({ "parent_issues": [{ "key": "DATACO-100", "subtasks": subtasks }] })
    }

    #[test]
    fn valid_payload_passes() {
        let result = validate_structure(&batch(vec![row("1", "Events", 5.0), row("2", "Hours", 1.5)]));
        assert!(result.valid, "errors: {:?}", result.errors);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_parent_issues_stops_validation() {
        for payload in [json!({}), json!([]), json!("text"), json!({ "parent_issues": {} })] {
            let result = validate_structure(&payload);
            assert!(!result.valid);
            assert_eq!(result.errors.len(), 1, "payload: {payload}");
        }
    }

    #[test]
    fn empty_parent_issues_is_valid() {
        assert!(validate_structure(&json!({ "parent_issues": [] })).valid);
    }

    #[test]
    fn parent_key_and_subtasks_are_required() {
        let result = validate_structure(&json!({
            "parent_issues": [{ "key": "", "subtasks": "nope" }]
        }));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("key is required"));
        assert!(result.errors[1].contains("subtasks must be an array"));
    }

    #[test]
    fn bare_prefix_is_not_a_key() {
        let result = validate_structure(&json!({
            "parent_issues": [{
                "key": "DATACO-",
                "subtasks": [row("dataco- ", "Events", 1.0), row("DATACO-7", "Events", 1.0)]
            }]
        }));
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Parent issue #1: key is required",
                "Subtask #1 in #1: dataco_number is required",
            ]
        );
    }

    #[test]
    fn missing_row_fields_are_accumulated() {
        let result = validate_structure(&batch(vec![json!({ "issue_type": "Events", "amount_needed": "5" })]));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3, "errors: {:?}", result.errors);
        assert!(result.errors.iter().any(|e| e.contains("dataco_number is required")));
        assert!(result.errors.iter().any(|e| e.contains("summary is required")));
        assert!(result.errors.iter().any(|e| e.contains("amount_needed must be a number")));
    }

    #[test]
    fn invalid_issue_type_reports_exactly_one_error() {
        let result = validate_structure(&batch(vec![
            row("5678", "Story", 0.0),
            row("5679", "Events", 3.0),
        ]));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1, "errors: {:?}", result.errors);
        assert!(result.errors[0].contains("5678"));
        assert!(result.errors[0].contains("issue_type"));
    }

    #[test]
    fn issue_type_is_case_sensitive() {
        let result = validate_structure(&batch(vec![row("1", "events", 3.0)]));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn zero_amount_is_accepted_on_calibration_parent() {
        let result = validate_structure(&batch(vec![
            row("1", "Events", 0.0),
            row("2", "Sub Task", 0.0),
        ]));
        assert!(result.valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn zero_amount_is_rejected_on_regular_parent() {
        let result = validate_structure(&batch(vec![
            row("1", "Events", 5.0),
            row("2", "Hours", 0.0),
        ]));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Subtask 2"));
        assert!(result.errors[0].contains("greater than 0"));
    }

    #[test]
    fn negative_amount_is_rejected_even_on_loops() {
        let result = validate_structure(&batch(vec![row("1", "Loops", -2.0)]));
        assert!(!result.valid);
        assert!(result.errors[0].contains("must not be negative"));
    }

    #[test]
    fn zero_loops_row_is_valid_with_warning() {
        let result = validate_structure(&batch(vec![
            row("1", "Events", 4.0),
            row("2", "Loops", 0.0),
        ]));
        assert!(result.valid, "errors: {:?}", result.errors);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Loops"));
    }

    #[test]
    fn numeric_dataco_number_is_accepted() {
        let result = validate_structure(&batch(vec![json!({
            "dataco_number": 5678,
            "summary": "s",
            "issue_type": "Hours",
            "amount_needed": 2
        })]));
        assert!(result.valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn unknown_weather_and_compound_road_type_warn() {
        let mut subtask = row("1", "Events", 2.0);
        subtask["weather"] = json!("unknown");
        subtask["road_type"] = json!("Rural/Sub-Urban");
        let result = validate_structure(&batch(vec![subtask]));
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 2, "warnings: {:?}", result.warnings);
        assert!(result.warnings[0].contains("Mixed"));
        assert!(result.warnings[1].contains("Rural/Sub-Urban"));
    }

    #[test]
    fn errors_across_parents_are_accumulated() {
        let result = validate_structure(&json!({
            "parent_issues": [
                { "key": "DATACO-1", "subtasks": [row("1", "Bogus", 1.0)] },
                { "subtasks": [] },
                { "key": "DATACO-3", "subtasks": [row("3", "Hours", 0.0), row("4", "Hours", 2.0)] }
            ]
        }));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3, "errors: {:?}", result.errors);
    }
}
