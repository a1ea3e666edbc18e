//! Response validation and status translation for the homework-status API.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::{domain::HomeworkStatus, errors::SchemaError, Result};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

const API_KEYS: [&str; 2] = [CURRENT_DATE_KEY, HOMEWORKS_KEY];

/// Separator between per-homework lines in one report.
pub const REPORT_SEPARATOR: &str = "\n\n";

/// Check the raw API answer and return its `homeworks` list (possibly empty).
///
/// The key set must match exactly: a missing key and an undocumented one are
/// both contract violations. Records themselves are not inspected here.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(object) = response.as_object() else {
        return Err(SchemaError::NotAnObject.into());
    };

    let expected: BTreeSet<&str> = API_KEYS.into_iter().collect();
    let actual: BTreeSet<&str> = object.keys().map(String::as_str).collect();

    let missing: Vec<String> = expected.difference(&actual).map(|k| k.to_string()).collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingKeys(missing).into());
    }

    let unexpected: Vec<String> = actual.difference(&expected).map(|k| k.to_string()).collect();
    if !unexpected.is_empty() {
        return Err(SchemaError::UnexpectedKeys(unexpected).into());
    }

    match object.get(HOMEWORKS_KEY) {
        Some(Value::Array(homeworks)) => Ok(homeworks.as_slice()),
        _ => Err(SchemaError::HomeworksNotAList.into()),
    }
}

/// Turn one homework record into the chat line announcing its new status.
pub fn parse_status(homework: &Value) -> Result<String> {
    let name = homework
        .get("homework_name")
        .map(value_as_text)
        .unwrap_or_default();
    let status = homework
        .get("status")
        .map(value_as_text)
        .unwrap_or_else(|| "None".to_string());

    let verdict = status.parse::<HomeworkStatus>()?.verdict();

    Ok(format!("Changed status for \"{name}\": {verdict}"))
}

/// Build the message for one poll: `Ok(None)` when nothing changed.
pub fn compose_report(homeworks: &[Value]) -> Result<Option<String>> {
    if homeworks.is_empty() {
        return Ok(None);
    }

    let lines = homeworks
        .iter()
        .map(parse_status)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(lines.join(REPORT_SEPARATOR)))
}

/// Validate a raw answer and build its report in one step.
pub fn report_from_response(response: &Value) -> Result<Option<String>> {
    compose_report(check_response(response)?)
}

fn value_as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Error;

    fn schema_err(v: Value) -> SchemaError {
        match check_response(&v) {
            Err(Error::Schema(e)) => e,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_exact_shape() {
        let v = json!({"homeworks": [{"homework_name": "a", "status": "approved"}], "current_date": 1});
        assert_eq!(check_response(&v).unwrap().len(), 1);

        let empty = json!({"homeworks": [], "current_date": 1690000000});
        assert!(check_response(&empty).unwrap().is_empty());
    }

    #[test]
    fn lists_exactly_the_missing_keys() {
        assert_eq!(
            schema_err(json!({"current_date": 1})),
            SchemaError::MissingKeys(vec!["homeworks".into()])
        );
        assert_eq!(
            schema_err(json!({"homeworks": []})),
            SchemaError::MissingKeys(vec!["current_date".into()])
        );
        assert_eq!(
            schema_err(json!({})),
            SchemaError::MissingKeys(vec!["current_date".into(), "homeworks".into()])
        );
    }

    #[test]
    fn lists_exactly_the_unexpected_keys() {
        let v = json!({"homeworks": [], "current_date": 1, "code": "x", "extra": 2});
        assert_eq!(
            schema_err(v),
            SchemaError::UnexpectedKeys(vec!["code".into(), "extra".into()])
        );
    }

    #[test]
    fn missing_keys_take_precedence_over_unexpected() {
        let v = json!({"homeworks": [], "error": "x"});
        assert_eq!(
            schema_err(v),
            SchemaError::MissingKeys(vec!["current_date".into()])
        );
    }

    #[test]
    fn non_object_and_non_list_are_type_errors() {
        let e = schema_err(json!([{"homeworks": []}]));
        assert_eq!(e, SchemaError::NotAnObject);

        let e = schema_err(json!({"homeworks": {"a": 1}, "current_date": 1}));
        assert_eq!(e, SchemaError::HomeworksNotAList);
    }

    #[test]
    fn describes_every_known_status() {
        for status in HomeworkStatus::ALL {
            let hw = json!({"homework_name": "proj1", "status": status.as_str()});
            let line = parse_status(&hw).unwrap();
            assert!(line.contains("proj1"));
            assert!(line.contains(status.verdict()));
        }
    }

    #[test]
    fn exact_line_format() {
        let hw = json!({"homework_name": "user__hw05.zip", "status": "reviewing"});
        assert_eq!(
            parse_status(&hw).unwrap(),
            "Changed status for \"user__hw05.zip\": The work has been taken for review."
        );
    }

    #[test]
    fn unknown_or_missing_status_fails() {
        let err = parse_status(&json!({"homework_name": "a", "status": "archived"})).unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(s) if s == "archived"));

        let err = parse_status(&json!({"homework_name": "a"})).unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(s) if s == "None"));
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let line = parse_status(&json!({"status": "rejected"})).unwrap();
        assert!(line.starts_with("Changed status for \"\":"));
    }

    #[test]
    fn report_joins_with_blank_line() {
        let v = json!({
            "homeworks": [
                {"homework_name": "a", "status": "approved"},
                {"homework_name": "b", "status": "rejected"}
            ],
            "current_date": 1
        });
        let report = report_from_response(&v).unwrap().unwrap();
        let parts: Vec<&str> = report.split(REPORT_SEPARATOR).collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains("\"a\""));
        assert!(parts[1].contains("\"b\""));
    }

    #[test]
    fn empty_list_yields_no_report() {
        let v = json!({"homeworks": [], "current_date": 1690000000});
        assert_eq!(report_from_response(&v).unwrap(), None);
    }

    #[test]
    fn one_bad_record_fails_the_whole_report() {
        let v = json!({
            "homeworks": [
                {"homework_name": "a", "status": "approved"},
                {"homework_name": "b", "status": "archived"}
            ],
            "current_date": 1
        });
        assert!(matches!(
            report_from_response(&v),
            Err(Error::UnknownStatus(_))
        ));
    }
}
