//! Backend exchanges with their `status` dispatch.
//!
//! `Err` from these functions always means the exchange failed (unreachable
//! backend, a body that is not JSON, or a success body missing its fields).
//! A backend refusal is an `Ok` outcome carrying the backend's message.

use serde_json::Value;

use crate::{
    error::{ErrorKind, Result},
    interface::RequestApi,
    model::{
        dtos::{EligibilityParams, StudentInfoParams, SuggestionParams},
        structs::{EligibilityResult, StudentInfo, StudentLookup, STATUS_FAILURE, STATUS_SUCCESS},
    },
    suggestions::unique_in_order,
};

pub async fn fetch_student_info<C: RequestApi>(
    client: &C,
    register_number: &str,
) -> Result<StudentLookup> {
    let resp = client
        .get_student_info(StudentInfoParams { register_number })
        .await?;
    parse_student_info(resp)
}

pub async fn check_eligibility<C: RequestApi>(
    client: &C,
    register_number: &str,
    course_title: &str,
) -> Result<EligibilityResult> {
    let resp = client
        .check_eligibility(EligibilityParams {
            register_number,
            course_title,
        })
        .await?;
    parse_eligibility(resp)
}

/// `None` when the backend did not answer `success`; such answers are not
/// shown to the user.
pub async fn fetch_course_suggestions<C: RequestApi>(
    client: &C,
    register_number: &str,
    partial_course_title: &str,
) -> Result<Option<Vec<String>>> {
    let resp = client
        .get_course_suggestions(SuggestionParams {
            register_number,
            partial_course_title,
        })
        .await?;
    parse_suggestions(resp)
}

pub fn parse_student_info(resp: Value) -> Result<StudentLookup> {
    if is_success(&resp) {
        let info: StudentInfo = serde_json::from_value(resp)?;
        log::debug!("student info: {info:?}");
        Ok(StudentLookup::Found(info))
    } else {
        let message = message_of(&resp);
        log::debug!("student info refused: {message}");
        Ok(StudentLookup::Rejected { message })
    }
}

pub fn parse_eligibility(resp: Value) -> Result<EligibilityResult> {
    let message = message_of(&resp);

    if is_success(&resp) {
        return Ok(EligibilityResult::Eligible { message });
    }

    let relevant_courses = if resp["status"] == STATUS_FAILURE && is_truthy(&resp["relevant_courses"])
    {
        Some(text_list(&resp["relevant_courses"], "relevant_courses")?)
    } else {
        None
    };

    Ok(EligibilityResult::NotEligible {
        message,
        relevant_courses,
    })
}

pub fn parse_suggestions(resp: Value) -> Result<Option<Vec<String>>> {
    if !is_success(&resp) {
        log::debug!("suggestions refused: {}", message_of(&resp));
        return Ok(None);
    }

    let suggestions = match &resp["suggestions"] {
        Value::Null => Vec::new(),
        list => text_list(list, "suggestions")?,
    };
    Ok(Some(unique_in_order(suggestions)))
}

fn is_success(resp: &Value) -> bool {
    resp["status"] == STATUS_SUCCESS
}

/// The refusal text. A reply without `message` yields an empty string,
/// both in the message area and in the student panel, where a template
/// literal would have printed `undefined`.
fn message_of(resp: &Value) -> String {
    match &resp["message"] {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// JavaScript truthiness; an empty array counts as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_list(value: &Value, field: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ErrorKind::ParseError(format!("`{field}` is not a list")))?;

    items
        .iter()
        .map(|item| -> Result<String> {
            match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(_) | Value::Bool(_) | Value::Null => Ok(item.to_string()),
                _ => Err(ErrorKind::ParseError(format!("`{field}` holds a non-text item")).into()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_info_success() {
        let lookup = parse_student_info(json!({
            "department": "Information Technology",
            "student_year": 2,
            "regulation": "Course Code R2024",
            "status": "success"
        }))
        .unwrap();

        let StudentLookup::Found(info) = lookup else {
            panic!("expected student info");
        };
        assert_eq!(info.department, "Information Technology");
        assert_eq!(info.year, "2");
        assert_eq!(info.regulation_label(), "R2024");
    }

    #[test]
    fn student_info_refusal_carries_message() {
        let lookup =
            parse_student_info(json!({"message": "Invalid Department Code", "status": "failure"}))
                .unwrap();
        assert_eq!(
            lookup,
            StudentLookup::Rejected {
                message: "Invalid Department Code".to_string()
            }
        );

        // server-side exceptions use a third status value
        let lookup = parse_student_info(json!({"message": "Error occurred: boom", "status": "error"}))
            .unwrap();
        assert!(matches!(lookup, StudentLookup::Rejected { .. }));
    }

    #[test]
    fn refusal_without_message_is_empty_text() {
        let lookup = parse_student_info(json!({"status": "failure"})).unwrap();
        assert_eq!(
            lookup,
            StudentLookup::Rejected {
                message: String::new()
            }
        );
    }

    #[test]
    fn student_info_success_without_fields_is_an_error() {
        let err = parse_student_info(json!({"status": "success"})).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SerdeJsonError(_)));
    }

    #[test]
    fn eligibility_success() {
        let result =
            parse_eligibility(json!({"message": "Course is eligible", "status": "success"}))
                .unwrap();
        assert_eq!(
            result,
            EligibilityResult::Eligible {
                message: "Course is eligible".to_string()
            }
        );
    }

    #[test]
    fn eligibility_failure_with_relevant_courses() {
        let result = parse_eligibility(json!({
            "status": "failure",
            "message": "Not eligible",
            "relevant_courses": ["Course A", "Course B"]
        }))
        .unwrap();
        assert_eq!(
            result,
            EligibilityResult::NotEligible {
                message: "Not eligible".to_string(),
                relevant_courses: Some(vec!["Course A".to_string(), "Course B".to_string()]),
            }
        );
    }

    #[test]
    fn eligibility_empty_relevant_list_is_still_a_list() {
        let result = parse_eligibility(json!({
            "status": "failure",
            "message": "Not eligible",
            "relevant_courses": []
        }))
        .unwrap();
        assert!(matches!(
            result,
            EligibilityResult::NotEligible { relevant_courses: Some(ref c), .. } if c.is_empty()
        ));
    }

    #[test]
    fn relevant_courses_only_count_on_failure_status() {
        let result = parse_eligibility(json!({
            "status": "error",
            "message": "Error occurred",
            "relevant_courses": ["Course A"]
        }))
        .unwrap();
        assert!(matches!(
            result,
            EligibilityResult::NotEligible { relevant_courses: None, .. }
        ));

        let result = parse_eligibility(json!({
            "status": "failure",
            "message": "Course title is required",
            "relevant_courses": null
        }))
        .unwrap();
        assert!(matches!(
            result,
            EligibilityResult::NotEligible { relevant_courses: None, .. }
        ));
    }

    #[test]
    fn malformed_relevant_courses_is_an_error() {
        let err = parse_eligibility(json!({
            "status": "failure",
            "message": "Not eligible",
            "relevant_courses": {"a": 1}
        }))
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ParseError(_)));
    }

    #[test]
    fn suggestions_are_deduplicated_in_order() {
        let suggestions = parse_suggestions(json!({
            "status": "success",
            "suggestions": ["Algebra", "Algebra", "Calculus"]
        }))
        .unwrap();
        assert_eq!(
            suggestions,
            Some(vec!["Algebra".to_string(), "Calculus".to_string()])
        );
    }

    #[test]
    fn suggestion_refusals_are_ignored() {
        let suggestions =
            parse_suggestions(json!({"status": "failure", "message": "Course title is required"}))
                .unwrap();
        assert_eq!(suggestions, None);
    }

    #[test]
    fn missing_suggestion_list_is_empty() {
        assert_eq!(
            parse_suggestions(json!({"status": "success"})).unwrap(),
            Some(Vec::new())
        );
    }
}
