use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value of the `status` field on a successful response.
pub const STATUS_SUCCESS: &str = "success";
/// Value of the `status` field on an eligibility refusal that may carry
/// relevant courses.
pub const STATUS_FAILURE: &str = "failure";

/// Student details as returned by `/get_student_info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentInfo {
    #[serde(deserialize_with = "loose_text")]
    pub department: String,
    /// Year of study. The backend sends a number, `"Graduated"` or null.
    #[serde(rename = "student_year", deserialize_with = "loose_text")]
    pub year: String,
    /// Must be text: the label is derived by editing it.
    pub regulation: String,
}

impl StudentInfo {
    /// Regulation as shown to the user, e.g. `R2024` for
    /// `Course Code R2024`.
    pub fn regulation_label(&self) -> String {
        self.regulation.replacen("Course Code ", "", 1)
    }
}

/// Outcome of a student info lookup that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentLookup {
    Found(StudentInfo),
    Rejected { message: String },
}

/// Outcome of an eligibility check that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityResult {
    Eligible {
        message: String,
    },
    NotEligible {
        message: String,
        /// Present only when the backend answered `failure` with a
        /// `relevant_courses` list, which may be empty.
        relevant_courses: Option<Vec<String>>,
    },
}

/// Converts any JSON scalar into the text a template literal would print.
pub(crate) fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_year_accepts_numbers_and_text() {
        let info: StudentInfo = serde_json::from_value(json!({
            "department": "Information Technology",
            "student_year": 3,
            "regulation": "Course Code R2019",
            "status": "success"
        }))
        .unwrap();
        assert_eq!(info.year, "3");
        assert_eq!(info.regulation_label(), "R2019");

        let info: StudentInfo = serde_json::from_value(json!({
            "department": "Computer Science and Engineering",
            "student_year": "Graduated",
            "regulation": "Course Code R2019",
        }))
        .unwrap();
        assert_eq!(info.year, "Graduated");

        let info: StudentInfo = serde_json::from_value(json!({
            "department": "CSE (Cyber Security)",
            "student_year": null,
            "regulation": "Course Code R2024",
        }))
        .unwrap();
        assert_eq!(info.year, "null");
    }

    #[test]
    fn regulation_label_strips_first_prefix_only() {
        let info = StudentInfo {
            department: String::new(),
            year: String::new(),
            regulation: "Course Code Course Code R2024".to_string(),
        };
        assert_eq!(info.regulation_label(), "Course Code R2024");
    }

    #[test]
    fn missing_or_nested_fields_are_rejected() {
        let missing = serde_json::from_value::<StudentInfo>(json!({
            "department": "AIDS",
            "student_year": 2,
        }));
        assert!(missing.is_err());

        let nested = serde_json::from_value::<StudentInfo>(json!({
            "department": {"name": "AIDS"},
            "student_year": 2,
            "regulation": "Course Code R2024",
        }));
        assert!(nested.is_err());
    }

    #[test]
    fn regulation_must_be_text() {
        for regulation in [json!(null), json!(2024)] {
            let result = serde_json::from_value::<StudentInfo>(json!({
                "department": "IT",
                "student_year": 2,
                "regulation": regulation,
            }));
            assert!(result.is_err(), "regulation {regulation} should be rejected");
        }
    }
}
