use serde::Serialize;

/// Body of `POST /get_student_info`
#[derive(Debug, Clone, Serialize)]
pub struct StudentInfoParams<'a> {
    pub register_number: &'a str,
}

/// Body of `POST /check_eligibility`. The course title may be partial.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityParams<'a> {
    pub register_number: &'a str,
    pub course_title: &'a str,
}

/// Body of `POST /get_course_suggestions`
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionParams<'a> {
    pub register_number: &'a str,
    pub partial_course_title: &'a str,
}
