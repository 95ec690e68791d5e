//! Plain-data view state and the seam to whatever draws it.

use std::fmt;

use crate::model::structs::StudentInfo;
use crate::suggestions::SuggestionList;

/// Validity styling of the register number field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl FieldState {
    /// CSS class applied to the input element, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            FieldState::Neutral => None,
            FieldState::Valid => Some("valid"),
            FieldState::Invalid => Some("invalid"),
        }
    }
}

/// Colour coding of the message area: red for bad input or a backend
/// refusal, orange when the backend could not be reached, green on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Success,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Error => "red",
            Tone::Warning => "orange",
            Tone::Success => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Bold prefix, e.g. `Eligibility Status:`
    pub label: Option<&'static str>,
    pub text: String,
    pub tone: Tone,
}

impl Message {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: None,
            text: text.into(),
            tone,
        }
    }

    pub fn labelled(label: &'static str, text: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: Some(label),
            text: text.into(),
            tone,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{label} {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StudentPanel {
    #[default]
    Hidden,
    Info(StudentInfo),
    /// Backend refusal, shown in red inside the panel. Empty when the
    /// backend sent no message.
    Rejected(String),
}

/// Courses offered instead of an ineligible one. Always shown in orange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevantCourses {
    pub message: String,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub register_number: String,
    pub register_field: FieldState,
    pub course_title: String,
    pub message: Option<Message>,
    pub loading: bool,
    pub student_panel: StudentPanel,
    pub relevant_courses: Option<RelevantCourses>,
    pub suggestions: SuggestionList,
}

/// Draws a [`ViewState`]. Called after every change.
pub trait ViewSink {
    fn render(&self, state: &ViewState);
}

impl<F: Fn(&ViewState)> ViewSink for F {
    fn render(&self, state: &ViewState) {
        self(state)
    }
}

/// Lines describing the student panel, as displayed.
pub fn student_lines(info: &StudentInfo) -> [(&'static str, String); 3] {
    [
        ("Department:", info.department.clone()),
        ("Year:", info.year.clone()),
        ("Regulation:", info.regulation_label()),
    ]
}
