//! Terminal rendering for the native binary.

use std::fmt::Write;

use crate::view::{student_lines, StudentPanel, ViewSink, ViewState};

const RULE: &str = "=====================================";

/// Logs every frame at debug level. The binary prints the settled view
/// itself with [`print_view`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleView;

impl ViewSink for ConsoleView {
    fn render(&self, state: &ViewState) {
        log::debug!(
            "frame: field={:?} loading={} message={:?} suggestions={}",
            state.register_field,
            state.loading,
            state.message.as_ref().map(ToString::to_string),
            state.suggestions.len()
        );
    }
}

pub fn print_view(state: &ViewState) {
    print!("{}", format_view(state));
}

pub fn print_suggestions(state: &ViewState) {
    print!("{}", format_suggestions(state));
}

// Writing into a String cannot fail, so the fmt results are dropped.
pub fn format_view(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Register Number: {}", state.register_number);

    match &state.student_panel {
        StudentPanel::Hidden => {}
        StudentPanel::Info(info) => {
            let _ = writeln!(out, "{RULE}");
            for (label, value) in student_lines(info) {
                let _ = writeln!(out, "{label} {value}");
            }
            let _ = writeln!(out, "{RULE}");
        }
        StudentPanel::Rejected(message) => {
            let _ = writeln!(out, "[red] {message}");
        }
    }

    if let Some(relevant) = &state.relevant_courses {
        let _ = writeln!(out, "[orange] {}", relevant.message);
        for course in &relevant.courses {
            let _ = writeln!(out, "  - {course}");
        }
    }

    if let Some(message) = &state.message {
        let _ = writeln!(out, "[{}] {message}", message.tone.color());
    }
    out
}

pub fn format_suggestions(state: &ViewState) -> String {
    let mut out = String::from("==============Suggestions==============\n");
    if state.suggestions.is_empty() {
        out.push_str("(none)\n");
    }
    for (index, suggestion) in state.suggestions.items().iter().enumerate() {
        let _ = writeln!(out, "{index}: {suggestion}");
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Message, RelevantCourses, Tone};

    #[test]
    fn relevant_courses_follow_the_message_directly() {
        let state = ViewState {
            register_number: "123456789012".to_string(),
            relevant_courses: Some(RelevantCourses {
                message: "Not eligible".to_string(),
                courses: vec!["Course A".to_string(), "Course B".to_string()],
            }),
            ..ViewState::default()
        };
        assert_eq!(
            format_view(&state),
            "Register Number: 123456789012\n\
             [orange] Not eligible\n  - Course A\n  - Course B\n"
        );
    }

    #[test]
    fn message_carries_its_colour() {
        let state = ViewState {
            message: Some(Message::new("Please enter a course title.", Tone::Error)),
            ..ViewState::default()
        };
        assert!(format_view(&state).ends_with("[red] Please enter a course title.\n"));
    }

    #[test]
    fn suggestions_are_numbered() {
        let mut state = ViewState::default();
        assert!(format_suggestions(&state).contains("(none)"));

        state.suggestions.merge(["Data Mining", "Data Science"]);
        let out = format_suggestions(&state);
        assert!(out.contains("0: Data Mining\n1: Data Science\n"));
        assert!(!out.contains("(none)"));
    }
}
