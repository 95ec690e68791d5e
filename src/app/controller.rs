//! View controller.
//!
//! Turns input events into view updates: the register number goes through
//! the debouncer and validator before the student lookup, the course title
//! drives suggestions on every input and the eligibility check on Enter.
//! Each event handler does its synchronous part (clearing stale output,
//! validation, loader) immediately and leaves the network part to a local
//! task. The `async` methods run a whole flow and can be awaited directly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{request, spawn_local};
use crate::config::Config;
use crate::debounce::{DebounceState, Debouncer};
use crate::interface::RequestApi;
use crate::model::structs::{EligibilityResult, StudentLookup};
use crate::validate::{is_digit_identifier, is_valid_identifier};
use crate::view::{
    FieldState, Message, RelevantCourses, StudentPanel, Tone, ViewSink, ViewState,
};

pub const INVALID_REGISTER_NUMBER: &str = "Please enter a valid 12-digit Register Number.";
pub const INVALID_REGISTER_NUMBER_FIRST: &str =
    "Please enter a valid 12-digit Register Number first.";
pub const MISSING_COURSE_TITLE: &str = "Please enter a course title.";
pub const STUDENT_INFO_UNAVAILABLE: &str = "Error fetching student info. Please try again later.";
pub const ELIGIBILITY_UNAVAILABLE: &str =
    "Error checking course eligibility. Please try again later.";
pub const ELIGIBILITY_LABEL: &str = "Eligibility Status:";

#[derive(Debug, Clone, Copy)]
enum Flow {
    StudentInfo,
    Eligibility,
    Suggestions,
}

struct Inner<C> {
    client: C,
    config: Config,
    state: RefCell<ViewState>,
    sink: Box<dyn ViewSink>,
    debouncer: RefCell<Debouncer>,
    generations: [Cell<u64>; 3],
}

/// Cheap to clone; clones share the same state, client and timer slot.
pub struct Controller<C> {
    inner: Rc<Inner<C>>,
}

impl<C> Clone for Controller<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: RequestApi + 'static> Controller<C> {
    pub fn new(client: C, config: Config, sink: impl ViewSink + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                client,
                config,
                state: RefCell::new(ViewState::default()),
                sink: Box::new(sink),
                debouncer: RefCell::new(Debouncer::new()),
                generations: Default::default(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Snapshot of the current view.
    pub fn state(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.inner.debouncer.borrow().state()
    }

    pub fn is_valid_register_number(&self, register_number: &str) -> bool {
        if self.inner.config.strict_register_number {
            is_digit_identifier(register_number)
        } else {
            is_valid_identifier(register_number)
        }
    }

    // ---- events ----

    /// The register number field's text changed.
    pub fn on_register_input(&self, value: &str) {
        self.update(|s| s.register_number = value.to_string());
    }

    /// A key went down in the register number field. Re-arms the delayed
    /// lookup; the value checked is whatever the field holds when it fires.
    pub fn on_register_keydown(&self) {
        let this = self.clone();
        let delay = self.inner.config.debounce_delay;
        self.inner
            .debouncer
            .borrow_mut()
            .schedule(move || this.run_register_check(), delay);
    }

    /// Typing one character: the text changes and a keystroke is seen.
    pub fn on_register_typed(&self, value: &str) {
        self.on_register_input(value);
        self.on_register_keydown();
    }

    /// Drop a pending register number lookup.
    pub fn cancel_register_check(&self) -> bool {
        self.inner.debouncer.borrow_mut().cancel()
    }

    /// The debounced action: validate now, look the student up in the
    /// background.
    pub fn run_register_check(&self) {
        if let Some((generation, register_number)) = self.begin_register_check() {
            let this = self.clone();
            spawn_local(async move {
                this.send_student_info(generation, register_number)
                    .await
            });
        }
    }

    /// Update the course title text without fetching suggestions.
    pub fn set_course_title(&self, value: &str) {
        self.update(|s| s.course_title = value.to_string());
    }

    /// The course title field's text changed: refresh suggestions.
    pub fn on_course_title_input(&self, value: &str) {
        self.set_course_title(value);
        if let Some((generation, register_number, partial)) = self.begin_suggestions() {
            let this = self.clone();
            spawn_local(async move {
                this.send_suggestions(generation, register_number, partial)
                    .await
            });
        }
    }

    /// Enter in the course title field: check eligibility right away.
    pub fn on_course_title_enter(&self) {
        if let Some((generation, register_number, course_title)) = self.begin_eligibility_check()
        {
            let this = self.clone();
            spawn_local(async move {
                this.send_eligibility_check(generation, register_number, course_title)
                    .await
            });
        }
    }

    /// Click on the suggestion at `index`: it becomes the course title and
    /// the whole list goes away.
    pub fn on_suggestion_click(&self, index: usize) {
        self.update(|s| {
            if let Some(text) = s.suggestions.select(index) {
                s.course_title = text;
            }
        });
    }

    // ---- flows ----

    /// Validate the current register number and, if valid, look it up.
    pub async fn check_register_number(&self) {
        if let Some((generation, register_number)) = self.begin_register_check() {
            self.send_student_info(generation, register_number).await;
        }
    }

    /// Look a register number up without validating it first.
    pub async fn fetch_student_info(&self, register_number: String) {
        let generation = self.next_generation(Flow::StudentInfo);
        self.send_student_info(generation, register_number).await;
    }

    /// Validate both fields and, if they pass, ask for eligibility.
    pub async fn check_eligibility(&self) {
        if let Some((generation, register_number, course_title)) = self.begin_eligibility_check()
        {
            self.send_eligibility_check(generation, register_number, course_title)
                .await;
        }
    }

    /// Clear the list and, when both fields allow it, fetch suggestions for
    /// the current course title.
    pub async fn refresh_suggestions(&self) {
        if let Some((generation, register_number, partial)) = self.begin_suggestions() {
            self.send_suggestions(generation, register_number, partial)
                .await;
        }
    }

    // ---- synchronous halves ----
    //
    // Each one starts a new generation of its flow, whether or not a request
    // follows, so replies to earlier checks count as stale.

    fn begin_register_check(&self) -> Option<(u64, String)> {
        let generation = self.next_generation(Flow::StudentInfo);
        let register_number = self.inner.state.borrow().register_number.clone();
        let valid = self.is_valid_register_number(&register_number);
        log::debug!("register number {register_number:?} valid: {valid}");
        let discard = self.inner.config.discard_stale_responses;

        self.update(|s| {
            s.message = None;
            s.student_panel = StudentPanel::Hidden;
            if valid {
                s.register_field = FieldState::Valid;
                s.loading = true;
            } else {
                s.register_field = FieldState::Invalid;
                s.message = Some(Message::new(INVALID_REGISTER_NUMBER, Tone::Error));
                // no reply will come to hide it
                if discard {
                    s.loading = false;
                }
            }
        });

        valid.then_some((generation, register_number))
    }

    fn begin_eligibility_check(&self) -> Option<(u64, String, String)> {
        let generation = self.next_generation(Flow::Eligibility);
        let (register_number, course_title) = {
            let state = self.inner.state.borrow();
            (state.register_number.clone(), state.course_title.clone())
        };
        let register_ok = self.is_valid_register_number(&register_number);
        let title_ok = !course_title.is_empty();
        let discard = self.inner.config.discard_stale_responses;

        self.update(|s| {
            s.message = None;
            s.relevant_courses = None;
            s.suggestions.clear();
            if !register_ok {
                s.message = Some(Message::new(INVALID_REGISTER_NUMBER_FIRST, Tone::Error));
            } else if !title_ok {
                s.message = Some(Message::new(MISSING_COURSE_TITLE, Tone::Error));
            } else {
                s.loading = true;
            }
            if discard && !(register_ok && title_ok) {
                s.loading = false;
            }
        });

        (register_ok && title_ok).then_some((generation, register_number, course_title))
    }

    fn begin_suggestions(&self) -> Option<(u64, String, String)> {
        let generation = self.next_generation(Flow::Suggestions);
        let (register_number, partial) = {
            let state = self.inner.state.borrow();
            (state.register_number.clone(), state.course_title.clone())
        };
        self.update(|s| s.suggestions.clear());

        if partial.is_empty() || !self.is_valid_register_number(&register_number) {
            return None;
        }
        Some((generation, register_number, partial))
    }

    // ---- network halves ----

    async fn send_student_info(&self, generation: u64, register_number: String) {
        self.update(|s| {
            s.message = None;
            s.loading = true;
        });

        let result = request::fetch_student_info(&self.inner.client, &register_number).await;
        if !self.is_current(Flow::StudentInfo, generation) {
            return;
        }

        self.update(|s| {
            s.loading = false;
            match result {
                Ok(StudentLookup::Found(info)) => s.student_panel = StudentPanel::Info(info),
                Ok(StudentLookup::Rejected { message }) => {
                    s.student_panel = StudentPanel::Rejected(message)
                }
                Err(e) => {
                    log::warn!("student info request for {register_number} failed: {e}");
                    s.message = Some(Message::new(STUDENT_INFO_UNAVAILABLE, Tone::Warning));
                }
            }
        });
    }

    async fn send_eligibility_check(
        &self,
        generation: u64,
        register_number: String,
        course_title: String,
    ) {
        let result =
            request::check_eligibility(&self.inner.client, &register_number, &course_title).await;
        if !self.is_current(Flow::Eligibility, generation) {
            return;
        }

        self.update(|s| {
            s.loading = false;
            match result {
                Ok(EligibilityResult::Eligible { message }) => {
                    s.message = Some(Message::labelled(ELIGIBILITY_LABEL, message, Tone::Success));
                }
                Ok(EligibilityResult::NotEligible {
                    message,
                    relevant_courses: Some(courses),
                }) => {
                    s.relevant_courses = Some(RelevantCourses { message, courses });
                }
                Ok(EligibilityResult::NotEligible {
                    message,
                    relevant_courses: None,
                }) => {
                    s.message = Some(Message::new(message, Tone::Error));
                }
                Err(e) => {
                    log::warn!("eligibility check for {course_title:?} failed: {e}");
                    s.message = Some(Message::new(ELIGIBILITY_UNAVAILABLE, Tone::Warning));
                }
            }
        });
    }

    async fn send_suggestions(&self, generation: u64, register_number: String, partial: String) {
        let result =
            request::fetch_course_suggestions(&self.inner.client, &register_number, &partial).await;
        if !self.is_current(Flow::Suggestions, generation) {
            return;
        }

        match result {
            Ok(Some(suggestions)) => self.update(|s| {
                let added = s.suggestions.merge(suggestions);
                log::debug!("{} new suggestions for {partial:?}", added.len());
            }),
            Ok(None) => {}
            Err(e) => log::error!("Error fetching course suggestions: {e}"),
        }
    }

    // ---- helpers ----

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        f(&mut self.inner.state.borrow_mut());
        self.inner.sink.render(&self.inner.state.borrow());
    }

    fn generation(&self, flow: Flow) -> &Cell<u64> {
        &self.inner.generations[flow as usize]
    }

    fn next_generation(&self, flow: Flow) -> u64 {
        let cell = self.generation(flow);
        let next = cell.get().wrapping_add(1);
        cell.set(next);
        next
    }

    /// Always true unless stale responses are discarded.
    fn is_current(&self, flow: Flow, generation: u64) -> bool {
        if !self.inner.config.discard_stale_responses {
            return true;
        }
        let current = self.generation(flow).get() == generation;
        if !current {
            log::debug!("dropping stale {flow:?} response #{generation}");
        }
        current
    }
}
