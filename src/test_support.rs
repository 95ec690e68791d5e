//! Scripted backend and frame recorder shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::client::{ELIGIBILITY_PATH, STUDENT_INFO_PATH, SUGGESTIONS_PATH};
use crate::error::Result;
use crate::interface::RequestApi;
use crate::model::dtos::{EligibilityParams, StudentInfoParams, SuggestionParams};
use crate::view::ViewState;

enum Reply {
    Body(Duration, Value),
    Unreachable,
}

#[derive(Default)]
struct Script {
    replies: HashMap<&'static str, VecDeque<Reply>>,
    calls: Vec<(&'static str, Value)>,
}

/// Replays queued replies per endpoint, in order. An endpoint with nothing
/// queued behaves like an unreachable backend.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    script: Rc<RefCell<Script>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &'static str, body: Value) {
        self.reply_after(path, Duration::ZERO, body);
    }

    pub fn reply_after(&self, path: &'static str, delay: Duration, body: Value) {
        self.push(path, Reply::Body(delay, body));
    }

    pub fn fail(&self, path: &'static str) {
        self.push(path, Reply::Unreachable);
    }

    /// Every request seen so far with its JSON body.
    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.script.borrow().calls.clone()
    }

    fn push(&self, path: &'static str, reply: Reply) {
        self.script
            .borrow_mut()
            .replies
            .entry(path)
            .or_default()
            .push_back(reply);
    }

    async fn exchange(&self, path: &'static str, params: impl Serialize) -> Result<Value> {
        let reply = {
            let mut script = self.script.borrow_mut();
            script.calls.push((path, serde_json::to_value(params)?));
            script.replies.get_mut(path).and_then(VecDeque::pop_front)
        };

        match reply {
            Some(Reply::Body(delay, body)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(body)
            }
            Some(Reply::Unreachable) | None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("{path}: connection refused"),
            )
            .into()),
        }
    }
}

impl RequestApi for FakeApi {
    async fn get_student_info(&self, params: StudentInfoParams<'_>) -> Result<Value> {
        self.exchange(STUDENT_INFO_PATH, params).await
    }

    async fn check_eligibility(&self, params: EligibilityParams<'_>) -> Result<Value> {
        self.exchange(ELIGIBILITY_PATH, params).await
    }

    async fn get_course_suggestions(&self, params: SuggestionParams<'_>) -> Result<Value> {
        self.exchange(SUGGESTIONS_PATH, params).await
    }
}

/// Keeps every rendered frame.
#[derive(Clone, Default)]
pub(crate) struct Frames {
    frames: Rc<RefCell<Vec<ViewState>>>,
}

impl Frames {
    pub fn sink(&self) -> impl Fn(&ViewState) + 'static {
        let frames = Rc::clone(&self.frames);
        move |state: &ViewState| frames.borrow_mut().push(state.clone())
    }

    pub fn any(&self, pred: impl Fn(&ViewState) -> bool) -> bool {
        self.frames.borrow().iter().any(pred)
    }
}
