//! Single-slot debounce timer.
//!
//! Scheduling replaces whatever was pending, so of a burst of keystrokes only
//! the last one produces an action. Nothing is queued. An action that has
//! already started is never interrupted by a later `schedule` or `cancel`.
//!
//! In the browser the slot holds a `gloo_timers` timeout. Natively it holds a
//! local tokio task, so it must be used from inside a `LocalSet`.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

#[cfg(all(feature = "no-wasm", not(feature = "wasm")))]
pub use native::Debouncer;
#[cfg(feature = "wasm")]
pub use wasm::Debouncer;

#[cfg(all(feature = "no-wasm", not(feature = "wasm")))]
mod native {
    use super::{DebounceState, Duration};
    use tokio::task::JoinHandle;

    #[derive(Debug, Default)]
    pub struct Debouncer {
        pending: Option<JoinHandle<()>>,
    }

    impl Debouncer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Cancel any pending action and run `action` once `delay` has
        /// elapsed without another call to `schedule` or `cancel`.
        pub fn schedule<F>(&mut self, action: F, delay: Duration)
        where
            F: FnOnce() + 'static,
        {
            self.cancel();
            self.pending = Some(tokio::task::spawn_local(async move {
                tokio::time::sleep(delay).await;
                action();
            }));
        }

        /// Discard the pending action, if any. Returns whether one was
        /// pending.
        pub fn cancel(&mut self) -> bool {
            match self.pending.take() {
                Some(handle) => {
                    let was_pending = !handle.is_finished();
                    handle.abort();
                    was_pending
                }
                None => false,
            }
        }

        pub fn state(&self) -> DebounceState {
            match &self.pending {
                Some(handle) if !handle.is_finished() => DebounceState::Pending,
                _ => DebounceState::Idle,
            }
        }
    }

    impl Drop for Debouncer {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}

#[cfg(feature = "wasm")]
mod wasm {
    use super::{DebounceState, Duration};
    use gloo_timers::callback::Timeout;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub struct Debouncer {
        pending: Option<Timeout>,
        armed: Rc<Cell<bool>>,
    }

    impl Debouncer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Cancel any pending action and run `action` once `delay` has
        /// elapsed without another call to `schedule` or `cancel`.
        pub fn schedule<F>(&mut self, action: F, delay: Duration)
        where
            F: FnOnce() + 'static,
        {
            self.cancel();
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            let armed = Rc::new(Cell::new(true));
            let flag = Rc::clone(&armed);
            self.armed = armed;
            self.pending = Some(Timeout::new(millis, move || {
                flag.set(false);
                action();
            }));
        }

        /// Discard the pending action, if any. Returns whether one was
        /// pending.
        pub fn cancel(&mut self) -> bool {
            let was_pending = self.armed.replace(false);
            if let Some(timeout) = self.pending.take() {
                drop(timeout.cancel());
            }
            was_pending
        }

        pub fn state(&self) -> DebounceState {
            if self.armed.get() {
                DebounceState::Pending
            } else {
                DebounceState::Idle
            }
        }
    }
}
