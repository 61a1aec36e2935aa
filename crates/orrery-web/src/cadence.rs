use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast as _;
use crate::error::{describe, WebError};

/// Shared cancellation flag for work scheduled on the browser event loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A callback run every `interval_ms` on the main thread until cancelled.
///
/// Dropping the task cancels it and clears the interval. Work the callback
/// already started keeps running; it should check the token before
/// publishing results.
pub struct RepeatingTask {
    handle: i32,
    token: CancellationToken,
    _closure: Closure<dyn FnMut()>,
}

impl RepeatingTask {
    pub fn start<F>(interval_ms: u32, mut f: F) -> Result<Self, WebError>
    where
        F: FnMut(&CancellationToken) + 'static,
    {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let token = CancellationToken::new();
        let guard = token.clone();
        let closure = Closure::wrap(Box::new(move || {
            if !guard.is_cancelled() {
                f(&guard);
            }
        }) as Box<dyn FnMut()>);

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms.max(1) as i32,
            )
            .map_err(|e| WebError::Scheduling(describe(&e)))?;

        Ok(Self {
            handle,
            token,
            _closure: closure,
        })
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_live() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let seen_by_task = token.clone();
        token.cancel();
        assert!(seen_by_task.is_cancelled());
        // Cancelling twice is harmless.
        seen_by_task.cancel();
        assert!(token.is_cancelled());
    }
}
