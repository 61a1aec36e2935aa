use glam::Vec3;
use crate::api::types::RequestId;

/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at viewport pixel (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport pixel (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to viewport pixel (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (buttons, wheel, resize).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// A hand was detected: thumb-tip and index-tip landmarks in camera space.
    HandPose { thumb: Vec3, index: Vec3 },
    /// A sampling pass found no hand.
    HandLost,
    /// The landmark source could not be started (e.g. camera permission denied).
    GestureUnavailable { reason: String },
    /// A text request completed with a body.
    TextLoaded { request: RequestId, body: String },
    /// A text request failed.
    TextFailed { request: RequestId, reason: String },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        assert_eq!(events, vec![InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 }]);
    }

    #[test]
    fn events_keep_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::HandPose { thumb: Vec3::ZERO, index: Vec3::X });
        q.push(InputEvent::HandLost);
        q.push(InputEvent::TextLoaded { request: RequestId(3), body: "hi".into() });

        let kinds: Vec<&InputEvent> = q.iter().collect();
        assert!(matches!(kinds[0], InputEvent::HandPose { .. }));
        assert!(matches!(kinds[1], InputEvent::HandLost));
        match kinds[2] {
            InputEvent::TextLoaded { request, body } => {
                assert_eq!(*request, RequestId(3));
                assert_eq!(body, "hi");
            }
            other => panic!("Expected TextLoaded, got {:?}", other),
        }
    }
}
