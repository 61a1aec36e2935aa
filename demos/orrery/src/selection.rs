/// The clicked body and its info text.
///
/// A `Selection` is never edited into another body: every click builds a new
/// one. Text arriving for an older request is recognised by its id and dropped.

use orrery_engine::RequestId;

use crate::info_panel::InfoPanel;
use crate::neo::NeoRecord;

pub const LOADING_TEXT: &str = "Loading AI-generated content...";
pub const EMPTY_TEXT: &str = "AI content could not be generated.";
pub const FAILED_TEXT: &str = "Error fetching AI content.";
pub const UNRESOLVED_TEXT: &str = "Loading...";

#[derive(Debug, Clone, PartialEq)]
pub enum SelectedBody {
    Planet(usize),
    Neo(usize),
    /// A NEO asked for by name that is not in the loaded feed (yet).
    Unresolved(String),
}

impl SelectedBody {
    /// Discriminator sent to the host: 1 planet, 2 NEO, 3 unresolved.
    pub fn code(&self) -> f32 {
        match self {
            SelectedBody::Planet(_) => 1.0,
            SelectedBody::Neo(_) => 2.0,
            SelectedBody::Unresolved(_) => 3.0,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            SelectedBody::Planet(i) | SelectedBody::Neo(i) => Some(*i),
            SelectedBody::Unresolved(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoState {
    Loading,
    Ready,
    Empty,
    Failed,
}

impl InfoState {
    pub fn code(self) -> f32 {
        match self {
            InfoState::Loading => 0.0,
            InfoState::Ready => 1.0,
            InfoState::Empty => 2.0,
            InfoState::Failed => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    body: SelectedBody,
    name: String,
    request: Option<RequestId>,
    state: InfoState,
    panel: InfoPanel,
}

impl Selection {
    /// A planet whose description is still being fetched by `request`.
    pub fn planet(index: usize, name: &str, request: RequestId, page_size: usize) -> Self {
        Self {
            body: SelectedBody::Planet(index),
            name: name.to_string(),
            request: Some(request),
            state: InfoState::Loading,
            panel: InfoPanel::new(LOADING_TEXT, page_size),
        }
    }

    /// A NEO from the feed. Its text is known immediately.
    pub fn neo(index: usize, record: &NeoRecord, page_size: usize) -> Self {
        Self {
            body: SelectedBody::Neo(index),
            name: record.name.clone(),
            request: None,
            state: InfoState::Ready,
            panel: InfoPanel::new(&record.info_text(), page_size),
        }
    }

    pub fn unresolved(name: &str, page_size: usize) -> Self {
        Self {
            body: SelectedBody::Unresolved(name.to_string()),
            name: name.to_string(),
            request: None,
            state: InfoState::Loading,
            panel: InfoPanel::new(UNRESOLVED_TEXT, page_size),
        }
    }

    pub fn body(&self) -> &SelectedBody {
        &self.body
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> InfoState {
        self.state
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut InfoPanel {
        &mut self.panel
    }

    pub fn is_awaiting(&self, request: RequestId) -> bool {
        self.request == Some(request)
    }

    /// Apply fetched text. Returns false if `request` is not the one this
    /// selection is waiting for.
    pub fn apply_text(&mut self, request: RequestId, body: &str) -> bool {
        if !self.is_awaiting(request) {
            return false;
        }
        self.request = None;
        if body.trim().is_empty() {
            self.state = InfoState::Empty;
            self.panel.set_text(EMPTY_TEXT);
        } else {
            self.state = InfoState::Ready;
            self.panel.set_text(body);
        }
        true
    }

    /// Apply a fetch failure. Same stale rule as `apply_text`.
    pub fn apply_failure(&mut self, request: RequestId) -> bool {
        if !self.is_awaiting(request) {
            return false;
        }
        self.request = None;
        self.state = InfoState::Failed;
        self.panel.set_text(FAILED_TEXT);
        true
    }
}
