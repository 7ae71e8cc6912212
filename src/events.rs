use std::collections::VecDeque;

use crate::components::{Frame, TileRecord};

/// What the info panel shows for a selected tile.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPayload {
    pub name: String,
    pub body_text: String,
    pub subtitle: String,
    pub date_label: String,
    pub accent_color: [u8; 3],
    pub video_id: Option<String>,
}

impl InfoPayload {
    pub fn from_record(record: &TileRecord) -> Self {
        Self {
            name: record.display_name.clone(),
            body_text: record.body_text.clone(),
            subtitle: record.subtitle.clone(),
            date_label: record.date_label.clone(),
            accent_color: record.accent_color,
            video_id: record.video_id.clone(),
        }
    }
}

/// Receives selection changes: `Some` on select, `None` on deselect.
pub trait InfoPanelSink {
    fn show(&mut self, payload: Option<&InfoPayload>);
}

/// Collecting sink, mostly for tests and headless runs.
impl InfoPanelSink for Vec<Option<InfoPayload>> {
    fn show(&mut self, payload: Option<&InfoPayload>) {
        self.push(payload.cloned());
    }
}

/// Engine-level events. Every variant carries the frame it happened on.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Selected { index: usize, frame: Frame },
    Deselected { index: usize, frame: Frame },
    OpenLink { index: usize, url: String, frame: Frame },
}

impl EngineEvent {
    pub fn frame(&self) -> Frame {
        match self {
            EngineEvent::Selected { frame, .. }
            | EngineEvent::Deselected { frame, .. }
            | EngineEvent::OpenLink { frame, .. } => *frame,
        }
    }
}

/// Recent engine events, oldest first. Once `capacity` is reached each
/// push drops the oldest entry, so a long session keeps only its tail.
/// Tests read it to check which transitions happened and on which frame.
pub struct EventLog {
    events: VecDeque<EngineEvent>,
    capacity: usize,
}

impl EventLog {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Room for the last 256 selection and link events.
    pub fn default_capacity() -> Self {
        Self::new(256)
    }

    pub fn push(&mut self, event: EngineEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&EngineEvent> {
        self.events.back()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events stamped at or after `frame`.
    pub fn since(&self, frame: Frame) -> impl Iterator<Item = &EngineEvent> {
        self.events.iter().filter(move |e| e.frame() >= frame)
    }
}
