//! # Change Notification
//!
//! Every state change the editor makes is announced as an [`EditorEvent`]
//! to the listeners registered on its [`EventBus`]. Hosts redraw from these
//! instead of observing the graph.

use storymate_flowchart::{Edge, Point, Viewport};

use crate::editor::Selection;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    NodeAdded { node_id: String },
    NodeRemoved { node_id: String },
    NodeMoved { node_id: String, position: Point },
    /// Text or image changed
    NodeUpdated { node_id: String },
    EdgeAdded(Edge),
    EdgeRemoved(Edge),
    SelectionChanged(Selection),
    HoverChanged(Option<String>),
    ViewportChanged(Viewport),
    PreviewToggled(bool),
    Saved { project_id: String, updated_at: i64 },
    SaveFailed { project_id: String, message: String },
}

pub type Listener = Box<dyn FnMut(&EditorEvent)>;

/// Registered change listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = EditorEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("{} listeners", self.listeners.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event| seen.borrow_mut().push(event.clone()));
        }

        bus.emit(EditorEvent::PreviewToggled(true));

        assert_eq!(bus.listener_count(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                EditorEvent::PreviewToggled(true),
                EditorEvent::PreviewToggled(true)
            ]
        );
    }
}
