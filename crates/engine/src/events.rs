//! Event types for editor lifecycle notifications.
//!
//! The owning page subscribes to these to drive its modal host (close
//! animation, confirmation dialogs). The test collector records them so
//! tests can assert on ordering.

/// Events emitted by `Editor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The editor was opened with this many sections.
    Opened { sections: usize },

    /// Sections were exported and handed to the save callback.
    Saved { sections: usize },

    /// The editor asks its host to close it (Escape or after save).
    /// Emitted once per close; the host answers with `finish_close`.
    CloseRequested,

    /// All editor state was discarded.
    Closed,
}

/// Callback type for receiving editor events.
pub type EventCallback = Box<dyn FnMut(EditorEvent)>;

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<EditorEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[EditorEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of close requests seen.
    pub fn close_requests(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, EditorEvent::CloseRequested))
            .count()
    }

    /// Section counts of every save, in order.
    pub fn saves(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EditorEvent::Saved { sections } => Some(*sections),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_collector_filtering() {
        let mut collector = EventCollector::new();

        collector.push(EditorEvent::Opened { sections: 1 });
        collector.push(EditorEvent::Saved { sections: 2 });
        collector.push(EditorEvent::CloseRequested);
        collector.push(EditorEvent::Closed);

        assert_eq!(collector.len(), 4);
        assert_eq!(collector.saves(), vec![2]);
        assert_eq!(collector.close_requests(), 1);

        collector.clear();
        assert!(collector.is_empty());
    }
}
