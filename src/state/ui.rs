//! UI-related application state

use crate::event::{Event, EventId};
use crate::ui::theme::Theme;

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Row selected by event id, so it follows the event across re-polls
    pub selected: Option<EventId>,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            selected: None,
            show_about_dialog: false,
        }
    }

    /// Toggle selection of a row
    pub fn toggle_selection(&mut self, id: &EventId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    /// Drop the selection if its event is no longer in the snapshot
    pub fn retain_selection(&mut self, events: &[Event]) {
        if let Some(id) = &self.selected {
            if !events.iter().any(|e| &e.id == id) {
                tracing::debug!("Selected event {} left the feed", id);
                self.selected = None;
            }
        }
    }

    /// The selected event, looked up by id
    pub fn selected_event<'a>(&self, events: &'a [Event]) -> Option<&'a Event> {
        let id = self.selected.as_ref()?;
        events.iter().find(|e| &e.id == id)
    }
}
