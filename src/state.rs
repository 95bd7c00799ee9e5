use crate::gamma::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Events,
    Markets,
    Portfolio,
    Search,
}

/// Owned UI state; the renderers read it, only the setters below change it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub events: Vec<Event>,
    pub selected_event: Option<Event>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub view: View,
    pub selected_index: usize,
    pub comment_scroll: usize,
}

impl AppState {
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.selected_index = self.selected_index.min(self.events.len().saturating_sub(1));
    }

    /// Selecting an event opens its markets view with the comment window reset.
    pub fn select_event(&mut self, event: Option<Event>) {
        self.selected_event = event;
        self.comment_scroll = 0;
        if self.selected_event.is_some() {
            self.view = View::Markets;
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.events.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected(&self) -> Option<&Event> {
        self.events.get(self.selected_index)
    }

    pub fn scroll_comments_down(&mut self, total: usize, visible: usize) {
        let max = total.saturating_sub(visible);
        self.comment_scroll = (self.comment_scroll + 1).min(max);
    }

    pub fn scroll_comments_up(&mut self) {
        self.comment_scroll = self.comment_scroll.saturating_sub(1);
    }
}
