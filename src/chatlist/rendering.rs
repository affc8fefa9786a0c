//! View rendering functions for the chat list.
//!
//! The view composes three vertically stacked sections: the title header,
//! the body (one branch per [`RenderState`]), and, on the populated branch,
//! a status footer with the conversation count and an in-flight marker while
//! a page fetch is outstanding.

use super::Model;
use crate::item::Item;
use crate::state::RenderState;
use unicode_width::UnicodeWidthStr;

// Columns a string occupies on screen, ANSI styling discounted.
fn visible_width(text: &str) -> usize {
    let stripped = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&stripped).width()
}

impl<I: Item + Send + Sync + 'static> Model<I> {
    /// Renders the title header.
    ///
    /// When a search query narrows the list, the header carries the match
    /// count so the user can tell a filtered view from the full one.
    pub(super) fn view_header(&self) -> String {
        let mut header = self.title.clone();
        if self.search_active() {
            header.push_str(&format!(" (filtered: {})", self.len()));
        }
        let title = self.styles.title.clone().render(&header);
        self.styles.title_bar.clone().render(&title)
    }

    /// Renders the body for the current render state.
    pub(super) fn view_body(&self) -> String {
        match self.render_state() {
            RenderState::Loading => self
                .styles
                .loading
                .clone()
                .render("Loading conversations…"),
            RenderState::Error(error) => self
                .styles
                .error
                .clone()
                .render(&format!("Something went wrong: {}", error)),
            RenderState::Empty { search_active } => {
                let message = if search_active {
                    "No conversations match your search."
                } else {
                    "No conversations yet."
                };
                self.styles.empty.clone().render(message)
            }
            RenderState::Populated(_) => self.view_items(),
        }
    }

    /// Renders the displayed rows, exiting ghosts included.
    pub(super) fn view_items(&self) -> String {
        let mut rendered_rows = Vec::new();
        let entries = self.entries();
        let last = entries.len().saturating_sub(1);
        for (index, entry) in entries.iter().enumerate() {
            let rendered = self.delegate.render(self, index, entry);
            if rendered.is_empty() {
                continue;
            }
            rendered_rows.push(rendered);
            if index < last {
                for _ in 0..self.delegate.spacing() {
                    rendered_rows.push(String::new());
                }
            }
        }
        rendered_rows.join("\n")
    }

    /// Renders the status footer: conversation count, plus a right-aligned
    /// marker while a page fetch is in flight. Empty unless the list is
    /// populated and the status bar is enabled.
    pub(super) fn view_footer(&self) -> String {
        if !self.show_status_bar || !self.render_state().is_populated() {
            return String::new();
        }

        let count = self.len();
        let noun = if count == 1 {
            "conversation"
        } else {
            "conversations"
        };
        let mut line = format!("{} {}", count, noun);

        if self.is_loading_more() {
            let marker = "loading more…";
            let used = visible_width(&line) + marker.width();
            let pad = self.width.saturating_sub(used).max(1);
            line.push_str(&" ".repeat(pad));
            line.push_str(&self.styles.loading_more.clone().render(marker));
        }

        self.styles.status_bar.clone().render(&line)
    }
}
