//! Styling for the chat list component.
//!
//! All default styles use `AdaptiveColor` so the list stays readable in both
//! light and dark terminal themes. The bundle covers every render-state
//! branch (loading, error, empty, populated) plus the title and status bar.

use lipgloss_extras::prelude::*;

/// Unicode ellipsis character (…) appended to truncated row text.
pub const ELLIPSIS: &str = "…";

/// Styling configuration for the chat list's own chrome.
///
/// Row appearance is the delegate's business (see
/// [`super::DefaultItemStyles`]); this bundle styles everything around the
/// rows.
///
/// # Examples
///
/// ```rust
/// use bubbletea_chatlist::chatlist::ChatListStyles;
/// use lipgloss_extras::prelude::*;
///
/// let mut styles = ChatListStyles::default();
/// styles.title = Style::new()
///     .background(Color::from("#7D56F4"))
///     .foreground(Color::from("#FFFFFF"))
///     .padding(0, 1, 0, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ChatListStyles {
    /// Style for the title bar container.
    pub title_bar: Style,
    /// Style for the list title text.
    pub title: Style,
    /// Style for the loading placeholder shown before the first emission.
    pub loading: Style,
    /// Style for the upstream-error message.
    pub error: Style,
    /// Style for the empty-list message.
    pub empty: Style,
    /// Style for the status bar.
    pub status_bar: Style,
    /// Style for the "loading more" marker while a page fetch is in flight.
    pub loading_more: Style,
}

impl Default for ChatListStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title_bar: Style::new().padding(0, 0, 1, 2),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            loading: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#8E8E8E",
                    Dark: "#747373",
                })
                .italic(true)
                .padding(0, 0, 0, 2),
            error: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#D70000",
                    Dark: "#FF5F5F",
                })
                .padding(0, 0, 0, 2),
            empty: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#909090",
                    Dark: "#626262",
                })
                .padding(0, 0, 0, 2),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(1, 0, 0, 2),
            loading_more: Style::new().foreground(subdued_color).italic(true),
        }
    }
}
