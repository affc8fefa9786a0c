//! Default item implementation and delegate for the chat list.
//!
//! `DefaultItem` is a ready-made conversation row with a stable id, a title,
//! and a one-line preview of the latest message. `DefaultDelegate` renders any
//! [`Item`] as a title line (plus the preview line when the item is a
//! `DefaultItem`), dimming rows while they animate in or out.

use super::style::ELLIPSIS;
use super::types::ItemDelegate;
use super::Model;
use crate::item::Item;
use crate::transition::Entry;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Styling for default chat rows.
#[derive(Debug, Clone)]
pub struct DefaultItemStyles {
    /// Title style for settled rows.
    pub normal_title: Style,
    /// Preview style for settled rows.
    pub normal_preview: Style,
    /// Title style while a row is entering or exiting.
    pub dimmed_title: Style,
    /// Preview style while a row is entering or exiting.
    pub dimmed_preview: Style,
}

impl Default for DefaultItemStyles {
    fn default() -> Self {
        let normal_title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            })
            .padding(0, 0, 0, 2);
        let normal_preview = normal_title.clone().foreground(AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        });
        let dimmed_title = Style::new()
            .foreground(AdaptiveColor {
                Light: "#9B9B9B",
                Dark: "#5C5C5C",
            })
            .faint(true)
            .padding(0, 0, 0, 2);
        let dimmed_preview = dimmed_title.clone().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });
        Self {
            normal_title,
            normal_preview,
            dimmed_title,
            dimmed_preview,
        }
    }
}

/// Simple conversation row with an id, a title, and a message preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultItem {
    /// Stable unique identifier of the conversation.
    pub id: String,
    /// Conversation title (counterpart name, group name, ...).
    pub title: String,
    /// One-line preview of the latest message.
    pub preview: String,
}

impl DefaultItem {
    /// Creates a new default item.
    pub fn new(id: &str, title: &str, preview: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            preview: preview.to_string(),
        }
    }
}

impl std::fmt::Display for DefaultItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl Item for DefaultItem {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn filter_value(&self) -> String {
        format!("{} {}", self.title, self.preview)
    }
}

/// Delegate that renders items as title + preview rows.
#[derive(Debug, Clone)]
pub struct DefaultDelegate {
    /// Whether to show the preview line beneath the title.
    pub show_preview: bool,
    /// Styling used for settled and transitioning rows.
    pub styles: DefaultItemStyles,
    height: usize,
    spacing: usize,
}

impl Default for DefaultDelegate {
    fn default() -> Self {
        Self {
            show_preview: true,
            styles: Default::default(),
            height: 2,
            spacing: 1,
        }
    }
}

impl DefaultDelegate {
    /// Creates a new delegate with default styles and layout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Item + 'static> ItemDelegate<I> for DefaultDelegate {
    fn render(&self, m: &Model<I>, _index: usize, entry: &Entry<I>) -> String {
        if m.width == 0 {
            return String::new();
        }

        let item = entry.item();
        let title = item.to_string();
        // The preview line is only available for DefaultItem; other item
        // types render as a single title line.
        let preview = (item as &dyn std::any::Any)
            .downcast_ref::<DefaultItem>()
            .map(|it| it.preview.clone())
            .unwrap_or_default();

        let s = &self.styles;
        let (title_style, preview_style) = if entry.phase().is_some() {
            (&s.dimmed_title, &s.dimmed_preview)
        } else {
            (&s.normal_title, &s.normal_preview)
        };

        let title_out = title_style.clone().render(&truncate(&title, m.width));
        if self.show_preview && !preview.is_empty() {
            let preview_out = preview_style
                .clone()
                .render(&truncate(&preview, m.width));
            format!("{}\n{}", title_out, preview_out)
        } else {
            title_out
        }
    }

    fn height(&self) -> usize {
        if self.show_preview {
            self.height
        } else {
            1
        }
    }

    fn spacing(&self) -> usize {
        self.spacing
    }
}

/// Truncates to `max_width` columns on grapheme boundaries, appending an
/// ellipsis when anything was cut.
fn truncate(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let keep = max_width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if used + grapheme_width > keep {
            break;
        }
        out.push_str(grapheme);
        used += grapheme_width;
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        assert_eq!(truncate("hello world", 6), "hello…");
    }

    #[test]
    fn zero_width_truncates_to_nothing() {
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        // "你好" is two double-width graphemes; width 3 fits only the first
        // plus the ellipsis.
        assert_eq!(truncate("你好世界", 3), "你…");
    }

    #[test]
    fn default_item_identity_and_filter_text() {
        let item = DefaultItem::new("c1", "alice", "see you tomorrow");
        assert_eq!(item.id(), "c1");
        assert!(item.filter_value().contains("alice"));
        assert!(item.filter_value().contains("tomorrow"));
        assert_eq!(item.to_string(), "alice");
    }
}
