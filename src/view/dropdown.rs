//! Dropdown widget: button row, popup list and filter prompt.

use crate::state::dropdown::CAPTION_SEPARATOR;
use crate::state::{Dropdown, PromptState};
use crate::view::styles::DropdownStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Prefix of the filter prompt row.
pub const PROMPT_PREFIX: &str = "> ";

/// First visible position so that `focus` sits at the top of a window of
/// `rows`, clamped so the window never runs past the end of the list.
pub fn window_start(focus: usize, len: usize, rows: usize) -> usize {
    focus.min(len.saturating_sub(rows.max(1)))
}

/// Renders a [`Dropdown`].
pub struct DropdownView<'a, V> {
    dropdown: &'a Dropdown<V>,
    styles: &'a DropdownStyles,
}

impl<'a, V: Clone + PartialEq + 'static> DropdownView<'a, V> {
    /// Widget over `dropdown`.
    pub fn new(dropdown: &'a Dropdown<V>, styles: &'a DropdownStyles) -> Self {
        Self { dropdown, styles }
    }

    /// Rows needed to show everything: button, popup and prompt.
    pub fn required_height(&self) -> u16 {
        let mut rows = 1;
        if self.dropdown.is_open() {
            rows += self.dropdown.popup_height();
            if self.dropdown.popup().prompt().is_some() {
                rows += 1;
            }
        }
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    fn caption_width(&self) -> u16 {
        u16::try_from(self.dropdown.caption_width()).unwrap_or(u16::MAX)
    }

    fn render_button(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        if let Some(caption) = self.dropdown.caption() {
            spans.push(Span::styled(format!("{caption}{CAPTION_SEPARATOR}"), self.styles.label));
        }
        let item_width = self.dropdown.max_item_width();
        spans.push(Span::styled(
            format!("{:<item_width$}", self.dropdown.selected_label()),
            self.styles.text,
        ));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let popup = self.dropdown.popup();
        let items = popup.items();
        let rows = usize::from(area.height);
        let focus = self.dropdown.focus_position();
        let start = window_start(focus, items.len(), rows);

        let window = items.iter().enumerate().skip(start).take(rows);
        for (offset, (position, item)) in window.enumerate() {
            let y = area.y + offset as u16;
            let style = row_style(self.styles, position == focus);
            let row = Rect::new(area.x, y, area.width, 1);
            buf.set_style(row, style);

            let line = match popup.highlight_at(position) {
                Some(spans) => Line::from(
                    spans
                        .segments()
                        .map(|(kind, text)| {
                            Span::styled(text.to_string(), self.styles.span_style(kind, style))
                        })
                        .collect::<Vec<_>>(),
                ),
                None => Line::from(Span::styled(item.label().to_string(), style)),
            };
            buf.set_line(area.x, y, &line, area.width);
        }
    }

    fn render_prompt(&self, prompt: &PromptState, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.styles.prompt);
        buf.set_line(area.x, area.y, &prompt_line(prompt, self.styles), area.width);
    }
}

/// The prompt row: prefix, text, and a block cursor.
fn prompt_line<'a>(prompt: &'a PromptState, styles: &DropdownStyles) -> Line<'a> {
    let text = prompt.text();
    let split = text
        .char_indices()
        .nth(prompt.cursor())
        .map_or(text.len(), |(offset, _)| offset);
    let (before, rest) = text.split_at(split);
    let mut rest_chars = rest.chars();
    let (cursor, after) = match rest_chars.next() {
        Some(ch) => (ch.to_string(), rest_chars.as_str()),
        None => (" ".to_string(), ""),
    };

    Line::from(vec![
        Span::styled(PROMPT_PREFIX, styles.prompt),
        Span::styled(before, styles.prompt),
        Span::styled(cursor, styles.cursor),
        Span::styled(after, styles.prompt),
    ])
}

impl<V: Clone + PartialEq + 'static> Widget for DropdownView<'_, V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        self.render_button(Rect::new(area.x, area.y, area.width, 1), buf);
        if !self.dropdown.is_open() {
            return;
        }

        let prompt = self.dropdown.popup().prompt();
        let prompt_rows = u16::from(prompt.is_some());
        let below = area.height - 1;

        let caption = self.caption_width().min(area.width.saturating_sub(1));
        let popup_width = u16::try_from(self.dropdown.width() - self.dropdown.caption_width())
            .unwrap_or(u16::MAX)
            .min(area.width - caption);
        let popup_height = u16::try_from(self.dropdown.popup_height())
            .unwrap_or(u16::MAX)
            .min(below.saturating_sub(prompt_rows));
        let popup_area = Rect::new(area.x + caption, area.y + 1, popup_width, popup_height);

        let rows_area = if self.dropdown.border() {
            let block = Block::bordered().border_style(self.styles.text);
            let inner = block.inner(popup_area);
            block.render(popup_area, buf);
            inner
        } else {
            popup_area
        };
        self.render_rows(rows_area, buf);

        if let Some(prompt) = prompt {
            let y = popup_area.bottom();
            if y < area.bottom() {
                let prompt_area = Rect::new(area.x, y, area.width, 1);
                self.render_prompt(prompt, prompt_area, buf);
            }
        }
    }
}

/// Style of a popup row.
pub fn row_style(styles: &DropdownStyles, focused: bool) -> Style {
    if focused {
        styles.focused
    } else {
        styles.text
    }
}

#[cfg(test)]
#[path = "dropdown_tests.rs"]
mod tests;
