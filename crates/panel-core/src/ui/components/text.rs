//! Text components: single-line labels and word-wrapped blocks

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::{String, Vec};

use crate::error::truncated;
use crate::ui::core::{Drawable, WidgetId};
use crate::ui::styling::Style;

/// Longest wrapped line, in bytes
pub const LINE_LEN: usize = 64;
/// Most lines a [`MultiLineText`] keeps
pub const MAX_LINES: usize = 8;

/// Text size presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }
}

/// Single-line label
#[derive(Debug, Clone)]
pub struct TextComponent {
    id: WidgetId,
    bounds: Rectangle,
    text: String<LINE_LEN>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextComponent {
    pub fn new(id: WidgetId, bounds: Rectangle, text: &str, size: TextSize) -> Self {
        Self {
            id,
            bounds,
            text: truncated(text),
            size,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Update the displayed text, marking dirty only on change.
    pub fn set_text(&mut self, text: &str) {
        let text: String<LINE_LEN> = truncated(text);
        if self.text != text {
            self.text = text;
            self.dirty = true;
        }
    }

    fn anchor(&self) -> Point {
        let y = self.bounds.center().y;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x, y),
            Alignment::Center => Point::new(self.bounds.center().x, y),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32 - 1,
                y,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.background_color.is_some() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.text, self.anchor(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Word-wrapped text block
#[derive(Debug, Clone)]
pub struct MultiLineText {
    id: WidgetId,
    bounds: Rectangle,
    lines: Vec<String<LINE_LEN>, MAX_LINES>,
    size: TextSize,
    line_spacing: u32,
    style: Style,
    dirty: bool,
}

impl MultiLineText {
    pub fn new(id: WidgetId, bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let max_chars = (bounds.size.width / size.font().character_size.width) as usize;
        Self {
            id,
            bounds,
            lines: wrap_lines(text, max_chars),
            size,
            line_spacing: 2,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn lines(&self) -> &[String<LINE_LEN>] {
        &self.lines
    }
}

impl Drawable for MultiLineText {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        let line_height = (self.size.font().character_size.height + self.line_spacing) as i32;
        let bottom = self.bounds.top_left.y + self.bounds.size.height as i32;

        let mut position = self.bounds.top_left;
        for line in &self.lines {
            if position.y + line_height > bottom {
                break;
            }
            Text::with_text_style(line, position, character_style, text_style).draw(display)?;
            position.y += line_height;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Greedy word wrap on whitespace; words longer than a line are split.
///
/// A line ends at `max_chars` characters or when the next character would
/// not fit in [`LINE_LEN`] bytes, whichever comes first. Explicit newlines
/// start a new line. Output stops at [`MAX_LINES`].
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String<LINE_LEN>, MAX_LINES> {
    let max_chars = max_chars.clamp(1, LINE_LEN);
    let mut lines: Vec<String<LINE_LEN>, MAX_LINES> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current: String<LINE_LEN> = String::new();
        let mut current_chars = 0;

        for word in paragraph.split_whitespace() {
            let word_chars = word.chars().count();
            let overflows = current_chars + 1 + word_chars > max_chars
                || current.len() + 1 + word.len() > LINE_LEN;

            if current_chars > 0 && overflows {
                if lines.push(core::mem::take(&mut current)).is_err() {
                    return lines;
                }
                current_chars = 0;
            }

            // Checked above: the separator and the whole word fit
            if current_chars > 0 && current.push(' ').is_ok() {
                current_chars += 1;
            }

            for c in word.chars() {
                if current_chars == max_chars || current.len() + c.len_utf8() > LINE_LEN {
                    if lines.push(core::mem::take(&mut current)).is_err() {
                        return lines;
                    }
                    current_chars = 0;
                }
                // An empty line always has room for one char
                if current.push(c).is_ok() {
                    current_chars += 1;
                }
            }
        }

        if lines.push(current).is_err() {
            return lines;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strs(lines: &[String<LINE_LEN>]) -> Vec<&str, MAX_LINES> {
        lines.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap_lines("Washer finished the delicate cycle", 16);
        assert_eq!(
            as_strs(&lines).as_slice(),
            &["Washer finished", "the delicate", "cycle"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_lines("abcdefghij", 4);
        assert_eq!(as_strs(&lines).as_slice(), &["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = wrap_lines("one\ntwo", 20);
        assert_eq!(as_strs(&lines).as_slice(), &["one", "two"]);
    }

    #[test]
    fn test_wrap_keeps_every_multibyte_char() {
        let mut body: String<96> = String::new();
        for _ in 0..40 {
            body.push('é').unwrap();
        }
        let lines = wrap_lines(&body, 50);

        // 32 two-byte chars fill a line buffer
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 32);
        let total: usize = lines.iter().map(|l| l.chars().count()).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_wrap_breaks_multibyte_words_by_bytes() {
        // Two 20-char words: 41 chars fit the budget, 81 bytes do not
        let mut word: String<40> = String::new();
        for _ in 0..20 {
            word.push('ü').unwrap();
        }
        let mut body: String<96> = String::new();
        body.push_str(&word).unwrap();
        body.push(' ').unwrap();
        body.push_str(&word).unwrap();

        let lines = wrap_lines(&body, 64);
        assert_eq!(as_strs(&lines).as_slice(), &[word.as_str(), word.as_str()]);
    }

    #[test]
    fn test_wrap_stops_at_line_limit() {
        let lines = wrap_lines("a b c d e f g h i j k", 1);
        assert_eq!(lines.len(), MAX_LINES);
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut label = TextComponent::new(
            0,
            Rectangle::new(Point::zero(), Size::new(100, 12)),
            "3 notifications",
            TextSize::Medium,
        );
        label.mark_clean();

        label.set_text("3 notifications");
        assert!(!label.is_dirty());

        label.set_text("2 notifications");
        assert!(label.is_dirty());
        assert_eq!(label.text(), "2 notifications");
    }
}
