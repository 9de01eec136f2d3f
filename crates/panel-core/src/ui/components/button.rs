//! Button component bound to a widget action

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::error::truncated;
use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable, WidgetId};
use crate::ui::styling::{ButtonVariant, ColorPalette, Style};

/// Horizontal inset of left-aligned row labels
const ROW_LABEL_INSET: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
}

/// Button with a label, an [`Action`] and a user-data word.
///
/// The action fires immediately on press. The user-data word is handed to
/// callbacks through [`ActionEvent::user_data`](crate::actions::ActionEvent::user_data);
/// list rows use it to carry the notification id.
///
/// # Examples
/// ```ignore
/// let row = Button::new(
///     7,
///     Rectangle::new(Point::new(10, 40), Size::new(300, 36)),
///     "Front door opened",
///     Action::Run(&[ActionId::GetId, ActionId::GetNotifyInfo]),
/// )
/// .with_user_data(notification.id())
/// .with_variant(ButtonVariant::Row);
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    id: WidgetId,
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    user_data: u32,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    border_radius: u32,
    dirty: bool,
}

impl Button {
    /// Create a Primary button. Labels longer than 32 bytes are truncated.
    pub fn new(id: WidgetId, bounds: Rectangle, label: &str, action: Action) -> Self {
        Self {
            id,
            bounds,
            label: truncated(label),
            action,
            user_data: 0,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            border_radius: 8,
            dirty: true,
        }
    }

    pub fn with_user_data(mut self, user_data: u32) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn user_data(&self) -> u32 {
        self.user_data
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                // Darken the background for pressed state
                let bg = base_style.background_color.unwrap_or(self.palette.accent);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let center = self.bounds.center();

        let (alignment, position) = match self.variant {
            ButtonVariant::Row => (
                Alignment::Left,
                Point::new(self.bounds.top_left.x + ROW_LABEL_INSET, center.y),
            ),
            _ => (Alignment::Center, center),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, position, character_style, text_style).draw(display)?;

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

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.set_state(ButtonState::Pressed);
                // Trigger action immediately on press
                TouchResult::Action(self.action)
            }
            TouchEvent::Drag(point) if self.is_pressed() => {
                // Stay pressed only while the finger is over the button
                let state = if self.contains_point(point) {
                    ButtonState::Pressed
                } else {
                    ButtonState::Normal
                };
                self.set_state(state);
                TouchResult::Handled
            }
            TouchEvent::Release(_) if self.is_pressed() => {
                self.set_state(ButtonState::Normal);
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionId;
    use crate::ui::core::ScreenId;
    use embedded_graphics::mock_display::MockDisplay;

    const DELETE: &[ActionId] = &[ActionId::DeleteNotification];

    fn button() -> Button {
        Button::new(
            2,
            Rectangle::new(Point::new(10, 10), Size::new(40, 20)),
            "Delete",
            Action::Run(DELETE),
        )
        .with_user_data(9)
    }

    #[test]
    fn test_press_inside_fires_action() {
        let mut b = button();
        let result = b.handle_touch(TouchEvent::Press(TouchPoint::new(20, 15)));
        assert_eq!(result, TouchResult::Action(Action::Run(DELETE)));
        assert!(b.is_pressed());
        assert_eq!(b.user_data(), 9);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut b = button();
        let result = b.handle_touch(TouchEvent::Press(TouchPoint::new(100, 100)));
        assert_eq!(result, TouchResult::NotHandled);
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_drag_off_and_release_reset_state() {
        let mut b = button();
        b.handle_touch(TouchEvent::Press(TouchPoint::new(20, 15)));

        assert_eq!(
            b.handle_touch(TouchEvent::Drag(TouchPoint::new(200, 15))),
            TouchResult::Handled
        );
        assert!(!b.is_pressed());

        b.handle_touch(TouchEvent::Drag(TouchPoint::new(20, 15)));
        // Not pressed anymore, so the drag back does not re-arm it
        assert!(!b.is_pressed());
        assert_eq!(
            b.handle_touch(TouchEvent::Release(TouchPoint::new(20, 15))),
            TouchResult::NotHandled
        );
    }

    #[test]
    fn test_navigate_action_is_reported() {
        let mut b = Button::new(
            1,
            Rectangle::new(Point::zero(), Size::new(10, 10)),
            "Back",
            Action::Navigate(ScreenId::Main),
        );
        assert_eq!(
            b.handle_touch(TouchEvent::Press(TouchPoint::new(5, 5))),
            TouchResult::Action(Action::Navigate(ScreenId::Main))
        );
    }

    #[test]
    fn test_draw_fills_bounds() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);

        let b = Button::new(
            0,
            Rectangle::new(Point::new(4, 4), Size::new(40, 20)),
            "OK",
            Action::Navigate(ScreenId::Main),
        );
        b.draw(&mut display).unwrap();

        // Center of the button is covered by either fill or label
        assert!(display.get_pixel(Point::new(8, 14)).is_some());
        assert_eq!(display.get_pixel(Point::new(60, 60)), None);
    }
}
