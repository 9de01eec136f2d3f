//! Screen descriptions for the notification panel
//!
//! A [`Screen`] is rebuilt from [`UiState`] whenever an action chain has run,
//! so widgets never outlive the state they were laid out from. Buttons bind
//! to callback slots through [`Action::Run`]; [`DECLARED_ACTIONS`] lists
//! every slot name the screens use and is checked against the registry when
//! the runtime is created.

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;
use heapless::{String, Vec};

use crate::actions::ActionId;
use crate::ui::components::{Button, MultiLineText, TextComponent, TextSize};
use crate::ui::core::{
    Action, Drawable, ScreenId, TouchEvent, TouchResult, Touchable, WidgetId,
};
use crate::ui::state::UiState;
use crate::ui::styling::{ButtonVariant, ColorPalette, LIGHT_GRAY, Style};

/// Callback names referenced by the screens below.
pub const DECLARED_ACTIONS: &[&str] = &["get_id", "get_notify_info", "delete_notification"];

/// Pressing a list row selects it, then opens it.
pub const ROW_ACTIONS: &[ActionId] = &[ActionId::GetId, ActionId::GetNotifyInfo];

/// Pressing Delete selects the shown notification, then removes it.
pub const DELETE_ACTIONS: &[ActionId] = &[ActionId::GetId, ActionId::DeleteNotification];

pub const MAX_WIDGETS: usize = 16;

const MARGIN: i32 = 10;
const HEADER_HEIGHT: u32 = 30;
const ROW_HEIGHT: u32 = 32;
const ROW_GAP: u32 = 4;
const BUTTON_HEIGHT: u32 = 40;
const BUTTON_WIDTH: u32 = 120;

/// A widget owned by a screen.
///
/// `Drawable` is generic over the draw target and so not object-safe; the
/// enum stands in for a trait object.
#[derive(Debug, Clone)]
pub enum Element {
    Label(TextComponent),
    Body(MultiLineText),
    Button(Button),
}

impl Element {
    pub fn id(&self) -> WidgetId {
        match self {
            Element::Label(t) => t.id(),
            Element::Body(t) => t.id(),
            Element::Button(b) => b.id(),
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }
}

impl Drawable for Element {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            Element::Label(t) => t.draw(display),
            Element::Body(t) => t.draw(display),
            Element::Button(b) => b.draw(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            Element::Label(t) => t.bounds(),
            Element::Body(t) => t.bounds(),
            Element::Button(b) => b.bounds(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Element::Label(t) => t.is_dirty(),
            Element::Body(t) => t.is_dirty(),
            Element::Button(b) => b.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Element::Label(t) => t.mark_clean(),
            Element::Body(t) => t.mark_clean(),
            Element::Button(b) => b.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            Element::Label(t) => t.mark_dirty(),
            Element::Body(t) => t.mark_dirty(),
            Element::Button(b) => b.mark_dirty(),
        }
    }
}

/// A widget press that produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub widget: WidgetId,
    pub user_data: u32,
    pub action: Action,
}

/// The widget tree of one screen.
#[derive(Debug, Clone)]
pub struct Screen {
    id: ScreenId,
    bounds: Rectangle,
    palette: ColorPalette,
    elements: Vec<Element, MAX_WIDGETS>,
    dirty: bool,
}

impl Screen {
    /// Lay out the screen `state` currently points at.
    pub fn build(state: &UiState, bounds: Rectangle) -> Self {
        let mut screen = Self {
            id: state.screen(),
            bounds,
            palette: ColorPalette::default(),
            elements: Vec::new(),
            dirty: true,
        };
        match state.screen() {
            ScreenId::Main => screen.layout_main(state),
            ScreenId::Detail => screen.layout_detail(state),
        }
        screen
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Buttons on this screen, in layout order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.elements.iter().filter_map(Element::as_button)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.elements.iter().any(|e| e.is_dirty())
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Offer a touch event to every button; the first press that fires wins.
    ///
    /// Drag and release events reach every button so pressed state is
    /// always cleared.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Fired> {
        let mut fired = None;
        for element in self.elements.iter_mut() {
            let Element::Button(button) = element else {
                continue;
            };
            if fired.is_some() && matches!(event, TouchEvent::Press(_)) {
                break;
            }
            if let TouchResult::Action(action) = button.handle_touch(event) {
                fired = Some(Fired {
                    widget: button.id(),
                    user_data: button.user_data(),
                    action,
                });
            }
        }
        fired
    }

    /// Draw whatever changed since the last call. Returns whether anything
    /// was drawn.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<bool, D::Error> {
        if self.dirty {
            self.bounds
                .into_styled(PrimitiveStyle::with_fill(self.palette.background))
                .draw(display)?;
            for element in self.elements.iter() {
                element.draw(display)?;
            }
        } else {
            let mut drawn = false;
            for element in self.elements.iter().filter(|e| e.is_dirty()) {
                element.draw(display)?;
                drawn = true;
            }
            if !drawn {
                return Ok(false);
            }
        }

        self.dirty = false;
        for element in self.elements.iter_mut() {
            element.mark_clean();
        }
        Ok(true)
    }

    fn next_id(&self) -> WidgetId {
        self.elements.len() as WidgetId
    }

    fn push(&mut self, element: Element) {
        if self.elements.push(element).is_err() {
            log::warn!("Screen {:?} is full, dropping widget", self.id);
        }
    }

    fn width(&self) -> u32 {
        self.bounds.size.width
    }

    fn height(&self) -> u32 {
        self.bounds.size.height
    }

    fn layout_main(&mut self, state: &UiState) {
        let store = state.notifications();

        let mut header: String<32> = String::new();
        let _ = write!(header, "Notifications ({})", store.len());
        let label = TextComponent::new(
            self.next_id(),
            Rectangle::new(
                Point::new(MARGIN, 0),
                Size::new(self.width().saturating_sub(2 * MARGIN as u32), HEADER_HEIGHT),
            ),
            &header,
            TextSize::Large,
        );
        self.push(Element::Label(label));

        if store.is_empty() {
            let empty = TextComponent::new(
                self.next_id(),
                Rectangle::new(
                    Point::new(MARGIN, HEADER_HEIGHT as i32 + MARGIN),
                    Size::new(self.width().saturating_sub(2 * MARGIN as u32), ROW_HEIGHT),
                ),
                "No notifications",
                TextSize::Medium,
            )
            .with_alignment(Alignment::Center)
            .with_style(Style::new().with_foreground(LIGHT_GRAY));
            self.push(Element::Label(empty));
            return;
        }

        let top = HEADER_HEIGHT + ROW_GAP;
        let visible = (self.height().saturating_sub(top) / (ROW_HEIGHT + ROW_GAP)) as usize;
        if store.len() > visible {
            log::debug!("Showing {} of {} notifications", visible, store.len());
        }

        for (index, notification) in store.iter().take(visible).enumerate() {
            let y = top + index as u32 * (ROW_HEIGHT + ROW_GAP);
            let row = Button::new(
                self.next_id(),
                Rectangle::new(
                    Point::new(MARGIN, y as i32),
                    Size::new(self.width().saturating_sub(2 * MARGIN as u32), ROW_HEIGHT),
                ),
                notification.title(),
                Action::Run(ROW_ACTIONS),
            )
            .with_user_data(notification.id())
            .with_variant(ButtonVariant::Row)
            .with_palette(self.palette);
            self.push(Element::Button(row));
        }
    }

    fn layout_detail(&mut self, state: &UiState) {
        let content_width = self.width().saturating_sub(2 * MARGIN as u32);
        let buttons_y = self.height() as i32 - BUTTON_HEIGHT as i32 - MARGIN;

        match state.detail() {
            Some(notification) => {
                let title = TextComponent::new(
                    self.next_id(),
                    Rectangle::new(Point::new(MARGIN, 0), Size::new(content_width, HEADER_HEIGHT)),
                    notification.title(),
                    TextSize::Large,
                );
                self.push(Element::Label(title));

                let body_top = HEADER_HEIGHT as i32 + MARGIN;
                let body = MultiLineText::new(
                    self.next_id(),
                    Rectangle::new(
                        Point::new(MARGIN, body_top),
                        Size::new(content_width, (buttons_y - MARGIN - body_top).max(0) as u32),
                    ),
                    notification.body(),
                    TextSize::Medium,
                );
                self.push(Element::Body(body));

                let delete = Button::new(
                    self.next_id(),
                    Rectangle::new(
                        Point::new(MARGIN, buttons_y),
                        Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
                    ),
                    "Delete",
                    Action::Run(DELETE_ACTIONS),
                )
                .with_user_data(notification.id())
                .with_variant(ButtonVariant::Danger)
                .with_palette(self.palette);
                self.push(Element::Button(delete));
            }
            None => {
                let missing = TextComponent::new(
                    self.next_id(),
                    Rectangle::new(
                        Point::new(MARGIN, HEADER_HEIGHT as i32),
                        Size::new(content_width, ROW_HEIGHT),
                    ),
                    "Notification unavailable",
                    TextSize::Medium,
                )
                .with_style(Style::new().with_foreground(LIGHT_GRAY));
                self.push(Element::Label(missing));
            }
        }

        let back = Button::new(
            self.next_id(),
            Rectangle::new(
                Point::new(
                    self.width() as i32 - MARGIN - BUTTON_WIDTH as i32,
                    buttons_y,
                ),
                Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
            ),
            "Back",
            Action::Navigate(ScreenId::Main),
        )
        .with_palette(self.palette);
        self.push(Element::Button(back));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionRegistry;
    use crate::config::DisplayConfig;
    use crate::ui::core::TouchPoint;
    use embedded_graphics::mock_display::MockDisplay;

    fn bounds() -> Rectangle {
        DisplayConfig::default().bounds()
    }

    fn centre(button: &Button) -> TouchPoint {
        let c = button.bounds().center();
        TouchPoint::new(c.x as u16, c.y as u16)
    }

    #[test]
    fn test_declared_actions_resolve() {
        let registry = ActionRegistry::from_declared(DECLARED_ACTIONS).unwrap();
        for action in ROW_ACTIONS.iter().chain(DELETE_ACTIONS) {
            assert!(registry.contains(*action));
        }
    }

    #[test]
    fn test_main_has_one_row_per_notification() {
        let mut state = UiState::default();
        let a = state.notifications_mut().push("Door", "Front door opened").unwrap();
        let b = state.notifications_mut().push("Laundry", "Washer finished").unwrap();

        let screen = Screen::build(&state, bounds());
        let rows: Vec<(&str, u32), 4> = screen
            .buttons()
            .map(|r| (r.label(), r.user_data()))
            .collect();

        assert_eq!(screen.id(), ScreenId::Main);
        assert_eq!(rows.as_slice(), &[("Door", a), ("Laundry", b)]);
        assert!(screen.buttons().all(|r| r.action() == Action::Run(ROW_ACTIONS)));
    }

    #[test]
    fn test_empty_main_shows_placeholder() {
        let screen = Screen::build(&UiState::default(), bounds());
        assert_eq!(screen.buttons().count(), 0);
        assert!(screen.elements().iter().any(|e| matches!(
            e,
            Element::Label(t) if t.text() == "No notifications"
        )));
    }

    #[test]
    fn test_rows_are_limited_to_screen_height() {
        let mut state = UiState::default();
        for _ in 0..8 {
            state.notifications_mut().push("Ping", "").unwrap();
        }
        let screen = Screen::build(&state, bounds());
        // (240 - 34) / 36 rows fit
        assert_eq!(screen.buttons().count(), 5);
    }

    #[test]
    fn test_detail_binds_delete_and_back() {
        let mut state = UiState::default();
        let id = state.notifications_mut().push("Door", "Front door opened").unwrap();
        let detail = state.notifications().get(id).cloned();
        state.show_detail(detail);
        state.navigate(ScreenId::Detail);

        let screen = Screen::build(&state, bounds());
        let buttons: Vec<&Button, 2> = screen.buttons().collect();

        assert_eq!(buttons[0].label(), "Delete");
        assert_eq!(buttons[0].action(), Action::Run(DELETE_ACTIONS));
        assert_eq!(buttons[0].user_data(), id);
        assert_eq!(buttons[1].action(), Action::Navigate(ScreenId::Main));
    }

    #[test]
    fn test_detail_without_notification_still_offers_back() {
        let mut state = UiState::default();
        state.navigate(ScreenId::Detail);

        let screen = Screen::build(&state, bounds());
        let buttons: Vec<&Button, 2> = screen.buttons().collect();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label(), "Back");
    }

    #[test]
    fn test_narrow_bounds_build_both_screens() {
        let narrow = Rectangle::new(Point::zero(), Size::new(12, 240));
        let mut state = UiState::default();
        let id = state.notifications_mut().push("Door", "Front door opened").unwrap();

        let main = Screen::build(&state, narrow);
        assert_eq!(main.buttons().count(), 1);
        assert_eq!(main.buttons().next().unwrap().bounds().size.width, 0);

        let detail = state.notifications().get(id).cloned();
        state.show_detail(detail);
        state.navigate(ScreenId::Detail);
        let screen = Screen::build(&state, narrow);
        assert_eq!(screen.buttons().count(), 2);
    }

    #[test]
    fn test_press_reports_widget_and_user_data() {
        let mut state = UiState::default();
        state.notifications_mut().push("Door", "").unwrap();
        let second = state.notifications_mut().push("Laundry", "").unwrap();

        let mut screen = Screen::build(&state, bounds());
        let target = screen.buttons().nth(1).map(|b| (b.id(), centre(b))).unwrap();

        let fired = screen.handle_touch(TouchEvent::Press(target.1)).unwrap();
        assert_eq!(fired.widget, target.0);
        assert_eq!(fired.user_data, second);
        assert_eq!(fired.action, Action::Run(ROW_ACTIONS));

        assert_eq!(screen.handle_touch(TouchEvent::Release(target.1)), None);
    }

    #[test]
    fn test_draw_only_when_dirty() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);

        let mut screen = Screen::build(&UiState::default(), bounds());
        assert!(screen.draw(&mut display).unwrap());
        assert!(!screen.is_dirty());
        assert!(!screen.draw(&mut display).unwrap());

        screen.mark_dirty();
        assert!(screen.draw(&mut display).unwrap());
    }
}
