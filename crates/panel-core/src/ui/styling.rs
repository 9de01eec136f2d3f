//! Colors and styles for the panel UI
//!
//! Colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

/// Screen background - very dark blue-gray
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 31 >> 3);

/// Cards and list rows - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(30 >> 3, 38 >> 2, 50 >> 3);

/// Separators and outlines
pub const COLOR_STROKE: Rgb565 = Rgb565::new(60 >> 3, 72 >> 2, 90 >> 3);

/// Accent - soft blue
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(74 >> 3, 144 >> 2, 226 >> 3);

/// Destructive actions - muted red
pub const COLOR_DANGER: Rgb565 = Rgb565::new(190 >> 3, 75 >> 2, 75 >> 3);

pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// A cohesive color palette for consistent UI theming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    pub accent: Rgb565,
    pub danger: Rgb565,
    pub background: Rgb565,
    pub surface: Rgb565,
    pub text_primary: Rgb565,
    pub text_secondary: Rgb565,
    pub border: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            accent: COLOR_ACCENT,
            danger: COLOR_DANGER,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
            border: COLOR_STROKE,
        }
    }
}

/// Visual style configuration for a UI element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background_color: Option<Rgb565>,
    pub foreground_color: Option<Rgb565>,
    pub border_color: Option<Rgb565>,
    /// Border width in pixels (0 = no border)
    pub border_width: u32,
}

impl Default for Style {
    /// White text, no background or border
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(WHITE),
            border_color: None,
            border_width: 0,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    pub fn with_border(mut self, color: Rgb565, width: u32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    /// Converts this style to a `PrimitiveStyle` for embedded-graphics drawing
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color
            && self.border_width > 0
        {
            builder = builder.stroke_color(border).stroke_width(self.border_width);
        }

        builder.build()
    }
}

/// Predefined button looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    /// Main action on a screen
    Primary,
    /// Destructive action
    Danger,
    /// Full-width list row
    Row,
}

impl ButtonVariant {
    pub fn to_style(&self, palette: &ColorPalette) -> Style {
        match self {
            ButtonVariant::Primary => Style::new()
                .with_background(palette.accent)
                .with_foreground(WHITE),

            ButtonVariant::Danger => Style::new()
                .with_background(palette.danger)
                .with_foreground(WHITE),

            ButtonVariant::Row => Style::new()
                .with_background(palette.surface)
                .with_foreground(palette.text_primary)
                .with_border(palette.border, 1),
        }
    }
}
