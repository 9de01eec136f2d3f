//! UI components library

pub mod button;
pub mod text;

pub use button::Button;
pub use text::{MultiLineText, TextComponent, TextSize};
