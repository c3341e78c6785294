//! Four-shade green LCD palette.

use ratatui::style::Color;

pub const DARKEST: Color = Color::Rgb(15, 56, 15);
pub const DARK: Color = Color::Rgb(48, 98, 48);
pub const LIGHT: Color = Color::Rgb(139, 172, 15);
pub const LIGHTEST: Color = Color::Rgb(155, 188, 15);

/// Unlit screen glass
pub const SCREEN_OFF: Color = Color::Rgb(38, 44, 32);

/// Power LED colours
pub const LED_ON: Color = Color::Rgb(230, 40, 40);
pub const LED_OFF: Color = Color::Rgb(70, 20, 20);
