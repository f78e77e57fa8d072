use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const STATE_ON: Color = Color::Green;
pub const STATE_OFF: Color = Color::Yellow;
pub const STATE_UNAVAILABLE: Color = Color::Red;

pub const VALUE: Color = Color::BrightWhite;
pub const EMPTY: Color = Color::BrightBlack;
pub const ADDRESS: Color = Color::BrightBlue;
pub const SECRET: Color = Color::Magenta;
