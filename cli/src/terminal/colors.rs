use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const URL: Color = Color::BrightCyan;
pub const STATUS_OK: Color = Color::Green;
pub const STATUS_REDIRECT: Color = Color::Yellow;
pub const STATUS_ERROR: Color = Color::Red;
pub const MISSING: Color = Color::BrightBlack;
