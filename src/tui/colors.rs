//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Badge colors for the repeat column, one per recurrence kind.
// One-time tasks use the terminal default.

/// Used for daily tasks
pub const DAILY_GREEN: Color = Color::Rgb(0, 130, 60);
/// Used for weekly tasks
pub const WEEKLY_GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for monthly tasks
pub const MONTHLY_PURPLE: Color = Color::Rgb(146, 96, 170);
/// Used for checked-off tasks
pub const DONE_GRAY: Color = Color::Rgb(110, 110, 110);
