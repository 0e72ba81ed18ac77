//! Terminal geometry

/// Default terminal width fallback if detection fails
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Get terminal width, defaulting to 80 if detection fails
///
/// Checks COLUMNS environment variable first (for testing and scripts),
/// then falls back to actual terminal size detection.
pub fn get_terminal_width() -> usize {
    if let Ok(cols) = std::env::var("COLUMNS")
        && let Ok(width) = cols.parse::<usize>()
        && width > 0
    {
        return width;
    }

    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}
