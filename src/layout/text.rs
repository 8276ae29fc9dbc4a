use crate::config::LayoutConfig;
use crate::theme::Theme;

/// Approximate rendered width of `text` at the theme font size.
pub(super) fn text_width(text: &str, theme: &Theme, config: &LayoutConfig) -> f32 {
    text.chars().count() as f32 * theme.font_size * config.label_char_width
}

/// Cuts `text` to fit `max_width`, ending with an ellipsis when shortened.
/// Returns the text and whether it was clipped.
pub(super) fn clip_label(
    text: &str,
    max_width: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> (String, bool) {
    if text_width(text, theme, config) <= max_width {
        return (text.to_string(), false);
    }
    let char_width = (theme.font_size * config.label_char_width).max(f32::EPSILON);
    let fit = (max_width / char_width).floor() as usize;
    if fit <= 1 {
        return (String::new(), true);
    }
    let mut clipped: String = text.chars().take(fit - 1).collect();
    clipped.push('…');
    (clipped, true)
}
