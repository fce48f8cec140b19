use bevy::prelude::*;

pub(super) fn label_color() -> Color {
    Color::BLACK
}
pub(super) fn label_active_color() -> Color {
    Color::srgb(0.78, 0.0, 0.0)
}
pub(super) fn field_bg() -> Color {
    Color::srgb(0.86, 0.86, 0.86)
}
pub(super) fn field_active_bg() -> Color {
    Color::srgb(1.0, 1.0, 0.59)
}
pub(super) fn field_border() -> Color {
    Color::BLACK
}
pub(super) fn field_text() -> Color {
    Color::BLACK
}
pub(super) fn start_bg() -> Color {
    Color::srgb(0.0, 0.78, 0.0)
}
pub(super) fn start_hover_bg() -> Color {
    Color::srgb(0.0, 0.66, 0.0)
}
pub(super) fn start_text() -> Color {
    Color::WHITE
}
pub(super) fn status_error_color() -> Color {
    Color::srgb(0.78, 0.0, 0.0)
}
