//! Password gate shown before a protected deck.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::render::text;
use crate::theme::Theme;

const SHAKE_DURATION: Duration = Duration::from_millis(500);
const SHAKE_AMPLITUDE: f32 = 5.0;
const SHAKE_CYCLES: f32 = 5.0;
const ERROR_MESSAGE: &str = "Incorrect password. Please try again.";

pub struct PasswordGate {
    expected: String,
    input: String,
    error: Option<String>,
    shake_start: Option<Instant>,
    unlocked: bool,
}

impl PasswordGate {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            input: String::new(),
            error: None,
            shake_start: None,
            unlocked: false,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the typed text. Any previous error is cleared.
    pub fn edit(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }

    /// Check the typed text. Returns true once unlocked.
    pub fn submit(&mut self, now: Instant) -> bool {
        if self.input == self.expected {
            tracing::info!("deck unlocked");
            self.unlocked = true;
            self.error = None;
        } else {
            tracing::debug!("wrong password");
            self.error = Some(ERROR_MESSAGE.to_string());
            self.shake_start = Some(now);
        }
        self.unlocked
    }

    /// Horizontal offset of the form while the wrong-password shake runs.
    pub fn shake_offset(&self, now: Instant) -> f32 {
        let Some(start) = self.shake_start else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= SHAKE_DURATION {
            return 0.0;
        }
        let t = elapsed.as_secs_f32() / SHAKE_DURATION.as_secs_f32();
        -(t * SHAKE_CYCLES * std::f32::consts::TAU).sin() * SHAKE_AMPLITUDE
    }

    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake_start
            .is_some_and(|start| now.saturating_duration_since(start) < SHAKE_DURATION)
    }

    /// Draw the form centered in `rect`.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        let now = Instant::now();
        if self.is_shaking(now) {
            ui.ctx().request_repaint();
        }

        let width = 384.0 * scale;
        let center_x = rect.center().x + self.shake_offset(now) * scale;
        let mut y = rect.center().y - 150.0 * scale;

        let title = ui.painter().layout_no_wrap(
            "Protected Presentation".to_string(),
            egui::FontId::proportional(20.0 * scale),
            theme.heading_color,
        );
        y += text::paint_centered(ui, title, center_x, y) + 8.0 * scale;
        let hint = ui.painter().layout(
            "Enter the password to view this presentation".to_string(),
            egui::FontId::proportional(14.0 * scale),
            Theme::with_opacity(theme.overlay, 0.5),
            width,
        );
        y += text::paint_centered(ui, hint, center_x, y) + 32.0 * scale;

        let left = center_x - width / 2.0;
        let field_h = 48.0 * scale;
        let mut input = self.input.clone();
        let field = egui::Rect::from_min_size(egui::pos2(left, y), egui::vec2(width, field_h));
        let response = ui.put(
            field,
            egui::TextEdit::singleline(&mut input)
                .password(true)
                .hint_text("Enter password")
                .font(egui::FontId::proportional(16.0 * scale))
                .margin(egui::vec2(16.0 * scale, 12.0 * scale))
                .desired_width(width),
        );
        if response.changed() {
            self.edit(input);
        }
        let border = if self.error().is_some() {
            theme.error
        } else {
            Theme::with_opacity(theme.overlay, 0.1)
        };
        ui.painter().rect_stroke(
            field,
            8.0 * scale,
            egui::Stroke::new(1.0, border),
            egui::StrokeKind::Inside,
        );
        y += field_h + 16.0 * scale;

        let mut submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if !response.has_focus() && !submitted {
            response.request_focus();
        }

        if let Some(error) = self.error() {
            let galley = ui.painter().layout(
                error.to_string(),
                egui::FontId::proportional(14.0 * scale),
                theme.error,
                width,
            );
            ui.painter()
                .galley(egui::pos2(left, y), galley.clone(), theme.error);
            y += galley.rect.height() + 16.0 * scale;
        }

        let button = egui::Rect::from_min_size(egui::pos2(left, y), egui::vec2(width, field_h));
        let clicked = ui.interact(button, ui.id().with("gate_submit"), egui::Sense::click());
        let fill = if clicked.hovered() { 0.9 } else { 1.0 };
        ui.painter().rect_filled(
            button,
            8.0 * scale,
            Theme::with_opacity(theme.heading_color, fill),
        );
        let label = ui.painter().layout_no_wrap(
            "View Presentation".to_string(),
            egui::FontId::proportional(16.0 * scale),
            theme.background,
        );
        let label_top = button.center().y - label.rect.height() / 2.0;
        text::paint_centered(ui, label, button.center().x, label_top);
        submitted |= clicked.clicked();

        if submitted {
            self.submit(now);
            response.request_focus();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_unlocks() {
        let mut gate = PasswordGate::new("printing-press");
        gate.edit("printing-press");
        assert!(gate.submit(Instant::now()));
        assert!(gate.is_unlocked());
        assert_eq!(gate.error(), None);
    }

    #[test]
    fn wrong_password_sets_error_and_shakes() {
        let mut gate = PasswordGate::new("secret");
        let t0 = Instant::now();
        gate.edit("guess");
        assert!(!gate.submit(t0));
        assert!(!gate.is_unlocked());
        assert_eq!(gate.error(), Some(ERROR_MESSAGE));
        assert!(gate.is_shaking(t0 + Duration::from_millis(100)));
        assert!(!gate.is_shaking(t0 + Duration::from_millis(500)));
        assert_eq!(gate.shake_offset(t0 + Duration::from_millis(600)), 0.0);
    }

    #[test]
    fn editing_clears_error() {
        let mut gate = PasswordGate::new("secret");
        gate.edit("nope");
        gate.submit(Instant::now());
        gate.edit("s");
        assert_eq!(gate.error(), None);
    }

    #[test]
    fn comparison_is_exact() {
        let mut gate = PasswordGate::new("Secret");
        gate.edit("secret");
        assert!(!gate.submit(Instant::now()));
        gate.edit("Secret ");
        assert!(!gate.submit(Instant::now()));
    }

    #[test]
    fn no_shake_before_first_attempt() {
        let gate = PasswordGate::new("x");
        assert_eq!(gate.shake_offset(Instant::now()), 0.0);
    }
}
