//! Navigation chrome: arrows, counter, progress bar and dot indicators.
//!
//! Every size here is multiplied by the current viewport scale so the chrome
//! grows in lockstep with the slide content.

use eframe::egui;

use crate::navigator::{Intent, Navigator};
use crate::theme::Theme;

const REM: f32 = 16.0;
const PROGRESS_ANIMATION: f32 = 0.3;

/// Draw the chrome for `nav` and report the intent of any clicked control.
pub fn draw(
    ui: &egui::Ui,
    nav: &Navigator,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    footer: Option<&str>,
) -> Option<Intent> {
    let mut intent = None;

    if arrow_button(ui, theme, rect, scale, Side::Left, !nav.is_first()) {
        intent = Some(Intent::Previous);
    }
    if arrow_button(ui, theme, rect, scale, Side::Right, !nav.is_last()) {
        intent = Some(Intent::Next);
    }

    progress_bar(ui, theme, rect, scale, nav.progress());
    counter(ui, theme, rect, scale, nav.current_slide(), nav.total_slides());
    if let Some(index) = dots(ui, theme, rect, scale, nav.current_slide(), nav.total_slides()) {
        intent = Some(Intent::GoTo(index));
    }

    if let Some(footer) = footer {
        let color = Theme::with_opacity(theme.overlay, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.to_string(),
            egui::FontId::proportional(0.875 * REM * scale),
            color,
        );
        let pos = egui::pos2(
            rect.left() + REM * scale,
            rect.bottom() - REM * scale - galley.rect.height(),
        );
        ui.painter().galley(pos, galley, color);
    }

    intent
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

/// Returns true when clicked. Disabled buttons are dimmed and ignore clicks.
fn arrow_button(
    ui: &egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    side: Side,
    enabled: bool,
) -> bool {
    let icon = 1.5 * REM * scale;
    let diameter = icon + 2.0 * 0.75 * REM * scale;
    let inset = REM * scale;
    let center_x = match side {
        Side::Left => rect.left() + inset + diameter / 2.0,
        Side::Right => rect.right() - inset - diameter / 2.0,
    };
    let center = egui::pos2(center_x, rect.center().y);
    let hit = egui::Rect::from_center_size(center, egui::vec2(diameter, diameter));

    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let response = ui.interact(hit, ui.id().with(("arrow", side == Side::Left)), sense);
    let hovered = enabled && response.hovered();
    let dim = if enabled { 1.0 } else { 0.3 };

    let fill = if hovered { 0.2 } else { 0.1 };
    ui.painter().circle_filled(
        center,
        diameter / 2.0,
        Theme::with_opacity(theme.overlay, fill * dim),
    );

    let stroke_color = Theme::with_opacity(theme.overlay, if hovered { 1.0 } else { 0.7 } * dim);
    let stroke = egui::Stroke::new(2.0 * scale, stroke_color);
    let half = icon / 4.0;
    let (tip_dx, arm_dx) = match side {
        Side::Left => (-half / 2.0, half / 2.0),
        Side::Right => (half / 2.0, -half / 2.0),
    };
    let tip = center + egui::vec2(tip_dx, 0.0);
    ui.painter()
        .line_segment([center + egui::vec2(arm_dx, -half), tip], stroke);
    ui.painter()
        .line_segment([tip, center + egui::vec2(arm_dx, half)], stroke);

    enabled && response.clicked()
}

/// Width of the filled part of a bar `total_width` wide.
pub fn progress_fill_width(total_width: f32, progress: f32) -> f32 {
    total_width * progress.clamp(0.0, 1.0)
}

fn progress_bar(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32, progress: f32) {
    let height = 0.25 * REM * scale;
    let track = egui::Rect::from_min_max(
        egui::pos2(rect.left(), rect.bottom() - height),
        rect.right_bottom(),
    );
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.overlay, 0.1));

    let animated = ui.ctx().animate_value_with_time(
        ui.id().with("progress"),
        progress,
        PROGRESS_ANIMATION,
    );
    let fill = egui::Rect::from_min_size(
        track.min,
        egui::vec2(progress_fill_width(track.width(), animated), height),
    );
    ui.painter()
        .rect_filled(fill, 0.0, Theme::with_opacity(theme.overlay, 0.7));
}

fn counter(
    ui: &egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    current: usize,
    total: usize,
) {
    let color = Theme::with_opacity(theme.overlay, 0.7);
    let galley = ui.painter().layout_no_wrap(
        counter_label(current, total),
        egui::FontId::proportional(0.875 * REM * scale),
        color,
    );
    let pad = egui::vec2(0.75 * REM * scale, 0.25 * REM * scale);
    let size = galley.rect.size() + pad * 2.0;
    let pill = egui::Rect::from_min_size(
        egui::pos2(
            rect.right() - REM * scale - size.x,
            rect.bottom() - REM * scale - size.y,
        ),
        size,
    );
    ui.painter().rect_filled(
        pill,
        size.y / 2.0,
        Theme::with_opacity(theme.overlay, 0.1),
    );
    ui.painter().galley(pill.min + pad, galley, color);
}

pub fn counter_label(current: usize, total: usize) -> String {
    format!("{} / {}", current + 1, total)
}

/// Widths of each dot indicator; the active one is twice as wide.
pub fn dot_widths(total: usize, current: usize, scale: f32) -> Vec<f32> {
    (0..total)
        .map(|i| {
            if i == current {
                REM * scale
            } else {
                0.5 * REM * scale
            }
        })
        .collect()
}

fn dots(
    ui: &egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    current: usize,
    total: usize,
) -> Option<usize> {
    let height = 0.5 * REM * scale;
    let gap = 0.5 * REM * scale;
    let widths = dot_widths(total, current, scale);
    let row_width = widths.iter().sum::<f32>() + gap * total.saturating_sub(1) as f32;

    let mut x = rect.center().x - row_width / 2.0;
    let y = rect.bottom() - REM * scale - height;
    let mut clicked = None;

    for (i, w) in widths.into_iter().enumerate() {
        let dot = egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, height));
        let response = ui.interact(
            dot.expand(gap / 2.0),
            ui.id().with(("dot", i)),
            egui::Sense::click(),
        );
        if response.clicked() {
            clicked = Some(i);
        }
        let alpha = if i == current {
            1.0
        } else if response.hovered() {
            0.5
        } else {
            0.3
        };
        ui.painter()
            .rect_filled(dot, height / 2.0, Theme::with_opacity(theme.overlay, alpha));
        x += w + gap;
    }
    clicked
}
