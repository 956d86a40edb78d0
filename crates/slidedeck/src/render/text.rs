use std::sync::Arc;

use eframe::egui::{self, Color32, FontId, Galley, text::LayoutJob};

use crate::parser::Inline;

/// Lay out inline text, drawing `Strong` spans in `strong_color`.
pub fn layout_inlines(
    ui: &egui::Ui,
    inlines: &[Inline],
    font: FontId,
    color: Color32,
    strong_color: Color32,
    wrap_width: f32,
    centered: bool,
) -> Arc<Galley> {
    let mut job = LayoutJob::default();
    for inline in inlines {
        let (text, color) = match inline {
            Inline::Text(s) => (s.as_str(), color),
            Inline::Strong(s) => (s.as_str(), strong_color),
        };
        job.append(
            text,
            0.0,
            egui::TextFormat {
                font_id: font.clone(),
                color,
                ..Default::default()
            },
        );
    }
    job.wrap.max_width = wrap_width;
    if centered {
        job.halign = egui::Align::Center;
    }
    ui.painter().layout_job(job)
}

pub fn layout_plain(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    wrap_width: f32,
) -> Arc<Galley> {
    ui.painter()
        .layout(text.to_string(), font, color, wrap_width)
}

/// Paint a galley so that its horizontal center sits at `center_x`.
/// Returns the painted height.
pub fn paint_centered(ui: &egui::Ui, galley: Arc<Galley>, center_x: f32, top: f32) -> f32 {
    let height = galley.rect.height();
    let pos = egui::pos2(center_x - galley.rect.width() / 2.0 - galley.rect.left(), top);
    ui.painter().galley(pos, galley, Color32::TRANSPARENT);
    height
}
