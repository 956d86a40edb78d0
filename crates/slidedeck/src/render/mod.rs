pub mod chrome;
pub mod text;

use std::sync::Arc;

use eframe::egui::{self, FontId, Galley};

use crate::error::DeckError;
use crate::navigator::scope::{SlideNavigation, slide_navigation};
use crate::parser::{Block, Inline, LinkTarget, Slide};
use crate::theme::Theme;

const MAX_CONTENT_WIDTH: f32 = 1100.0;
const CARD_GAP: f32 = 32.0;
const CARD_PADDING: f32 = 32.0;
const CARD_LINE_GAP: f32 = 12.0;

enum Piece {
    Text {
        galley: Arc<Galley>,
        left_aligned: bool,
        gap_after: f32,
    },
    Links {
        cards: Vec<Card>,
        height: f32,
        gap_after: f32,
    },
}

struct Card {
    label: Arc<Galley>,
    detail: Option<Arc<Galley>>,
    target: LinkTarget,
}

impl Piece {
    fn height(&self) -> f32 {
        match self {
            Piece::Text {
                galley, gap_after, ..
            } => galley.rect.height() + gap_after,
            Piece::Links {
                height, gap_after, ..
            } => height + gap_after,
        }
    }
}

/// Paint one slide centered in `rect`.
///
/// Jump links are live only when `interactive` is set; clicking one asks
/// the navigator in scope to change slides.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    interactive: bool,
) -> Result<(), DeckError> {
    let padding = 64.0 * scale;
    let width = (rect.width() - padding * 2.0).min(MAX_CONTENT_WIDTH * scale).max(1.0);
    let pieces = layout_pieces(ui, slide, theme, width, opacity, scale);

    let total: f32 = pieces.iter().map(Piece::height).sum();
    let mut y = (rect.center().y - total / 2.0).max(rect.top() + padding);
    let center_x = rect.center().x;
    let left = center_x - width / 2.0;

    for (i, piece) in pieces.into_iter().enumerate() {
        let advance = piece.height();
        match piece {
            Piece::Text {
                galley,
                left_aligned,
                ..
            } => {
                if left_aligned {
                    ui.painter()
                        .galley(egui::pos2(left, y), galley, egui::Color32::TRANSPARENT);
                } else {
                    text::paint_centered(ui, galley, center_x, y);
                }
            }
            Piece::Links { cards, height, .. } => {
                let n = cards.len() as f32;
                let gap = CARD_GAP * scale;
                let card_w = (width - gap * (n - 1.0)) / n;
                for (j, card) in cards.into_iter().enumerate() {
                    let card_rect = egui::Rect::from_min_size(
                        egui::pos2(left + j as f32 * (card_w + gap), y),
                        egui::vec2(card_w, height),
                    );
                    draw_card(ui, card, card_rect, theme, opacity, scale, interactive, (i, j))?;
                }
            }
        }
        y += advance;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_card(
    ui: &egui::Ui,
    card: Card,
    rect: egui::Rect,
    theme: &Theme,
    opacity: f32,
    scale: f32,
    interactive: bool,
    salt: (usize, usize),
) -> Result<(), DeckError> {
    let mut hovered = false;
    let mut reachable = true;
    if interactive {
        let nav = slide_navigation()?;
        reachable = card
            .target
            .resolve(nav.current_slide(), nav.total_slides())
            .is_some();
        let sense = if reachable {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let response = ui.interact(rect, ui.id().with(("jump_link", salt)), sense);
        if reachable && response.clicked() {
            follow(&nav, card.target);
        }
        hovered = reachable && response.hovered();
    }

    let fill = if hovered { 0.10 } else { 0.05 };
    let dim = if reachable { 1.0 } else { 0.4 };
    ui.painter().rect_filled(
        rect,
        12.0 * scale,
        Theme::with_opacity(theme.overlay, fill * opacity),
    );
    let opacity = opacity * dim;

    let inner = CARD_PADDING * scale;
    let mut y = rect.top() + inner;
    let label_h = card.label.rect.height();
    ui.painter().galley_with_override_text_color(
        egui::pos2(rect.left() + inner, y),
        card.label,
        Theme::with_opacity(theme.heading_color, opacity),
    );
    y += label_h + CARD_LINE_GAP * scale;
    if let Some(detail) = card.detail {
        ui.painter().galley_with_override_text_color(
            egui::pos2(rect.left() + inner, y),
            detail,
            Theme::with_opacity(theme.foreground, opacity),
        );
    }
    Ok(())
}

fn follow(nav: &impl SlideNavigation, target: LinkTarget) {
    match target {
        LinkTarget::Slide(index) => nav.go_to_slide(index),
        LinkTarget::Next => nav.next(),
        LinkTarget::Previous => nav.previous(),
    }
}

struct Palette {
    fg: egui::Color32,
    strong: egui::Color32,
    muted: egui::Color32,
}

fn layout_pieces(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    width: f32,
    opacity: f32,
    scale: f32,
) -> Vec<Piece> {
    let palette = Palette {
        fg: Theme::with_opacity(theme.foreground, opacity),
        strong: Theme::with_opacity(theme.heading_color, opacity),
        muted: Theme::with_opacity(theme.overlay, 0.4 * opacity),
    };
    let body = FontId::proportional(theme.body_size * scale);

    let mut pieces = Vec::new();
    let mut links: Vec<(&str, Option<&str>, LinkTarget)> = Vec::new();

    for block in &slide.blocks {
        if let Block::JumpLink {
            label,
            detail,
            target,
        } = block
        {
            links.push((label.as_str(), detail.as_deref(), *target));
            continue;
        }
        flush_links(ui, &mut links, &mut pieces, theme, &palette, width, scale);

        let piece = match block {
            Block::Kicker(s) => Piece::Text {
                galley: text::layout_plain(
                    ui,
                    &s.to_uppercase(),
                    FontId::proportional(theme.kicker_size * scale),
                    palette.muted,
                    width,
                ),
                left_aligned: false,
                gap_after: 16.0 * scale,
            },
            Block::Heading { level, inlines } => Piece::Text {
                galley: text::layout_inlines(
                    ui,
                    inlines,
                    FontId::proportional(theme.heading_size(*level) * scale),
                    palette.strong,
                    palette.strong,
                    width,
                    true,
                ),
                left_aligned: false,
                gap_after: 32.0 * scale,
            },
            Block::Paragraph { inlines } => Piece::Text {
                galley: text::layout_inlines(
                    ui,
                    inlines,
                    body.clone(),
                    palette.fg,
                    palette.strong,
                    width,
                    true,
                ),
                left_aligned: false,
                gap_after: 20.0 * scale,
            },
            Block::Quote { inlines } => Piece::Text {
                galley: text::layout_inlines(
                    ui,
                    inlines,
                    FontId::proportional(theme.body_size * 1.3 * scale),
                    palette.strong,
                    palette.strong,
                    width,
                    true,
                ),
                left_aligned: false,
                gap_after: 32.0 * scale,
            },
            Block::List { items } => {
                let mut bulleted = Vec::new();
                for (n, item) in items.iter().enumerate() {
                    if n > 0 {
                        bulleted.push(Inline::Text("\n".to_string()));
                    }
                    bulleted.push(Inline::Text("\u{2022}  ".to_string()));
                    bulleted.extend(item.iter().cloned());
                }
                Piece::Text {
                    galley: text::layout_inlines(
                        ui,
                        &bulleted,
                        body.clone(),
                        palette.fg,
                        palette.strong,
                        width,
                        false,
                    ),
                    left_aligned: true,
                    gap_after: 20.0 * scale,
                }
            }
            Block::JumpLink { .. } => continue,
        };
        pieces.push(piece);
    }
    flush_links(ui, &mut links, &mut pieces, theme, &palette, width, scale);
    pieces
}

/// Turn a run of consecutive jump links into one row of equal-width cards.
fn flush_links(
    ui: &egui::Ui,
    links: &mut Vec<(&str, Option<&str>, LinkTarget)>,
    pieces: &mut Vec<Piece>,
    theme: &Theme,
    palette: &Palette,
    width: f32,
    scale: f32,
) {
    if links.is_empty() {
        return;
    }
    let n = links.len() as f32;
    let card_w = (width - CARD_GAP * scale * (n - 1.0)) / n;
    let wrap = (card_w - CARD_PADDING * scale * 2.0).max(1.0);

    let cards: Vec<Card> = links
        .drain(..)
        .map(|(label, detail, target)| Card {
            label: text::layout_plain(
                ui,
                label,
                FontId::proportional(theme.body_size * 1.1 * scale),
                palette.strong,
                wrap,
            ),
            detail: detail.map(|d| {
                text::layout_plain(
                    ui,
                    d,
                    FontId::proportional(theme.body_size * 0.8 * scale),
                    palette.fg,
                    wrap,
                )
            }),
            target,
        })
        .collect();

    let height = cards
        .iter()
        .map(|c| {
            c.label.rect.height()
                + c.detail
                    .as_ref()
                    .map_or(0.0, |d| d.rect.height() + CARD_LINE_GAP * scale)
                + CARD_PADDING * scale * 2.0
        })
        .fold(0.0, f32::max);
    pieces.push(Piece::Links {
        cards,
        height,
        gap_after: 40.0 * scale,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::Navigator;
    use crate::navigator::scope::NavigationHandle;

    #[test]
    fn cards_follow_each_kind_of_target() {
        let deck = NavigationHandle::new(Navigator::new(5).unwrap());
        deck.provide(|| -> Result<(), DeckError> {
            let nav = slide_navigation()?;
            follow(&nav, LinkTarget::Slide(3));
            assert_eq!(nav.current_slide(), 3);
            follow(&nav, LinkTarget::Next);
            assert_eq!(nav.current_slide(), 4);
            follow(&nav, LinkTarget::Next);
            assert_eq!(nav.current_slide(), 4);
            follow(&nav, LinkTarget::Previous);
            assert_eq!(nav.current_slide(), 3);
            Ok(())
        })
        .unwrap();
    }
}
