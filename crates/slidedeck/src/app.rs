use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use crate::background::{StarMode, Starfield};
use crate::config::Config;
use crate::error::DeckError;
use crate::gate::PasswordGate;
use crate::navigator::input::Key;
use crate::navigator::scope::NavigationHandle;
use crate::navigator::{Intent, Navigator};
use crate::parser::{self, Presentation};
use crate::render::{self, chrome};
use crate::scale::ScaleState;
use crate::theme::Theme;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;
const ESC_QUIT_WINDOW: f32 = 1.0;
/// Points per wheel "line", close to what browsers report for a notch.
const POINTS_PER_LINE: f32 = 100.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Input gathered inside `ctx.input` and acted on afterwards.
enum Action {
    Nav(Key),
    Wheel { forward_x: f32, forward_y: f32 },
    TouchStart(f32),
    TouchMove(f32),
    TouchEnd,
    TouchCancel,
    ToggleTheme,
    CycleStars,
    Escape,
}

struct PresentationApp {
    presentation: Presentation,
    nav: NavigationHandle,
    theme: Theme,
    scale: ScaleState,
    starfield: Starfield,
    star_mode: StarMode,
    config: Config,
    gate: Option<PasswordGate>,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    fatal: Rc<RefCell<Option<DeckError>>>,
}

impl PresentationApp {
    fn new(
        presentation: Presentation,
        nav: NavigationHandle,
        theme: Theme,
        config: Config,
        fatal: Rc<RefCell<Option<DeckError>>>,
    ) -> Self {
        let gate = presentation.meta.password.clone().map(PasswordGate::new);
        Self {
            scale: ScaleState::new(config.scaler()),
            star_mode: config.star_mode(),
            starfield: Starfield::new(),
            presentation,
            nav,
            theme,
            config,
            gate,
            toast: None,
            last_esc: None,
            fatal,
        }
    }

    fn is_locked(&self) -> bool {
        self.gate.as_ref().is_some_and(|g| !g.is_unlocked())
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn cycle_star_mode(&mut self) {
        self.star_mode = self.star_mode.cycled();
        self.config.set_star_mode(self.star_mode);
        if let Err(e) = self.config.save() {
            tracing::warn!("could not save star mode: {e}");
        }
        self.toast = Some(Toast::new(format!("Stars: {}", self.star_mode.label())));
    }

    fn collect_actions(
        &self,
        i: &egui::InputState,
        viewport_cmds: &mut Vec<egui::ViewportCommand>,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        if i.key_pressed(egui::Key::Q) && !self.is_locked() {
            viewport_cmds.push(egui::ViewportCommand::Close);
            return actions;
        }
        if i.key_pressed(egui::Key::Escape) {
            actions.push(Action::Escape);
            return actions;
        }
        if i.key_pressed(egui::Key::F) && !self.is_locked() {
            viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                !i.viewport().fullscreen.unwrap_or(false),
            ));
            return actions;
        }
        if self.is_locked() {
            return actions;
        }
        if i.key_pressed(egui::Key::D) {
            actions.push(Action::ToggleTheme);
        }
        if i.key_pressed(egui::Key::S) {
            actions.push(Action::CycleStars);
        }

        let page = i.viewport().inner_rect.map_or(720.0, |r| r.height());
        for event in &i.events {
            match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => actions.push(Action::Nav(nav_key(*key))),
                egui::Event::MouseWheel { unit, delta, .. } => {
                    let factor = match unit {
                        egui::MouseWheelUnit::Point => 1.0,
                        egui::MouseWheelUnit::Line => POINTS_PER_LINE,
                        egui::MouseWheelUnit::Page => page,
                    };
                    // egui reports content motion; forward is the opposite sign.
                    actions.push(Action::Wheel {
                        forward_x: -delta.x * factor,
                        forward_y: -delta.y * factor,
                    });
                }
                egui::Event::Touch { phase, pos, .. } => actions.push(match phase {
                    egui::TouchPhase::Start => Action::TouchStart(pos.x),
                    egui::TouchPhase::Move => Action::TouchMove(pos.x),
                    egui::TouchPhase::End => Action::TouchEnd,
                    egui::TouchPhase::Cancel => Action::TouchCancel,
                }),
                _ => {}
            }
        }
        actions
    }

    fn apply_action(
        &mut self,
        action: Action,
        now: Instant,
        viewport_cmds: &mut Vec<egui::ViewportCommand>,
    ) {
        match action {
            Action::Nav(key) => {
                if !self.nav.with_mut(|n| n.handle_key(key)) {
                    tracing::trace!(?key, "key not bound to navigation");
                }
            }
            Action::Wheel {
                forward_x,
                forward_y,
            } => {
                self.nav.with_mut(|n| n.handle_wheel(forward_x, forward_y, now));
            }
            Action::TouchStart(x) => self.nav.with_mut(|n| n.touch_start(x)),
            Action::TouchMove(x) => self.nav.with_mut(|n| n.touch_move(x)),
            Action::TouchEnd => {
                self.nav.with_mut(|n| n.touch_end());
            }
            Action::TouchCancel => self.nav.with_mut(|n| n.touch_cancel()),
            Action::ToggleTheme => self.toggle_theme(),
            Action::CycleStars => self.cycle_star_mode(),
            Action::Escape => {
                if let Some(last) = self.last_esc {
                    if now.saturating_duration_since(last).as_secs_f32() < ESC_QUIT_WINDOW {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(now);
                self.toast = Some(Toast::new("Press Esc again to exit".to_string()));
            }
        }
    }

    fn draw_presentation(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        scale: f32,
        now: Instant,
    ) -> Result<Option<Intent>, DeckError> {
        let views = self.nav.with(|n| n.visible_views(now));
        let current = self.nav.with(|n| n.current_slide());

        self.nav.provide(|| -> Result<(), DeckError> {
            for (index, phase, progress) in views {
                let Some(slide) = self.presentation.deck.get(index) else {
                    continue;
                };
                let placement = phase.placement(progress);
                let slide_rect = rect.translate(egui::vec2(placement.offset * rect.width(), 0.0));
                render::render_slide(
                    ui,
                    slide,
                    &self.theme,
                    slide_rect,
                    placement.opacity,
                    scale,
                    index == current,
                )?;
            }
            Ok(())
        })?;

        let footer = self.presentation.meta.footer.as_deref();
        Ok(self
            .nav
            .with(|n| chrome::draw(ui, n, &self.theme, rect, scale, footer)))
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 120.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        ui.painter().rect_stroke(
            toast_rect,
            8.0 * scale,
            egui::Stroke::new(1.0, Theme::with_opacity(self.theme.overlay, 0.2 * opacity)),
            egui::StrokeKind::Inside,
        );
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
        ui.ctx().request_repaint();
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Viewport commands go out after the input closure; sending inside
        // ctx.input() deadlocks.
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let actions = ctx.input(|i| self.collect_actions(i, &mut viewport_cmds));
        for action in actions {
            self.apply_action(action, now, &mut viewport_cmds);
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        self.starfield.step(self.star_mode);
        if self.star_mode.motion_enabled() {
            ctx.request_repaint();
        }

        let bg = self.theme.background;
        let mut clicked = None;
        let mut failure = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                self.scale.resize(rect.width());
                let scale = self.scale.scale();

                self.starfield.paint(
                    ui.painter(),
                    rect,
                    self.theme.overlay,
                    self.star_mode,
                );

                if let Some(gate) = self.gate.as_mut().filter(|g| !g.is_unlocked()) {
                    gate.show(ui, &self.theme, rect, scale);
                } else {
                    match self.draw_presentation(ui, rect, scale, now) {
                        Ok(intent) => clicked = intent,
                        Err(e) => failure = Some(e),
                    }
                }

                self.draw_toast(ui, rect, scale);
            });

        if let Some(intent) = clicked {
            self.nav.with_mut(|n| n.apply(intent));
        }
        if self.nav.with_mut(|n| n.settle(now)) {
            ctx.request_repaint();
        }

        if let Some(e) = failure {
            tracing::error!("{e}");
            *self.fatal.borrow_mut() = Some(e);
            viewport_cmds.push(egui::ViewportCommand::Close);
        }
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
    }
}

/// Convert a 1-based `--slide` value to an index no larger than `last`.
fn start_index(requested: Option<usize>, last: usize) -> usize {
    requested.map_or(0, |s| s.saturating_sub(1)).min(last)
}

/// Map an egui key onto the navigator's key table.
fn nav_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::Space => Key::Space,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::Home => Key::Home,
        egui::Key::End => Key::End,
        _ => Key::Other,
    }
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let presentation = parser::parse(&content)
        .map_err(|e| anyhow::anyhow!("{}: {e}", file.display()))?;

    let title = presentation.meta.title.clone().unwrap_or_else(|| {
        format!(
            "slidedeck - {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let config = Config::load_or_default();
    let theme_name = presentation
        .meta
        .theme
        .as_deref()
        .or(config.theme_name())
        .unwrap_or("dark");
    let theme = Theme::from_name(theme_name);

    let total = presentation.deck.len();
    let navigator = Navigator::new(total)?
        .with_settings(&config.input_settings())
        .starting_at(start_index(start_slide, presentation.deck.last_index()));
    let nav = NavigationHandle::new(navigator);

    tracing::info!(slides = total, theme = %theme.name, "starting presentation");

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let fatal = Rc::new(RefCell::new(None));
    let app_fatal = Rc::clone(&fatal);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PresentationApp::new(
                presentation,
                nav,
                theme,
                config,
                app_fatal,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    if let Some(e) = fatal.borrow_mut().take() {
        return Err(e.into());
    }
    Ok(())
}
