//! Decorative starfield painted behind the slides.
//!
//! The starfield keeps its own play/pause/visibility state. Slide
//! navigation never touches it.

use eframe::egui;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const PARTICLE_COUNT: usize = 2000;
const FIELD_WIDTH: f32 = 80.0;
const FIELD_HEIGHT: f32 = 60.0;
const FIELD_DEPTH: f32 = 80.0;
const ROTATION_Y_STEP: f32 = 0.0001;
const ROTATION_X_STEP: f32 = 0.00005;
const PARTICLE_SIZE: f32 = 0.04;
const PARTICLE_OPACITY: f32 = 0.8;
const CAMERA_Z: f32 = 15.0;
const NEAR_PLANE: f32 = 0.1;
const FOV_DEGREES: f32 = 75.0;

const SHOOTING_STAR_CHANCE: f64 = 0.015;
const SHOOTING_STAR_LIFE: f32 = 3.5;
const SHOOTING_STAR_OPACITY: f32 = 0.6;
const SHOOTING_STAR_VELOCITY: [f32; 3] = [-1.2, -0.8, 0.0];
const SHOOTING_STAR_TAIL: [f32; 3] = [-2.0, -1.5, 0.0];

/// Persisted starfield preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarMode {
    #[default]
    Moving,
    Paused,
    Off,
}

impl StarMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "moving" => Some(Self::Moving),
            "paused" => Some(Self::Paused),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Moving => "Moving",
            Self::Paused => "Paused",
            Self::Off => "Off",
        }
    }

    pub fn cycled(self) -> Self {
        match self {
            Self::Moving => Self::Paused,
            Self::Paused => Self::Off,
            Self::Off => Self::Moving,
        }
    }

    pub fn motion_enabled(self) -> bool {
        matches!(self, Self::Moving)
    }

    pub fn visible(self) -> bool {
        !matches!(self, Self::Off)
    }
}

#[derive(Debug, Clone)]
struct ShootingStar {
    head: [f32; 3],
    life: f32,
}

impl ShootingStar {
    /// Ramps in over the first 30% of life and out over the last 40%.
    fn opacity(&self) -> f32 {
        let f = self.life / SHOOTING_STAR_LIFE;
        if f < 0.3 {
            SHOOTING_STAR_OPACITY * (f / 0.3)
        } else if f > 0.6 {
            SHOOTING_STAR_OPACITY * ((1.0 - f) / 0.4)
        } else {
            SHOOTING_STAR_OPACITY
        }
    }
}

pub struct Starfield {
    particles: Vec<[f32; 3]>,
    shooting_stars: Vec<ShootingStar>,
    rotation_x: f32,
    rotation_y: f32,
    rng: StdRng,
}

impl Starfield {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    #[cfg(test)]
    fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                [
                    (rng.random::<f32>() - 0.5) * FIELD_WIDTH,
                    (rng.random::<f32>() - 0.5) * FIELD_HEIGHT,
                    (rng.random::<f32>() - 0.5) * FIELD_DEPTH,
                ]
            })
            .collect();
        Self {
            particles,
            shooting_stars: Vec::new(),
            rotation_x: 0.0,
            rotation_y: 0.0,
            rng,
        }
    }

    /// Advance one animation frame.
    pub fn step(&mut self, mode: StarMode) {
        let animate = mode.motion_enabled() && mode.visible();
        if animate {
            self.rotation_y += ROTATION_Y_STEP;
            self.rotation_x += ROTATION_X_STEP;
        }

        self.shooting_stars.retain_mut(|star| {
            star.life += 1.0;
            if star.life > SHOOTING_STAR_LIFE {
                return false;
            }
            for (axis, v) in star.head.iter_mut().zip(SHOOTING_STAR_VELOCITY) {
                *axis += v;
            }
            true
        });

        if animate && self.rng.random_bool(SHOOTING_STAR_CHANCE) {
            let head = [
                (self.rng.random::<f32>() - 0.5) * FIELD_WIDTH,
                (self.rng.random::<f32>() - 0.5) * 30.0 + 15.0,
                (self.rng.random::<f32>() - 0.5) * FIELD_DEPTH,
            ];
            self.shooting_stars.push(ShootingStar { head, life: 0.0 });
        }
    }

    pub fn paint(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        color: egui::Color32,
        mode: StarMode,
    ) {
        if !mode.visible() {
            return;
        }

        let particle_color = with_alpha(color, PARTICLE_OPACITY);
        for p in &self.particles {
            let rotated = rotate(*p, self.rotation_x, self.rotation_y);
            if let Some((pos, depth)) = project(rotated, rect) {
                let radius =
                    (PARTICLE_SIZE * focal_length() / depth * rect.height() / 4.0).max(0.5);
                painter.circle_filled(pos, radius, particle_color);
            }
        }

        for star in &self.shooting_stars {
            let tail = [
                star.head[0] + SHOOTING_STAR_TAIL[0],
                star.head[1] + SHOOTING_STAR_TAIL[1],
                star.head[2] + SHOOTING_STAR_TAIL[2],
            ];
            if let (Some((a, _)), Some((b, _))) = (project(star.head, rect), project(tail, rect)) {
                let stroke = egui::Stroke::new(1.0, with_alpha(color, star.opacity()));
                painter.line_segment([a, b], stroke);
            }
        }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

fn with_alpha(color: egui::Color32, opacity: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
}

fn focal_length() -> f32 {
    1.0 / (FOV_DEGREES.to_radians() / 2.0).tan()
}

fn rotate(p: [f32; 3], rx: f32, ry: f32) -> [f32; 3] {
    let [x, y, z] = p;
    let (sx, cx) = rx.sin_cos();
    let (y1, z1) = (y * cx - z * sx, y * sx + z * cx);
    let (sy, cy) = ry.sin_cos();
    [x * cy + z1 * sy, y1, -x * sy + z1 * cy]
}

/// Perspective projection through a camera at `z = CAMERA_Z` looking down
/// the negative z axis. Returns the screen position and view depth.
fn project(p: [f32; 3], rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
    let depth = CAMERA_Z - p[2];
    if depth <= NEAR_PLANE || rect.height() <= 0.0 {
        return None;
    }
    let f = focal_length();
    let aspect = rect.width() / rect.height();
    let ndc_x = p[0] * f / aspect / depth;
    let ndc_y = p[1] * f / depth;
    if ndc_x.abs() > 1.0 || ndc_y.abs() > 1.0 {
        return None;
    }
    let pos = egui::pos2(
        rect.center().x + ndc_x * rect.width() / 2.0,
        rect.center().y - ndc_y * rect.height() / 2.0,
    );
    Some((pos, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_mode_cycle_and_flags() {
        assert_eq!(StarMode::Moving.cycled(), StarMode::Paused);
        assert_eq!(StarMode::Paused.cycled(), StarMode::Off);
        assert_eq!(StarMode::Off.cycled(), StarMode::Moving);
        assert!(StarMode::Moving.motion_enabled() && StarMode::Moving.visible());
        assert!(!StarMode::Paused.motion_enabled() && StarMode::Paused.visible());
        assert!(!StarMode::Off.visible());
        assert_eq!(StarMode::from_name("paused"), Some(StarMode::Paused));
        assert_eq!(StarMode::from_name("Paused"), None);
    }

    #[test]
    fn particles_fill_the_box() {
        let field = Starfield::seeded(7);
        assert_eq!(field.particles.len(), PARTICLE_COUNT);
        assert!(field.particles.iter().all(|p| {
            p[0].abs() <= FIELD_WIDTH / 2.0
                && p[1].abs() <= FIELD_HEIGHT / 2.0
                && p[2].abs() <= FIELD_DEPTH / 2.0
        }));
    }

    #[test]
    fn paused_field_does_not_rotate_or_spawn() {
        let mut field = Starfield::seeded(1);
        for _ in 0..500 {
            field.step(StarMode::Paused);
        }
        assert_eq!((field.rotation_x, field.rotation_y), (0.0, 0.0));
        assert_eq!(field.shooting_stars.len(), 0);
    }

    #[test]
    fn moving_field_rotates_and_spawns() {
        let mut field = Starfield::seeded(3);
        let mut spawned = false;
        for _ in 0..1000 {
            field.step(StarMode::Moving);
            spawned |= field.shooting_stars.len() > 0;
        }
        let (rx, ry) = (field.rotation_x, field.rotation_y);
        assert!(rx > 0.0 && ry > rx);
        assert!(spawned);
    }

    #[test]
    fn shooting_stars_expire() {
        let mut field = Starfield::seeded(5);
        field.shooting_stars.push(ShootingStar {
            head: [0.0, 0.0, 0.0],
            life: 0.0,
        });
        for _ in 0..4 {
            field.step(StarMode::Paused);
        }
        assert_eq!(field.shooting_stars.len(), 0);
    }

    #[test]
    fn shooting_star_opacity_envelope() {
        let star = |life| ShootingStar {
            head: [0.0; 3],
            life,
        };
        assert_eq!(star(0.0).opacity(), 0.0);
        assert_eq!(star(SHOOTING_STAR_LIFE * 0.5).opacity(), SHOOTING_STAR_OPACITY);
        assert!(star(SHOOTING_STAR_LIFE).opacity().abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_center() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1600.0, 900.0));
        let (pos, depth) = project([0.0, 0.0, 0.0], rect).unwrap();
        assert_eq!(pos, egui::pos2(800.0, 450.0));
        assert_eq!(depth, CAMERA_Z);
        assert!(project([0.0, 0.0, 20.0], rect).is_none());
    }
}
