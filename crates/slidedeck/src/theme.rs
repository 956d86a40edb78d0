use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    /// Base color for chrome, stars and other overlays; drawn at reduced opacity.
    pub overlay: Color32,
    pub error: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub kicker_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x11, 0x11, 0x11),
            foreground: Color32::from_rgb(0xB8, 0xB8, 0xB8),
            heading_color: Color32::WHITE,
            overlay: Color32::WHITE,
            error: Color32::from_rgb(0xF8, 0x71, 0x71),
            h1_size: 60.0,
            h2_size: 44.0,
            h3_size: 30.0,
            body_size: 22.0,
            kicker_size: 14.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xFA, 0xFA),
            foreground: Color32::from_rgb(0x3A, 0x3A, 0x3A),
            heading_color: Color32::from_rgb(0x11, 0x11, 0x11),
            overlay: Color32::BLACK,
            error: Color32::from_rgb(0xDC, 0x26, 0x26),
            h1_size: 60.0,
            h2_size: 44.0,
            h3_size: 30.0,
            body_size: 22.0,
            kicker_size: 14.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let opacity = opacity.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity * color.a() as f32) as u8,
        )
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            3 => self.h3_size,
            _ => self.body_size,
        }
    }
}
