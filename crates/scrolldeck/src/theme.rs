use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    pub backdrop: Color32,
    pub particle: Color32,
    pub h1_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    pub chrome_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x14, 0x1C),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x22, 0x25, 0x30),
            backdrop: Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            particle: Color32::WHITE,
            h1_size: 88.0,
            subtitle_size: 48.0,
            body_size: 40.0,
            chrome_size: 18.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF7, 0xF5, 0xF0),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel_background: Color32::WHITE,
            backdrop: Color32::from_rgba_unmultiplied(0x10, 0x10, 0x20, 140),
            particle: Color32::from_rgb(0x0F, 0x34, 0x60),
            h1_size: 88.0,
            subtitle_size: 48.0,
            body_size: 40.0,
            chrome_size: 18.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
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
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Slide accent from the deck, falling back to the theme accent.
    pub fn slide_accent(&self, rgb: Option<[u8; 3]>) -> Color32 {
        rgb.map(|[r, g, b]| Color32::from_rgb(r, g, b))
            .unwrap_or(self.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let t = Theme::dark();
        assert_eq!(t.toggled().name, "light");
        assert_eq!(t.toggled().toggled().name, "dark");
    }

    #[test]
    fn test_unknown_name_falls_back_to_light() {
        assert_eq!(Theme::from_name("sepia").name, "light");
    }

    #[test]
    fn test_slide_accent() {
        let t = Theme::dark();
        assert_eq!(t.slide_accent(None), t.accent);
        assert_eq!(
            t.slide_accent(Some([1, 2, 3])),
            Color32::from_rgb(1, 2, 3)
        );
    }
}
