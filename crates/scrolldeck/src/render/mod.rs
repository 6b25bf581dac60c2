pub mod chrome;
pub mod image_cache;
pub mod overlay;

use eframe::egui::{self, Pos2};

use crate::deck::Slide;
use crate::input::Role;
use crate::theme::Theme;

use image_cache::ImageCache;

/// Seconds for a slide's content to animate in once it becomes active.
const ENTRANCE_DURATION: f32 = 0.6;

/// Scale relative to a 1920x1080 reference viewport.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Where slide `index` sits when the strip is scrolled to `offset`.
pub fn slide_rect(viewport: egui::Rect, index: usize, offset: f32) -> egui::Rect {
    let x = viewport.left() + index as f32 * viewport.width() - offset;
    egui::Rect::from_min_size(egui::pos2(x, viewport.top()), viewport.size())
}

/// UV rectangle that crops a texture to fill `target` without distortion.
pub fn cover_uv(texture: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if texture.x <= 0.0 || texture.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let tex_aspect = texture.x / texture.y;
    let target_aspect = target.x / target.y;
    if tex_aspect > target_aspect {
        let w = target_aspect / tex_aspect;
        let x0 = (1.0 - w) / 2.0;
        egui::Rect::from_min_max(egui::pos2(x0, 0.0), egui::pos2(x0 + w, 1.0))
    } else {
        let h = tex_aspect / target_aspect;
        let y0 = (1.0 - h) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, y0), egui::pos2(1.0, y0 + h))
    }
}

/// Hotspot rectangle in screen space from its slide-normalised `[x, y, w, h]`.
pub fn hotspot_rect(slide: egui::Rect, normalised: [f32; 4]) -> egui::Rect {
    let [x, y, w, h] = normalised;
    egui::Rect::from_min_size(
        egui::pos2(
            slide.left() + x * slide.width(),
            slide.top() + y * slide.height(),
        ),
        egui::vec2(w * slide.width(), h * slide.height()),
    )
}

/// Render one slide of the strip. Returns the hotspots clicked this frame.
#[allow(clippy::too_many_arguments)]
pub fn draw_slide(
    ui: &egui::Ui,
    slide: &Slide,
    index: usize,
    rect: egui::Rect,
    theme: &Theme,
    image_cache: &ImageCache,
    active: bool,
    interactive: bool,
    scale: f32,
) -> Vec<Role> {
    let painter = ui.painter_at(rect);
    let accent = theme.slide_accent(slide.accent_rgb());

    painter.rect_filled(rect, 0.0, theme.background);
    if let Some(texture) = slide.background.as_deref().and_then(|p| image_cache.texture(p)) {
        let uv = cover_uv(texture.size_vec2(), rect.size());
        painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        painter.rect_filled(rect, 0.0, Theme::with_opacity(theme.background, 0.55));
    }

    let t = ui.ctx().animate_bool_with_time(
        egui::Id::new(("slide-entrance", index)),
        active,
        ENTRANCE_DURATION,
    );
    let opacity = 0.35 + 0.65 * t;
    let lift = (1.0 - t) * 40.0 * scale;

    let padding = 140.0 * scale;
    let content_width = rect.width() - padding * 2.0;
    let mut y = rect.top() + rect.height() * 0.22 + lift;
    let left = rect.left() + padding;

    let title = painter.layout(
        slide.title.clone(),
        egui::FontId::proportional(theme.h1_size * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        content_width,
    );
    let title_h = title.rect.height();
    painter.galley(Pos2::new(left, y), title, theme.heading_color);
    y += title_h + 16.0 * scale;

    let bar = egui::Rect::from_min_size(
        Pos2::new(left, y),
        egui::vec2(120.0 * scale * t.max(0.1), 6.0 * scale),
    );
    painter.rect_filled(bar, 3.0 * scale, Theme::with_opacity(accent, opacity));
    y += 36.0 * scale;

    if let Some(ref subtitle) = slide.subtitle {
        let galley = painter.layout(
            subtitle.clone(),
            egui::FontId::proportional(theme.subtitle_size * scale),
            Theme::with_opacity(accent, opacity),
            content_width,
        );
        let h = galley.rect.height();
        painter.galley(Pos2::new(left, y), galley, accent);
        y += h + 28.0 * scale;
    }

    let body_color = Theme::with_opacity(theme.foreground, opacity);
    for paragraph in slide.paragraphs() {
        let galley = painter.layout(
            paragraph.to_string(),
            egui::FontId::proportional(theme.body_size * scale),
            body_color,
            content_width,
        );
        let h = galley.rect.height();
        painter.galley(Pos2::new(left, y), galley, body_color);
        y += h + 20.0 * scale;
    }

    let mut clicked = Vec::new();
    for hotspot in &slide.hotspots {
        let area = hotspot_rect(rect, hotspot.rect);
        let fill = Theme::with_opacity(accent, 0.12 * opacity);
        let stroke = egui::Stroke::new(2.0 * scale, Theme::with_opacity(accent, 0.8 * opacity));

        if interactive {
            let response = ui
                .interact(
                    area,
                    egui::Id::new(("hotspot", index, hotspot.id.as_str())),
                    egui::Sense::click(),
                )
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            let fill = if response.hovered() {
                Theme::with_opacity(accent, 0.25 * opacity)
            } else {
                fill
            };
            painter.rect_filled(area, 8.0 * scale, fill);
            if response.clicked() {
                clicked.push(Role::Hotspot(hotspot.id.clone()));
            }
        } else {
            painter.rect_filled(area, 8.0 * scale, fill);
        }
        painter.rect_stroke(area, 8.0 * scale, stroke, egui::StrokeKind::Inside);

        let label = hotspot.label.as_deref().unwrap_or("+");
        let galley = painter.layout_no_wrap(
            label.to_string(),
            egui::FontId::proportional(theme.chrome_size * 1.2 * scale),
            Theme::with_opacity(theme.heading_color, opacity),
        );
        let pos = area.center() - galley.rect.size() / 2.0;
        painter.galley(pos, galley, theme.heading_color);
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: egui::Rect, b: egui::Rect) -> bool {
        (a.min - b.min).length() < 1e-4 && (a.max - b.max).length() < 1e-4
    }

    #[test]
    fn test_cover_uv_wide_texture_crops_sides() {
        let uv = cover_uv(egui::vec2(200.0, 100.0), egui::vec2(100.0, 100.0));
        assert!(approx(
            uv,
            egui::Rect::from_min_max(egui::pos2(0.25, 0.0), egui::pos2(0.75, 1.0))
        ));
    }

    #[test]
    fn test_cover_uv_tall_texture_crops_top_and_bottom() {
        let uv = cover_uv(egui::vec2(100.0, 400.0), egui::vec2(100.0, 100.0));
        assert!(approx(
            uv,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.375), egui::pos2(1.0, 0.625))
        ));
    }

    #[test]
    fn test_slide_rect_follows_offset() {
        let viewport = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let r = slide_rect(viewport, 2, 1200.0);
        assert_eq!(r.left(), 400.0);
        assert_eq!(r.width(), 800.0);
    }

    #[test]
    fn test_hotspot_rect_scales_to_slide() {
        let slide = egui::Rect::from_min_size(egui::pos2(100.0, 0.0), egui::vec2(1000.0, 500.0));
        let r = hotspot_rect(slide, [0.5, 0.2, 0.1, 0.2]);
        assert_eq!(r.min, egui::pos2(600.0, 100.0));
        assert_eq!(r.size(), egui::vec2(100.0, 100.0));
    }

    #[test]
    fn test_scale_uses_tighter_axis() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(rect), 0.5);
    }
}
