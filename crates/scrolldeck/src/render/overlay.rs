use std::time::Instant;

use eframe::egui::{self, Pos2};

use crate::deck::Deck;
use crate::input::Role;
use crate::input::keys::SHORTCUTS;
use crate::loader::Loader;
use crate::modal::ModalRegistry;
use crate::particles::{Particle, ParticleField};
use crate::theme::Theme;

/// Screen position of a particle `progress` of the way through its rise.
pub fn particle_position(particle: &Particle, progress: f32, rect: egui::Rect) -> Pos2 {
    let travel = rect.height() + particle.size * 2.0;
    Pos2::new(
        rect.left() + particle.x * rect.width(),
        rect.bottom() + particle.size - progress * travel,
    )
}

pub fn draw_particles(
    ui: &egui::Ui,
    field: &ParticleField,
    now: Instant,
    theme: &Theme,
    rect: egui::Rect,
) {
    let painter = ui.painter();
    for particle in field.particles() {
        let Some(progress) = particle.progress(now) else {
            continue;
        };
        let opacity = particle.opacity_at(now);
        if opacity <= 0.0 {
            continue;
        }
        painter.circle_filled(
            particle_position(particle, progress, rect),
            particle.size / 2.0,
            Theme::with_opacity(theme.particle, opacity),
        );
    }
}

/// Visible modal panels over a dimmed backdrop. Returns the roles clicked.
///
/// Backdrop, panel and close button are registered in that order so the
/// later ones take the click when they overlap.
pub fn draw_modals(
    ui: &egui::Ui,
    deck: &Deck,
    modals: &ModalRegistry,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Vec<Role> {
    let mut clicked = Vec::new();
    let painter = ui.painter();

    for id in modals.visible() {
        let Some(panel) = deck.modal(id) else {
            continue;
        };

        let backdrop = ui.interact(
            rect,
            egui::Id::new(("modal-backdrop", id)),
            egui::Sense::click(),
        );
        painter.rect_filled(rect, 0.0, theme.backdrop);

        let padding = 40.0 * scale;
        let width = (rect.width() * 0.5).max(480.0 * scale).min(rect.width() - padding);
        let text_width = width - padding * 2.0;

        let title = painter.layout(
            panel.title.clone(),
            egui::FontId::proportional(theme.subtitle_size * scale),
            theme.heading_color,
            text_width,
        );
        let body = painter.layout(
            panel.body.clone(),
            egui::FontId::proportional(theme.body_size * 0.8 * scale),
            theme.foreground,
            text_width,
        );
        let height = padding * 2.0 + title.rect.height() + 24.0 * scale + body.rect.height();
        let panel_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(width, height));

        let content = ui.interact(
            panel_rect,
            egui::Id::new(("modal-content", id)),
            egui::Sense::click(),
        );
        painter.rect_filled(panel_rect, 16.0 * scale, theme.panel_background);
        painter.rect_stroke(
            panel_rect,
            16.0 * scale,
            egui::Stroke::new(1.0, Theme::with_opacity(theme.accent, 0.6)),
            egui::StrokeKind::Outside,
        );

        let mut y = panel_rect.top() + padding;
        let title_h = title.rect.height();
        painter.galley(Pos2::new(panel_rect.left() + padding, y), title, theme.heading_color);
        y += title_h + 24.0 * scale;
        painter.galley(Pos2::new(panel_rect.left() + padding, y), body, theme.foreground);

        let close_size = 36.0 * scale;
        let close_rect = egui::Rect::from_min_size(
            Pos2::new(
                panel_rect.right() - close_size - 12.0 * scale,
                panel_rect.top() + 12.0 * scale,
            ),
            egui::vec2(close_size, close_size),
        );
        let close = ui
            .interact(
                close_rect,
                egui::Id::new(("modal-close", id)),
                egui::Sense::click(),
            )
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        let close_color = if close.hovered() {
            theme.accent
        } else {
            Theme::with_opacity(theme.foreground, 0.6)
        };
        let glyph = painter.layout_no_wrap(
            "\u{00d7}".to_string(),
            egui::FontId::proportional(close_size),
            close_color,
        );
        painter.galley(close_rect.center() - glyph.rect.size() / 2.0, glyph, close_color);

        if close.clicked() {
            clicked.push(Role::ModalClose(id.to_string()));
        } else if content.clicked() {
            clicked.push(Role::ModalContent(id.to_string()));
        } else if backdrop.clicked() {
            clicked.push(Role::ModalBackdrop(id.to_string()));
        }
    }

    clicked
}

pub fn draw_loader(
    ui: &egui::Ui,
    loader: &Loader,
    now: Instant,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let opacity = loader.opacity(now);
    if opacity <= 0.0 {
        return;
    }
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Theme::with_opacity(theme.background, opacity));

    let bar_w = 420.0 * scale;
    let bar_h = 6.0 * scale;
    let track = egui::Rect::from_center_size(rect.center(), egui::vec2(bar_w, bar_h));
    painter.rect_filled(track, bar_h / 2.0, Theme::with_opacity(theme.foreground, 0.15 * opacity));
    let fill = egui::Rect::from_min_size(
        track.min,
        egui::vec2(bar_w * loader.progress() / 100.0, bar_h),
    );
    painter.rect_filled(fill, bar_h / 2.0, Theme::with_opacity(theme.accent, opacity));

    let color = Theme::with_opacity(theme.foreground, 0.7 * opacity);
    let label = painter.layout_no_wrap(
        format!("{:.0}%", loader.progress()),
        egui::FontId::monospace(theme.chrome_size * scale),
        color,
    );
    let pos = Pos2::new(
        rect.center().x - label.rect.width() / 2.0,
        track.bottom() + 16.0 * scale,
    );
    painter.galley(pos, label, color);
}

pub fn draw_help(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let hud_height = SHORTCUTS.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 380.0 * scale;

    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    let title_pos = Pos2::new(hud_rect.left() + padding, hud_rect.top() + padding);
    ui.painter().galley(title_pos, title_galley, text_color);

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in SHORTCUTS {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(Pos2::new(hud_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            Pos2::new(hud_rect.left() + padding + 170.0 * scale, y),
            desc_galley,
            text_color,
        );

        y += line_height;
    }
}
