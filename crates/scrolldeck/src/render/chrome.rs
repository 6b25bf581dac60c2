use eframe::egui::{self, Pos2};

use crate::input::Role;
use crate::theme::Theme;
use crate::view::ViewModel;

/// Centers of `count` evenly spaced dots, centred on `center_x`.
pub fn dot_positions(count: usize, center_x: f32, y: f32, spacing: f32) -> Vec<Pos2> {
    let span = count.saturating_sub(1) as f32 * spacing;
    let start = center_x - span / 2.0;
    (0..count)
        .map(|i| Pos2::new(start + i as f32 * spacing, y))
        .collect()
}

fn clickable(ui: &egui::Ui, rect: egui::Rect, id: egui::Id) -> egui::Response {
    ui.interact(rect, id, egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Navigation buttons, counter, progress dots and timeline strip.
/// Returns the roles clicked this frame.
pub fn draw_chrome(
    ui: &egui::Ui,
    view: &ViewModel,
    theme: &Theme,
    rect: egui::Rect,
    interactive: bool,
    scale: f32,
) -> Vec<Role> {
    let mut clicked = Vec::new();
    let painter = ui.painter();

    // Prev / next
    let radius = 28.0 * scale;
    let margin = 40.0 * scale;
    let buttons = [
        (
            Role::PrevButton,
            Pos2::new(rect.left() + margin + radius, rect.center().y),
            "\u{2039}",
            view.prev_disabled,
        ),
        (
            Role::NextButton,
            Pos2::new(rect.right() - margin - radius, rect.center().y),
            "\u{203A}",
            view.next_disabled,
        ),
    ];
    for (role, center, glyph, disabled) in buttons {
        let area = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
        let mut alpha = if disabled { 0.15 } else { 0.5 };
        if interactive && !disabled {
            let response = clickable(ui, area, egui::Id::new(("nav-button", glyph)));
            if response.hovered() {
                alpha = 0.8;
            }
            if response.clicked() {
                clicked.push(role);
            }
        }
        painter.circle_filled(center, radius, Theme::with_opacity(theme.panel_background, alpha));
        let color = Theme::with_opacity(theme.foreground, alpha + 0.2);
        let galley = painter.layout_no_wrap(
            glyph.to_string(),
            egui::FontId::proportional(radius * 1.4),
            color,
        );
        painter.galley(center - galley.rect.size() / 2.0, galley, color);
    }

    // Page counter
    let counter_color = Theme::with_opacity(theme.foreground, 0.6);
    let counter = painter.layout_no_wrap(
        view.counter_text(),
        egui::FontId::monospace(theme.chrome_size * scale),
        counter_color,
    );
    let counter_pos = Pos2::new(
        rect.right() - counter.rect.width() - margin,
        rect.bottom() - 48.0 * scale,
    );
    painter.galley(counter_pos, counter, counter_color);

    // Progress dots
    let dot_r = 6.0 * scale;
    let centers = dot_positions(
        view.progress.len(),
        rect.center().x,
        rect.bottom() - 40.0 * scale,
        dot_r * 4.0,
    );
    for (i, (center, active)) in centers.into_iter().zip(&view.progress).enumerate() {
        if interactive {
            let hit = egui::Rect::from_center_size(center, egui::vec2(dot_r * 4.0, dot_r * 4.0));
            if clickable(ui, hit, egui::Id::new(("progress-dot", i))).clicked() {
                clicked.push(Role::ProgressDot(i));
            }
        }
        if *active {
            painter.circle_filled(center, dot_r * 1.3, theme.accent);
        } else {
            painter.circle_filled(center, dot_r, Theme::with_opacity(theme.foreground, 0.3));
        }
    }

    // Timeline strip along the top edge
    let count = view.timeline.len().max(1);
    let strip_h = 6.0 * scale;
    let segment_w = rect.width() / count as f32;
    for (i, active) in view.timeline.iter().enumerate() {
        let segment = egui::Rect::from_min_size(
            Pos2::new(rect.left() + i as f32 * segment_w, rect.top()),
            egui::vec2(segment_w - 2.0 * scale, strip_h),
        );
        if interactive {
            let hit = segment.expand2(egui::vec2(0.0, 10.0 * scale));
            if clickable(ui, hit, egui::Id::new(("timeline-dot", i))).clicked() {
                clicked.push(Role::TimelineDot(i));
            }
        }
        let color = if *active {
            theme.accent
        } else if i < view.current {
            Theme::with_opacity(theme.accent, 0.4)
        } else {
            Theme::with_opacity(theme.foreground, 0.12)
        };
        painter.rect_filled(segment, 0.0, color);
    }

    clicked
}
