//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

/// Render a clickable action card with an accent-colored icon.
///
/// The border takes the accent color on hover. Returns the response which
/// can be checked for `.clicked()`.
pub fn action_card(
    ui: &mut Ui,
    title: &str,
    description: &str,
    icon: &str,
    accent: Color32,
    size: egui::Vec2,
) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let scale = size.x / 200.0;

        let stroke = if response.hovered() {
            egui::Stroke::new(1.5, accent)
        } else {
            visuals.bg_stroke
        };
        ui.painter().rect_filled(rect, 10.0, visuals.bg_fill);
        ui.painter().rect_stroke(rect, 10.0, stroke, StrokeKind::Inside);

        // Accent strip along the top edge
        let strip = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), 4.0));
        ui.painter().rect_filled(
            strip,
            CornerRadius {
                nw: 10,
                ne: 10,
                sw: 0,
                se: 0,
            },
            accent,
        );

        let painter = ui.painter();
        painter.text(
            egui::pos2(rect.center().x, rect.top() + size.y * 0.3),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(30.0 * scale),
            accent,
        );
        painter.text(
            egui::pos2(rect.center().x, rect.center().y + size.y * 0.1),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(16.0 * scale),
            visuals.text_color(),
        );
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - size.y * 0.18),
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Render a stat card with title, value, and icon.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, icon: &str, color: Color32) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(180.0);

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).small());
                    ui.label(RichText::new(value).heading().strong().color(color));
                });
                ui.add_space(20.0);
                ui.label(RichText::new(icon).size(28.0).color(color));
            });
        });
}

/// Rounded section frame used for cards and panels.
pub fn section_frame(ui: &Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const ACCENT: Color32 = Color32::from_rgb(80, 170, 160);
    pub const PRIMARY: Color32 = Color32::from_rgb(100, 150, 230);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a panel header with title and subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(28.0).strong());
    ui.label(RichText::new(subtitle).size(15.0).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}
