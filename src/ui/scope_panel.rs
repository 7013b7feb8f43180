//! Scope selection screen: department, year, and semester.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{BUILDINGS, CALENDAR, CHECK_CIRCLE, GRADUATION_CAP};

use crate::scope::{Department, Semester, Year};

use super::app::App;
use super::components::{colors, panel_header, section_frame};

const CARD_WIDTH: f32 = 260.0;

/// Show the scope selection panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    let mut confirm = false;

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        panel_header(
            ui,
            "Select Academic Context",
            "Choose the department, year, and semester to manage",
        );
    });

    let spacing = 20.0;
    let total_width = CARD_WIDTH * 3.0 + spacing * 2.0;
    let start_offset = ((ui.available_width() - total_width) / 2.0).max(0.0);

    ui.horizontal(|ui| {
        ui.add_space(start_offset);

        selection_card(ui, BUILDINGS, "Department", "Select the engineering department", |ui| {
            egui::ComboBox::from_id_salt("scope_department")
                .width(CARD_WIDTH - 40.0)
                .selected_text(app.selector.department.map(|d| d.label()).unwrap_or("Choose Department"))
                .show_ui(ui, |ui| {
                    for dept in Department::ALL {
                        ui.selectable_value(&mut app.selector.department, Some(dept), dept.label());
                    }
                });
        });

        ui.add_space(spacing);

        selection_card(ui, GRADUATION_CAP, "Academic Year", "Select the year of study", |ui| {
            egui::ComboBox::from_id_salt("scope_year")
                .width(CARD_WIDTH - 40.0)
                .selected_text(app.selector.year.map(|y| y.label()).unwrap_or("Choose Year"))
                .show_ui(ui, |ui| {
                    for year in Year::ALL {
                        ui.selectable_value(&mut app.selector.year, Some(year), year.label());
                    }
                });
        });

        ui.add_space(spacing);

        selection_card(ui, CALENDAR, "Semester", "Select the semester", |ui| {
            egui::ComboBox::from_id_salt("scope_semester")
                .width(CARD_WIDTH - 40.0)
                .selected_text(
                    app.selector
                        .semester
                        .map(|s| s.label())
                        .unwrap_or_else(|| "Choose Semester".to_string()),
                )
                .show_ui(ui, |ui| {
                    for semester in Semester::ALL {
                        ui.selectable_value(&mut app.selector.semester, Some(semester), semester.label());
                    }
                });
        });
    });

    if let Some(summary) = app.selector.summary() {
        ui.add_space(30.0);
        ui.vertical_centered(|ui| {
            section_frame(ui).show(ui, |ui| {
                ui.set_width(total_width.min(ui.available_width()));
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(CHECK_CIRCLE).size(40.0).color(colors::ACCENT));
                    ui.label(RichText::new("Selection Summary").size(18.0).strong());
                    ui.add_space(6.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("You have selected:").weak());
                        ui.label(RichText::new(summary).strong());
                    });
                    ui.add_space(12.0);
                    if ui.button(RichText::new("Access Dashboard").size(15.0)).clicked() {
                        confirm = true;
                    }
                });
            });
        });
    }

    if confirm {
        app.confirm_scope();
    }
}

/// Card holding one selection field.
fn selection_card(ui: &mut Ui, icon: &str, title: &str, description: &str, add_contents: impl FnOnce(&mut Ui)) {
    section_frame(ui).show(ui, |ui| {
        ui.set_width(CARD_WIDTH - 30.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(icon).size(36.0).color(colors::ACCENT));
            ui.label(RichText::new(title).size(17.0).strong());
            ui.label(RichText::new(description).small().weak());
            ui.add_space(10.0);
            add_contents(ui);
        });
    });
}
