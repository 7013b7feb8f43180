//! Dashboard panel with stats, action cards, student records, and activity log.

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    CALENDAR_CHECK, CHECK_CIRCLE, CLOCK, DOWNLOAD_SIMPLE, FILE_TEXT, USER_PLUS, USERS,
};

use crate::notify::{Notice, Severity};
use crate::roster::{BloodGroup, Dashboard, DashboardState, ExportFormat, SummaryStats};

use super::app::App;
use super::components::{action_card, colors, panel_header, section_frame, stat_card};

/// Actions collected while rendering, applied once the dashboard borrow ends.
enum Action {
    OpenForm,
    SubmitForm,
    MarkAttendance,
    Export(ExportFormat),
    ComingSoon(&'static str),
}

/// Show the dashboard panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    let Some(dashboard) = app.dashboard.as_mut() else {
        return;
    };
    let mut actions = Vec::new();

    ScrollArea::vertical().id_salt("dashboard_scroll").show(ui, |ui| {
        ui.add_space(10.0);
        panel_header(ui, "Dashboard", &dashboard.scope().heading());

        show_stats(ui, &dashboard.stats());
        ui.add_space(20.0);

        show_action_cards(ui, &mut actions);
        ui.add_space(20.0);

        show_records(ui, dashboard, &mut actions);
    });

    if dashboard.form_open {
        show_form_dialog(ui.ctx(), dashboard, &mut actions);
    }

    for action in actions {
        match action {
            Action::OpenForm => {
                if let Some(dashboard) = app.dashboard.as_mut() {
                    dashboard.open_form();
                }
            }
            Action::SubmitForm => app.add_student(),
            Action::MarkAttendance => app.mark_attendance(),
            Action::Export(format) => app.export_attendance(format),
            Action::ComingSoon(feature) => {
                app.notify(Notice::info(feature, "This section is not available yet"));
            }
        }
    }

    show_activity(app, ui);
}

fn show_stats(ui: &mut Ui, stats: &SummaryStats) {
    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            "Total Students",
            &SummaryStats::padded(stats.total),
            USERS,
            colors::PRIMARY,
        );
        stat_card(
            ui,
            "Present Today",
            &SummaryStats::padded(stats.present_today),
            CHECK_CIRCLE,
            colors::ACCENT,
        );
        stat_card(
            ui,
            "Average Attendance",
            stats.average_attendance_pct,
            CLOCK,
            colors::PRIMARY,
        );
    });
}

fn show_action_cards(ui: &mut Ui, actions: &mut Vec<Action>) {
    let available = ui.available_width();
    let num_cards = 4.0;
    let spacing = 20.0;
    let card_width = ((available - spacing * (num_cards - 1.0)) / num_cards).clamp(150.0, 230.0);
    let card_size = egui::vec2(card_width, card_width * 0.7);

    ui.horizontal(|ui| {
        if action_card(ui, "Add Student", "Register new student", USER_PLUS, colors::PRIMARY, card_size).clicked() {
            actions.push(Action::OpenForm);
        }
        ui.add_space(spacing);

        if action_card(ui, "Mark Attendance", "Today's attendance", CALENDAR_CHECK, colors::ACCENT, card_size).clicked() {
            actions.push(Action::MarkAttendance);
        }
        ui.add_space(spacing);

        if action_card(ui, "View Reports", "Analytics & reports", FILE_TEXT, colors::NEUTRAL, card_size).clicked() {
            actions.push(Action::ComingSoon("View Reports"));
        }
        ui.add_space(spacing);

        if action_card(ui, "Manage Students", "Edit student data", USERS, colors::NEUTRAL, card_size).clicked() {
            actions.push(Action::ComingSoon("Manage Students"));
        }
    });
}

fn show_records(ui: &mut Ui, dashboard: &Dashboard, actions: &mut Vec<Action>) {
    section_frame(ui).show(ui, |ui| {
        ui.set_min_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Student Records").size(18.0).strong());
                ui.label(
                    RichText::new(format!(
                        "{} students enrolled in this semester",
                        dashboard.roster().len()
                    ))
                    .weak(),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{DOWNLOAD_SIMPLE} PDF")).clicked() {
                    actions.push(Action::Export(ExportFormat::Pdf));
                }
                if ui.button(format!("{DOWNLOAD_SIMPLE} Excel")).clicked() {
                    actions.push(Action::Export(ExportFormat::Excel));
                }
            });
        });

        ui.add_space(10.0);

        match dashboard.state() {
            DashboardState::Empty => {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(RichText::new(USERS).size(48.0).color(colors::NEUTRAL));
                    ui.label(RichText::new("No students enrolled yet").weak());
                    ui.add_space(10.0);
                    if ui.button("Add First Student").clicked() {
                        actions.push(Action::OpenForm);
                    }
                    ui.add_space(20.0);
                });
            }
            DashboardState::Populated => {
                egui::Grid::new("roster_grid")
                    .num_columns(5)
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for title in ["Name", "Email", "Phone", "Blood", "Parent Phone"] {
                            ui.strong(title);
                        }
                        ui.end_row();

                        for student in dashboard.roster() {
                            ui.label(&student.name);
                            ui.label(&student.email);
                            ui.label(&student.phone);
                            ui.label(student.blood_group.map(|b| b.label()).unwrap_or("-"));
                            ui.label(student.parent_phone.as_deref().unwrap_or("-"));
                            ui.end_row();
                        }
                    });
            }
        }
    });
}

fn show_form_dialog(ctx: &egui::Context, dashboard: &mut Dashboard, actions: &mut Vec<Action>) {
    let mut open = true;
    let heading = dashboard.scope().heading();

    egui::Window::new("Add New Student")
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("Enter student information for {heading}")).weak());
            ui.add_space(10.0);

            let form = &mut dashboard.form;
            egui::Grid::new("student_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Student Name *");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.name)
                            .desired_width(250.0)
                            .hint_text("Enter student name"),
                    );
                    ui.end_row();

                    ui.label("Email *");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.email)
                            .desired_width(250.0)
                            .hint_text("student@email.com"),
                    );
                    ui.end_row();

                    ui.label("Phone Number *");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.phone)
                            .desired_width(250.0)
                            .hint_text("Enter phone number"),
                    );
                    ui.end_row();

                    ui.label("Blood Group");
                    egui::ComboBox::from_id_salt("student_form_blood")
                        .width(120.0)
                        .selected_text(form.blood_group.map(|b| b.label()).unwrap_or("Select"))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut form.blood_group, None, "None");
                            for group in BloodGroup::ALL {
                                ui.selectable_value(&mut form.blood_group, Some(group), group.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Parent Phone (Optional)");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.parent_phone)
                            .desired_width(250.0)
                            .hint_text("Parent phone number"),
                    );
                    ui.end_row();

                    ui.label("Address");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.address)
                            .desired_width(250.0)
                            .hint_text("Enter address"),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    dashboard.form_open = false;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(RichText::new("Add Student").strong()).clicked() {
                        actions.push(Action::SubmitForm);
                    }
                });
            });
        });

    if !open {
        dashboard.form_open = false;
    }
}

/// Recent notices, newest first.
fn show_activity(app: &mut App, ui: &mut Ui) {
    ui.add_space(20.0);
    let mut clear = false;

    section_frame(ui).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    clear = true;
                }
            });
        });
        ui.add_space(8.0);

        ScrollArea::vertical()
            .id_salt("activity_scroll")
            .max_height(120.0)
            .show(ui, |ui| {
                if app.notices.history().is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                    return;
                }
                for entry in app.notices.history().iter().rev().take(10) {
                    let color = match entry.severity {
                        Severity::Info => Color32::GRAY,
                        Severity::Error => colors::ERROR,
                    };
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.created_at.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(format!("{}: {}", entry.title, entry.message)).color(color));
                    });
                }
            });
    });

    if clear {
        app.notices.clear_history();
    }
}
