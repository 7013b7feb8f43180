//! Login screen: email/password and browser-based sign-in.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{GOOGLE_LOGO, SIGN_IN};

use super::app::App;
use super::components::section_frame;

/// Show the login panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    let pending = app.login.pending;
    let mut submit = false;
    let mut external = false;
    let mut complete = false;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Student Portal").size(36.0).strong());
        ui.label(RichText::new("Admin Access Dashboard").size(14.0).weak());
        ui.add_space(30.0);

        ui.allocate_ui(egui::vec2(380.0, 0.0), |ui| {
            section_frame(ui).show(ui, |ui| {
                ui.set_width(350.0);

                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Admin Login").size(22.0).strong());
                    ui.label(
                        RichText::new("Enter your credentials to access the student management system")
                            .small()
                            .weak(),
                    );
                });
                ui.add_space(15.0);

                ui.add_enabled_ui(!pending, |ui| {
                    ui.label("Email");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.login.email)
                            .desired_width(f32::INFINITY)
                            .hint_text("admin@college.edu"),
                    );
                    ui.add_space(8.0);

                    ui.label("Password");
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut app.login.password)
                            .desired_width(f32::INFINITY)
                            .password(true)
                            .hint_text("Enter your password"),
                    );
                    if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.add_space(12.0);

                    let label = if pending { "Signing In..." } else { "Sign In" };
                    let button = egui::Button::new(format!("{SIGN_IN} {label}")).min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(button).clicked() {
                        submit = true;
                    }

                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("OR CONTINUE WITH").small().weak());
                    });
                    ui.add_space(8.0);

                    let google = egui::Button::new(format!("{GOOGLE_LOGO} Continue with Google"))
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(google).clicked() {
                        external = true;
                    }

                    if app.login.awaiting_redirect {
                        ui.add_space(12.0);
                        ui.label(RichText::new("Paste the link your browser was redirected to:").small());
                        ui.add(
                            egui::TextEdit::singleline(&mut app.login.redirect_link)
                                .desired_width(f32::INFINITY)
                                .hint_text("http://localhost:3000/select-department#access_token=..."),
                        );
                        let ready = !app.login.redirect_link.trim().is_empty();
                        if ui.add_enabled(ready, egui::Button::new("Complete Sign In")).clicked() {
                            complete = true;
                        }
                    }
                });

                if pending {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Contacting authentication service...");
                    });
                }
            });
        });

        ui.add_space(20.0);
        ui.label(RichText::new("Secure access to academic administration").small().weak());
    });

    if submit && !pending {
        app.sign_in();
    }
    if external && !pending {
        app.start_external_sign_in();
    }
    if complete && !pending {
        app.complete_external_sign_in();
    }
}
