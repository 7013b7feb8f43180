//! Main application UI.

use std::time::Duration;

use chrono::Local;
use eframe::egui::{self, Align, Layout, RichText};
use tokio::sync::{mpsc, watch};

use crate::auth::{Session, SessionGate, redirect_target};
use crate::config::AppConfig;
use crate::error::{AppError, AuthError};
use crate::flow::{FlowController, FlowState};
use crate::notify::{Notice, Notices, Severity};
use crate::roster::{Dashboard, ExportFormat, missing_information_notice, student_added_notice};
use crate::scope::{ScopeSelector, ScopeStore};

use super::components::colors;
use super::{dashboard, login_panel, scope_panel};

/// Messages from async tasks to UI.
pub enum UiMessage {
    SignInFinished(Result<Session, AuthError>),
    RedirectFinished(Result<Session, AuthError>),
    SignedOut,
}

/// Form state for the login screen.
#[derive(Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// A sign-in request is in flight; inputs are disabled.
    pub pending: bool,
    /// Browser sign-in started; waiting for the redirect link.
    pub awaiting_redirect: bool,
    pub redirect_link: String,
}

impl LoginForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Main application state.
pub struct App {
    // Runtime and repaint handle for async completions
    rt: tokio::runtime::Runtime,
    ctx: egui::Context,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    config: AppConfig,

    // Session and navigation
    gate: SessionGate,
    session_rx: watch::Receiver<Option<Session>>,
    scopes: ScopeStore,
    flow: FlowController,
    signing_out: bool,

    // Screens
    pub login: LoginForm,
    pub selector: ScopeSelector,
    pub dashboard: Option<Dashboard>,

    pub notices: Notices,
}

impl App {
    pub fn new(
        ctx: egui::Context,
        rt: tokio::runtime::Runtime,
        config: AppConfig,
        gate: SessionGate,
        scopes: ScopeStore,
        startup_notices: Vec<Notice>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut session_rx = gate.subscribe();
        let initial = session_rx.borrow_and_update().clone();
        let flow = FlowController::start(initial.as_ref(), scopes.clone());

        let mut app = Self {
            rt,
            ctx,
            tx,
            rx,
            config,
            gate,
            session_rx,
            scopes,
            flow,
            signing_out: false,
            login: LoginForm::default(),
            selector: ScopeSelector::new(),
            dashboard: None,
            notices: Notices::new(),
        };

        for notice in startup_notices {
            app.notify(notice);
        }
        app.sync_screens();

        app
    }

    /// Show a notice to the user.
    pub fn notify(&mut self, notice: Notice) {
        tracing::debug!("Notice ({:?}): {} - {}", notice.severity, notice.title, notice.message);
        self.notices.push(notice);
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn account_label(&self) -> Option<String> {
        self.gate
            .current_session()
            .map(|s| s.account_label().to_string())
    }

    /// Sign in with the email and password from the login form.
    pub fn sign_in(&mut self) {
        if self.login.pending {
            return;
        }
        self.login.pending = true;

        let gate = self.gate.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        let email = self.login.email.clone();
        let password = self.login.password.clone();

        self.rt.spawn(async move {
            let result = gate.sign_in(&email, &password).await;
            let _ = tx.send(UiMessage::SignInFinished(result));
            ctx.request_repaint();
        });
    }

    /// Open the external provider's sign-in page in the browser.
    pub fn start_external_sign_in(&mut self) {
        let provider = self.config.auth.oauth_provider.clone();
        let redirect = redirect_target(&self.config.auth.redirect_origin);

        match self.gate.sign_in_with_external_provider(&provider, &redirect) {
            Ok(url) => {
                self.ctx.open_url(egui::OpenUrl::new_tab(url));
                self.login.awaiting_redirect = true;
                self.notify(Notice::info(
                    "Continue in Browser",
                    "Finish signing in, then paste the link you were redirected to",
                ));
            }
            Err(e) => self.notify(Notice::error("Login Failed", e.to_string())),
        }
    }

    /// Complete the browser sign-in from the pasted redirect link.
    pub fn complete_external_sign_in(&mut self) {
        if self.login.pending {
            return;
        }
        self.login.pending = true;

        let gate = self.gate.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        let link = self.login.redirect_link.clone();

        self.rt.spawn(async move {
            let result = gate.complete_external_sign_in(&link).await;
            let _ = tx.send(UiMessage::RedirectFinished(result));
            ctx.request_repaint();
        });
    }

    pub fn sign_out(&mut self) {
        if self.signing_out {
            return;
        }
        self.signing_out = true;

        let gate = self.gate.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        self.rt.spawn(async move {
            gate.sign_out().await;
            let _ = tx.send(UiMessage::SignedOut);
            ctx.request_repaint();
        });
    }

    /// Persist the selected scope and move on to the dashboard.
    pub fn confirm_scope(&mut self) {
        match self.selector.confirm_selection(&self.scopes) {
            Ok(scope) => {
                self.notify(Notice::info(
                    "Selection Complete",
                    format!(
                        "Accessing {} Year {} Semester {} dashboard",
                        scope.department, scope.year, scope.semester
                    ),
                ));
                if self.flow.on_scope_confirmed(scope) {
                    self.sync_screens();
                }
            }
            Err(AppError::Validation(_)) => {
                self.notify(Notice::error(
                    "Selection Required",
                    "Please select department, year, and semester",
                ));
            }
            Err(e) => {
                tracing::warn!("Failed to save scope: {}", e);
                self.notify(Notice::error("Selection Failed", e.to_string()));
            }
        }
    }

    /// Leave the dashboard and pick a different scope.
    ///
    /// The selector starts from the current scope; the stored value is only
    /// replaced once the new selection is confirmed.
    pub fn change_scope(&mut self) {
        let Some(current) = self.flow.scope() else {
            return;
        };
        if self.flow.on_change_scope() {
            self.selector = ScopeSelector::from_scope(&current);
            self.sync_screens();
        }
    }

    /// Add the student from the dashboard form.
    pub fn add_student(&mut self) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };

        let notice = match dashboard.add_student() {
            Ok(record) => student_added_notice(record),
            Err(_) => missing_information_notice(),
        };
        self.notify(notice);
    }

    pub fn export_attendance(&mut self, format: ExportFormat) {
        if let Some(notice) = self.dashboard.as_ref().map(|d| d.export_attendance(format)) {
            self.notify(notice);
        }
    }

    pub fn mark_attendance(&mut self) {
        if let Some(notice) = self.dashboard.as_ref().map(|d| d.mark_attendance_today()) {
            self.notify(notice);
        }
    }

    /// Bring screen view-models in line with the flow state.
    fn sync_screens(&mut self) {
        match self.flow.state() {
            FlowState::Unauthenticated => {
                self.dashboard = None;
                self.selector.reset();
                self.login.password.clear();
                self.login.awaiting_redirect = false;
                self.login.redirect_link.clear();
            }
            FlowState::AwaitingScope => {
                self.dashboard = None;
                self.login.reset();
            }
            FlowState::Ready(scope) => {
                self.login.reset();
                if self.dashboard.as_ref().map(|d| *d.scope()) != Some(scope) {
                    self.dashboard = Some(Dashboard::new(scope));
                }
            }
        }
    }

    /// Poll async operation results and session changes.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::SignInFinished(result) | UiMessage::RedirectFinished(result) => {
                    self.login.pending = false;
                    match result {
                        Ok(_) => {
                            self.notify(Notice::info("Login Successful", "Welcome to the Student Portal Admin"));
                        }
                        Err(e) => {
                            self.notify(Notice::error("Login Failed", e.to_string()));
                        }
                    }
                }
                UiMessage::SignedOut => {
                    self.signing_out = false;
                    self.notify(Notice::info("Signed Out", "You have been signed out"));
                }
            }
        }

        if self.session_rx.has_changed().unwrap_or(false) {
            let session = self.session_rx.borrow_and_update().clone();
            if self.flow.on_session_changed(session.as_ref()) {
                self.sync_screens();
            }
        }
    }

    /// Render top bar with account and sign-out.
    fn show_top_bar(&mut self, ctx: &egui::Context) {
        if matches!(self.flow.state(), FlowState::Unauthenticated) {
            return;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Student Portal").strong());
                if let Some(scope) = self.flow.scope() {
                    ui.separator();
                    ui.label(RichText::new(scope.heading()).weak());
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = if self.signing_out { "Signing Out..." } else { "Sign Out" };
                    if ui.add_enabled(!self.signing_out, egui::Button::new(label)).clicked() {
                        self.sign_out();
                    }
                    if self.flow.scope().is_some() && ui.button("Change Scope").clicked() {
                        self.change_scope();
                    }
                    if let Some(account) = self.account_label() {
                        ui.label(RichText::new(account).weak());
                    }
                });
            });
        });
    }

    /// Render transient notices in the top-right corner.
    fn show_notices(&mut self, ctx: &egui::Context) {
        self.notices.expire(Local::now());

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 48.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (idx, notice) in self.notices.active().iter().enumerate() {
                    let color = match notice.severity {
                        Severity::Info => colors::SUCCESS,
                        Severity::Error => colors::ERROR,
                    };

                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&notice.title).strong().color(color));
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui.small_button("x").clicked() {
                                    dismissed = Some(idx);
                                }
                            });
                        });
                        ui.label(&notice.message);
                    });
                    ui.add_space(6.0);
                }
            });

        if let Some(idx) = dismissed {
            self.notices.dismiss(idx);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Repaint while requests are in flight or notices need to expire
        if self.login.pending || self.signing_out {
            ctx.request_repaint();
        } else if self.notices.has_active() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        self.show_top_bar(ctx);
        self.show_notices(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.flow.state() {
            FlowState::Unauthenticated => login_panel::show(self, ui),
            FlowState::AwaitingScope => scope_panel::show(self, ui),
            FlowState::Ready(_) => dashboard::show(self, ui),
        });
    }
}
