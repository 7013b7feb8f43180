//! Student Portal - desktop admin console for student records.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use student_portal as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use app::auth::{AuthClient, SessionGate};
use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::notify::Notice;
use app::scope::ScopeStore;
use app::storage::{FileStore, KeyValueStore, MemoryStore};
use app::ui::App;

/// Desktop admin console for student records.
#[derive(Parser)]
#[command(name = "student-portal")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut notices = Vec::new();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let (config, config_status) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, None),
        ConfigLoadResult::Missing => {
            let config = AppConfig::default();
            let status = match config.save(&config_path) {
                Ok(()) => format!("Config missing, wrote defaults to {:?}", config_path),
                Err(e) => format!("Config missing and defaults could not be written: {}", e),
            };
            notices.push(Notice::error(
                "Configuration Missing",
                "No config.toml was found. Using default settings.",
            ));
            (config, Some(status))
        }
        ConfigLoadResult::Invalid(e) => {
            notices.push(Notice::error(
                "Configuration Error",
                format!("{}. Using default settings.", e),
            ));
            (AppConfig::default(), Some(format!("Config invalid, using defaults: {}", e)))
        }
    };

    let data_dir = config.data_dir();
    let _log_guard = init_logging(&config.logging, &data_dir);

    tracing::info!("Student Portal starting...");
    tracing::info!("Config path: {:?}", config_path);
    match config_status {
        Some(status) => tracing::warn!("{}", status),
        None => tracing::info!("Config loaded successfully"),
    }
    tracing::info!("Data directory: {:?}", data_dir);

    let store: Arc<dyn KeyValueStore> = match FileStore::in_dir(&data_dir) {
        Ok(store) => {
            tracing::info!("Local storage: {:?}", store.path());
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("Local storage unavailable, falling back to memory: {}", e);
            notices.push(Notice::error(
                "Storage Unavailable",
                "Sign-in and selections will not be remembered after closing",
            ));
            Arc::new(MemoryStore::new())
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let client = AuthClient::new(&config.auth, store.clone()).context("Failed to create auth client")?;
    let gate = rt.block_on(SessionGate::start(Arc::new(client)));
    let scopes = ScopeStore::new(store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Portal")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Portal",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(cc.egui_ctx.clone(), rt, config, gate, scopes, notices)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))
}

/// Initialize stderr logging and, when enabled, a daily rolling log file.
///
/// The returned guard must be held until exit so buffered lines are flushed.
fn init_logging(logging: &LoggingConfig, data_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (file_layer, guard) = if logging.file {
        let appender = std::fs::create_dir_all(data_dir)
            .map_err(|e| e.to_string())
            .and_then(|()| {
                RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix("student-portal")
                    .filename_suffix("log")
                    .build(data_dir)
                    .map_err(|e| e.to_string())
            });
        match appender {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().with_writer(writer).with_ansi(false)),
                    Some(guard),
                )
            }
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
