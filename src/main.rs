use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::App;
use crate::config::{ensure_webview_data_dir, AppConfig};

mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() {
    let config = AppConfig::load().expect("should resolve application data directory");
    init_tracing(&config.log_filter);

    let webview_data_dir = ensure_webview_data_dir(&config.data_dir)
        .expect("should resolve and create WebView2 data directory");
    info!(db = %config.db_path.display(), page_size = config.page_size, "Started");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Panelboard Catalog"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
}
