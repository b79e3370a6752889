mod app;
mod ui;

use anyhow::{Context, Result};
use tracing::info;

use fleet_console::config::{default_webview_data_dir, ClientConfig};
use fleet_console::logging;

fn main() -> Result<()> {
    logging::init();

    let config = ClientConfig::from_env().context("invalid console configuration")?;
    let webview_data_dir =
        default_webview_data_dir().context("should resolve and create WebView data directory")?;
    info!(
        api_base_url = %config.api_base_url,
        page_size = config.page_size,
        "starting fleet console"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Fleet Console"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(app::App);

    Ok(())
}
