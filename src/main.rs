use anyhow::Result;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use telekino_lib::config;
use telekino_lib::display::render_text;
use telekino_lib::events::{self, stdio};
use telekino_lib::reports::save_html_report;
use telekino_lib::{DrawViewer, Page};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("🎰 Cargando resultados de Telekino.");

    let source = config.data_source();
    let mut viewer = DrawViewer::new(Page::new()).with_select_delay(config.select_delay());
    let loaded = viewer.initialize(&source).await;

    let (reader, mut writer) = stdio();
    writeln!(writer, "{}", render_text(viewer.surface()))?;
    writer.flush()?;

    if loaded.is_ok() && !config.once {
        events::serve(&mut viewer, reader, writer)
            .await
            .inspect_err(|e| {
                tracing::error!("selection loop error: {:?}", e);
            })?;
    }

    if let Some(path) = &config.report_path {
        save_html_report(viewer.surface(), path)?;
        tracing::info!(path = %path.display(), "report saved");
    }

    Ok(())
}
