use anyhow::Result;
use std::io::{self, BufRead, BufReader, Write};
use tracing::info;

use crate::display::render_text;
use crate::page::Page;
use crate::viewer::DrawViewer;

const QUIT_COMMANDS: [&str; 3] = ["salir", "quit", "q"];

/// Selection loop: every non-empty line is a draw number to show. After each
/// selection the page is written out as text. Stops at end of input or on a
/// quit command.
pub async fn serve<R, W>(viewer: &mut DrawViewer<Page>, reader: R, mut writer: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if QUIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
            info!("selection loop closed");
            break;
        }

        viewer.select_draw(input).await;

        writeln!(writer, "{}", render_text(viewer.surface()))?;
        writer.flush()?;
    }

    Ok(())
}

pub fn stdio() -> (BufReader<io::Stdin>, io::Stdout) {
    (BufReader::new(io::stdin()), io::stdout())
}
