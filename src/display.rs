//! Plain-text rendering of a [`Page`] for the terminal.

use std::fmt::Write;

use crate::page::{Content, Page, Pool, Region};

const RULE: &str = "────────────────────────────────────────";

pub fn render_text(page: &Page) -> String {
    let mut out = String::new();

    for error in page.errors() {
        let _ = writeln!(out, "⚠ {}", error);
    }

    if let Some(label) = page.text(Region::DrawNumber) {
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", label);
        if let Some(date) = page.text(Region::DrawDate) {
            let _ = writeln!(out, "{}", date);
        }
        let _ = writeln!(out, "{}", RULE);
    }

    for pool in [Pool::Telekino, Pool::Rekino] {
        if let Some(content) = page.get(pool.region()) {
            let _ = writeln!(out, "{:<9} {}", format!("{}:", pool.label()), pool_line(content));
        }
    }

    if let Some(Content::Prizes(rows)) = page.get(Region::Prizes) {
        if !rows.is_empty() {
            let _ = writeln!(out, "\nPremios:");
            for row in rows {
                let _ = writeln!(
                    out,
                    "  [{}] {} | ganadores: {} | premio: {}",
                    row.pool, row.category, row.winners, row.amount
                );
            }
        }
    }

    if let Some(Content::Options(options)) = page.get(Region::AvailableDraws) {
        let _ = writeln!(out, "\nSorteos disponibles:");
        if options.is_empty() {
            let _ = writeln!(out, "  No hay sorteos disponibles");
        }
        for option in options {
            let marker = if option.selected { '>' } else { ' ' };
            let _ = writeln!(out, "  {} {}", marker, option.label);
        }
    }

    if let Some(updated) = page.text(Region::LastUpdate) {
        let _ = writeln!(out, "\nÚltima actualización: {}", updated);
    }

    out
}

fn pool_line(content: &Content) -> String {
    match content {
        Content::Numbers { values, .. } => values
            .iter()
            .map(|value| format!("[{}]", value))
            .collect::<Vec<_>>()
            .join(" "),
        Content::Placeholder(placeholder) => match placeholder.hint() {
            Some(hint) => format!("{} ({})", placeholder.message(), hint),
            None => placeholder.message(),
        },
        Content::Text(text) => text.clone(),
        Content::Prizes(_) | Content::Options(_) => String::new(),
    }
}
