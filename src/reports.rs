use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::page::{Content, Page, Pool, Region, SelectOption};
use crate::types::PrizeRow;

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, sans-serif;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #1e9e5a 0%, #0b5d3b 100%);
            min-height: 100vh;
        }
        main {
            max-width: 960px;
            margin: 0 auto;
            background: white;
            border-radius: 15px;
            box-shadow: 0 20px 40px rgba(0,0,0,0.1);
            overflow: hidden;
        }
        .header {
            background: linear-gradient(135deg, #0b5d3b, #1e9e5a);
            color: white;
            padding: 30px;
            text-align: center;
        }
        .header h1 { margin: 0; font-size: 2.2em; }
        .header .date { font-size: 1.2em; margin-top: 10px; opacity: 0.9; }
        .content { padding: 30px; }
        .error {
            background: #fed7d7;
            color: #9b2c2c;
            padding: 15px 20px;
            font-weight: 600;
        }
        .pool h2 { color: #2d3748; }
        .numbers {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(60px, 1fr));
            gap: 12px;
        }
        .number {
            background: #1e9e5a;
            color: white;
            border-radius: 50%;
            width: 56px;
            height: 56px;
            line-height: 56px;
            text-align: center;
            font-size: 1.4em;
            font-weight: 700;
            font-family: 'Courier New', monospace;
        }
        .number.rekino { background: #d69e2e; }
        .no-data, .loading { color: #718096; padding: 15px; }
        table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        th, td { padding: 8px; border-bottom: 1px solid #e2e8f0; text-align: left; }
        .footer {
            background: #2d3748;
            color: white;
            padding: 20px;
            text-align: center;
            font-size: 0.9em;
        }
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the page as a standalone HTML document. Region ids match the
/// element ids of the published results page.
pub fn generate_html_report(page: &Page, generated_at: &str) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="es-AR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resultados Telekino{}</title>
    <style>{}</style>
</head>
<body>
<main>
"#,
        page.text(Region::DrawNumber)
            .map(|label| format!(" - {}", escape_html(label)))
            .unwrap_or_default(),
        STYLE
    ));

    for error in page.errors() {
        html.push_str(&format!(
            "    <div class=\"error\">{}</div>\n",
            escape_html(error)
        ));
    }

    if page.get(Region::DrawNumber).is_some() {
        html.push_str(&format!(
            r#"    <div class="header">
        <h1 id="{}">{}</h1>
        <div class="date" id="{}">{}</div>
    </div>
"#,
            Region::DrawNumber.id(),
            escape_html(page.text(Region::DrawNumber).unwrap_or_default()),
            Region::DrawDate.id(),
            escape_html(page.text(Region::DrawDate).unwrap_or_default()),
        ));
    }

    html.push_str("    <div class=\"content\">\n");

    if let Some(Content::Options(options)) = page.get(Region::AvailableDraws) {
        html.push_str(&render_selector(options));
    }

    for pool in [Pool::Telekino, Pool::Rekino] {
        if let Some(content) = page.get(pool.region()) {
            html.push_str(&format!(
                "        <section class=\"pool\">\n            <h2>{}</h2>\n            <div class=\"numbers\" id=\"{}\">\n{}            </div>\n        </section>\n",
                pool.label(),
                pool.region().id(),
                render_pool(pool, content)
            ));
        }
    }

    if let Some(Content::Prizes(rows)) = page.get(Region::Prizes) {
        if !rows.is_empty() {
            html.push_str(&render_prizes(rows));
        }
    }

    html.push_str("    </div>\n");

    html.push_str(&format!(
        r#"    <div class="footer">
        <p id="{}">Última actualización: {}</p>
        <p>Reporte generado: {}</p>
    </div>
</main>
</body>
</html>
"#,
        Region::LastUpdate.id(),
        escape_html(page.text(Region::LastUpdate).unwrap_or("desconocida")),
        escape_html(generated_at)
    ));

    html
}

fn render_selector(options: &[SelectOption]) -> String {
    let mut html = format!(
        "        <select id=\"{}\">\n",
        Region::AvailableDraws.id()
    );

    if options.is_empty() {
        html.push_str("            <option value=\"\">No hay sorteos disponibles</option>\n");
    }

    for option in options {
        html.push_str(&format!(
            "            <option value=\"{}\"{}>{}</option>\n",
            escape_html(&option.value),
            if option.selected { " selected" } else { "" },
            escape_html(&option.label)
        ));
    }

    html.push_str("        </select>\n");
    html
}

fn render_pool(pool: Pool, content: &Content) -> String {
    match content {
        Content::Numbers { values, .. } => {
            let class = match pool {
                Pool::Telekino => "number",
                Pool::Rekino => "number rekino",
            };
            values
                .iter()
                .map(|value| {
                    format!(
                        "                <div class=\"{}\">{}</div>\n",
                        class,
                        escape_html(value)
                    )
                })
                .collect()
        }
        Content::Placeholder(placeholder) => {
            let mut html = format!(
                "                <div class=\"{}\">\n                    <p>{}</p>\n",
                placeholder.css_class(),
                escape_html(&placeholder.message())
            );
            if let Some(hint) = placeholder.hint() {
                html.push_str(&format!(
                    "                    <small>{}</small>\n",
                    escape_html(hint)
                ));
            }
            html.push_str("                </div>\n");
            html
        }
        Content::Text(text) => format!("                <p>{}</p>\n", escape_html(text)),
        Content::Prizes(_) | Content::Options(_) => String::new(),
    }
}

fn render_prizes(rows: &[PrizeRow]) -> String {
    let mut html = format!(
        "        <section id=\"{}\">\n            <h2>Premios</h2>\n            <table>\n                <tr><th>Juego</th><th>Categoría</th><th>Ganadores</th><th>Premio</th></tr>\n",
        Region::Prizes.id()
    );

    for row in rows {
        html.push_str(&format!(
            "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.pool),
            escape_html(&row.category),
            escape_html(&row.winners),
            escape_html(&row.amount)
        ));
    }

    html.push_str("            </table>\n        </section>\n");
    html
}

pub fn save_html_report(page: &Page, path: &Path) -> Result<()> {
    let generated_at = Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    let html_content = generate_html_report(page, &generated_at);

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    file.write_all(html_content.as_bytes())?;
    Ok(())
}
