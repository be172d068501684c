//! Static HTML rendering of the selected videos.
//!
//! Output depends only on the keyword and the rows passed in: no timestamps,
//! no generated ids, no locale-dependent number formatting.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use manual_core::Item;
use manual_logging::manual_info;

use crate::filename::manual_filename;
use crate::persist::{AtomicFileWriter, PersistError};

const STYLESHEET: &str = r#"    body { font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; background-color: #EBF8FF; color: #2C5282; }
    h1 { color: #2B6CB0; text-align: center; margin-bottom: 20px; }
    table { width: 100%; border-collapse: collapse; background-color: white; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #E2E8F0; }
    th { background-color: #4299E1; color: white; }
    tr:hover { background-color: #EBF8FF; }
    a { color: #3182CE; text-decoration: none; font-weight: bold; }
    a:hover { text-decoration: underline; }
"#;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub lang: String,
    pub heading_suffix: String,
    pub column_title: String,
    pub column_views: String,
    pub column_duration: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            lang: "ja".to_string(),
            heading_suffix: "動画マニュアル".to_string(),
            column_title: "タイトル".to_string(),
            column_views: "視聴回数".to_string(),
            column_duration: "再生時間".to_string(),
        }
    }
}

/// A rendered document plus the filename suggested for saving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Renders `rows` in the given order as a standalone HTML page.
pub fn render_manual_html(keyword: &str, rows: &[Item], options: &ExportOptions) -> Vec<u8> {
    let heading = escape_html(&format!("{keyword} {}", options.heading_suffix));
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(html, "<html lang=\"{}\">", escape_html(&options.lang));
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "  <title>{heading}</title>");
    html.push_str("  <style>\n");
    html.push_str(STYLESHEET);
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    let _ = writeln!(html, "  <h1>{heading}</h1>");
    html.push_str("  <table>\n");
    html.push_str("    <thead>\n");
    html.push_str("      <tr>\n");
    for column in [
        &options.column_title,
        &options.column_views,
        &options.column_duration,
    ] {
        let _ = writeln!(html, "        <th>{}</th>", escape_html(column));
    }
    html.push_str("      </tr>\n");
    html.push_str("    </thead>\n");
    html.push_str("    <tbody>\n");
    for item in rows {
        html.push_str("      <tr>\n");
        let _ = writeln!(
            html,
            "        <td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></td>",
            escape_html(&item.watch_url()),
            escape_html(&item.title)
        );
        let _ = writeln!(html, "        <td>{}</td>", item.view_metric);
        let _ = writeln!(html, "        <td>{}</td>", escape_html(&item.duration_text));
        html.push_str("      </tr>\n");
    }
    html.push_str("    </tbody>\n");
    html.push_str("  </table>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html.into_bytes()
}

/// Renders the document and derives its filename from the keyword.
pub fn export_document(keyword: &str, rows: &[Item], options: &ExportOptions) -> ExportDocument {
    ExportDocument {
        filename: manual_filename(keyword),
        bytes: render_manual_html(keyword, rows, options),
    }
}

/// Writes `document` into `output_dir`, replacing any earlier export of the
/// same keyword.
pub fn save_export(output_dir: &Path, document: &ExportDocument) -> Result<PathBuf, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let path = writer.write(&document.filename, &document.bytes)?;
    manual_info!("exported {} bytes to {:?}", document.bytes.len(), path);
    Ok(path)
}

/// Escapes the HTML metacharacters `& < > " '`.
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
