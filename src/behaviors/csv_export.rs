//! Export of the page's data table as a CSV download.

use crate::{CsvEscaping, NodeId, Page, Result};

/// Serializes `table`: one line per descendant `tr`, cells are the rendered
/// text of each descendant `td`/`th` in document order, joined with commas.
pub fn table_to_csv(page: &Page, table: NodeId, escaping: CsvEscaping) -> Result<String> {
    let mut lines = Vec::new();
    for row in page.query_selector_all_within(table, "tr")? {
        let cells = page
            .query_selector_all_within(row, "td, th")?
            .into_iter()
            .map(|cell| escape_field(&page.inner_text(cell), escaping))
            .collect::<Vec<_>>();
        lines.push(cells.join(","));
    }
    Ok(lines.join("\n"))
}

fn escape_field(text: &str, escaping: CsvEscaping) -> String {
    match escaping {
        CsvEscaping::Preserve => text.to_string(),
        CsvEscaping::Rfc4180 => {
            if text.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", text.replace('"', "\"\""))
            } else {
                text.to_string()
            }
        }
    }
}

/// Downloads the first data table as `filename` through a hidden, clicked
/// and then removed `download` anchor. Returns `Ok(false)` when the page has
/// no data table.
pub fn export_table_to_csv(page: &mut Page, filename: &str) -> Result<bool> {
    let config = page.shared_config();
    let Some(table) = page.query_selector(&config.data_table_selector)? else {
        tracing::debug!(filename, "no data table to export");
        page.trace_behavior_line("[behavior] csv-export no-table".into());
        return Ok(false);
    };

    let csv = table_to_csv(page, table, config.csv_escaping)?;
    let bytes = csv.into_bytes();
    tracing::debug!(filename, bytes = bytes.len(), "exporting data table");
    let url = page.create_object_url("text/csv", bytes);

    let anchor = page.create_element("a");
    page.set_attribute(anchor, "hidden", "")?;
    page.set_attribute(anchor, "href", &url)?;
    page.set_attribute(anchor, "download", filename)?;
    let container = page.body().unwrap_or_else(|| page.document());
    page.append_child(container, anchor)?;
    let clicked = page.click_node(anchor);
    page.remove(anchor);
    page.revoke_object_url(&url);
    clicked?;

    page.trace_behavior_line(format!("[behavior] csv-export file={filename}"));
    Ok(true)
}
