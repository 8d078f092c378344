use super::*;

mod alerts;
mod csv_export;
mod dialogs;
mod grade_preview;
mod mobile_menu;
mod search;
mod year_stamp;

const PORTAL_URL: &str = "https://portal.example/results";

fn node(page: &Page, selector: &str) -> Result<NodeId> {
    page.query_selector(selector)?
        .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}
