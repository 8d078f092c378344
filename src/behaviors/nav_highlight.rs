//! Highlighting of the navigation link for the current page.

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "nav-highlight", |page| {
        highlight_active_links(page)?;
        Ok(())
    });
}

/// Styles every navigation link whose raw `href` equals the page pathname.
/// The comparison is exact; other links are left as they are.
pub fn highlight_active_links(page: &mut Page) -> Result<Vec<NodeId>> {
    let config = page.shared_config();
    let path = page.location_pathname();
    let mut matched = Vec::new();
    for link in page.query_selector_all(&config.nav_link_selector)? {
        if page.attribute(link, "href").as_deref() != Some(path.as_str()) {
            continue;
        }
        page.set_style(link, "background", &config.nav_active_background)?;
        page.set_style(link, "color", &config.nav_active_color)?;
        matched.push(link);
    }
    tracing::debug!(path = %path, matched = matched.len(), "highlighted navigation");
    Ok(matched)
}
