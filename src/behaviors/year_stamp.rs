use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "year-stamp", |page| {
        stamp_current_year(page)?;
        Ok(())
    });
}

/// Writes the current calendar year into the copyright element once.
pub fn stamp_current_year(page: &mut Page) -> Result<Option<NodeId>> {
    let config = page.shared_config();
    let Some(target) = page.element_by_id(&config.year_stamp_id) else {
        return Ok(None);
    };
    let year = page.current_year();
    page.set_text_content(target, &year.to_string())?;
    tracing::debug!(year, "stamped copyright year");
    Ok(Some(target))
}
