//! Mobile navigation toggle.

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "mobile-menu", |page| {
        bind_nav_toggle(page)?;
        Ok(())
    });
}

/// Binds the toggle when both it and the menu exist. Returns the pair.
pub fn bind_nav_toggle(page: &mut Page) -> Result<Option<(NodeId, NodeId)>> {
    let config = page.shared_config();
    let Some(toggle) = page.element_by_id(&config.nav_toggle_id) else {
        return Ok(None);
    };
    let Some(menu) = page.query_selector(&config.nav_menu_selector)? else {
        return Ok(None);
    };

    page.add_event_listener(toggle, "click", move |page, _| {
        toggle_menu(page, toggle, menu)?;
        Ok(())
    });
    Ok(Some((toggle, menu)))
}

/// Flips the menu's active class and swaps the toggle icon to match.
/// State is read back from the class list every time. Returns whether the
/// menu is now open.
pub fn toggle_menu(page: &mut Page, toggle: NodeId, menu: NodeId) -> Result<bool> {
    let config = page.shared_config();
    page.toggle_class(menu, &config.nav_menu_active_class)?;
    let open = page.has_class(menu, &config.nav_menu_active_class);

    if let Some(icon) = page.query_selector_within(toggle, "i")? {
        let (remove, add) = if open {
            (&config.nav_icon_closed_class, &config.nav_icon_open_class)
        } else {
            (&config.nav_icon_open_class, &config.nav_icon_closed_class)
        };
        page.remove_class(icon, remove)?;
        page.add_class(icon, add)?;
    }

    tracing::debug!(open, "toggled navigation menu");
    page.trace_behavior_line(format!("[behavior] mobile-menu open={open}"));
    Ok(open)
}
