//! Smooth scrolling for in-page fragment links.

use crate::{NodeId, Page, Result, ScrollBehavior};

/// Binds every fragment link present right now. Links added to the page
/// later are not bound.
pub fn install(page: &mut Page) -> Result<()> {
    bind_fragment_links(page)?;
    Ok(())
}

/// Each bound link swallows its click and smooth-scrolls to the element
/// whose id is the fragment. A fragment naming nothing is a silent no-op.
pub fn bind_fragment_links(page: &mut Page) -> Result<Vec<NodeId>> {
    let config = page.shared_config();
    let anchors = page.query_selector_all(&config.fragment_link_selector)?;
    for &anchor in &anchors {
        page.add_event_listener(anchor, "click", move |page, event| {
            event.prevent_default();
            let href = page.attribute(anchor, "href").unwrap_or_default();
            let fragment = href.strip_prefix('#').unwrap_or(&href);
            let target = if fragment.is_empty() {
                None
            } else {
                page.element_by_id(fragment)
            };
            match target {
                Some(target) => page.scroll_into_view(target, ScrollBehavior::Smooth),
                None => {
                    tracing::debug!(href = %href, "fragment target missing");
                    page.trace_behavior_line(format!("[behavior] smooth-scroll missing={href}"));
                }
            }
            Ok(())
        });
    }
    tracing::debug!(bound = anchors.len(), "bound fragment links");
    Ok(anchors)
}
