//! Debounced submission of the search box.

use std::cell::Cell;
use std::rc::Rc;

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "search", |page| {
        bind_search_input(page)?;
        Ok(())
    });
}

/// Binds the first search input. Each `input` event cancels the pending
/// submit timer and schedules a new one, so a burst of keystrokes submits
/// the owning form once, a debounce interval after the last keystroke.
pub fn bind_search_input(page: &mut Page) -> Result<Option<NodeId>> {
    let config = page.shared_config();
    let Some(input) = page.query_selector(&config.search_input_selector)? else {
        return Ok(None);
    };

    let pending: Rc<Cell<Option<i64>>> = Rc::default();
    let delay_ms = config.search_debounce_ms;
    page.add_event_listener(input, "input", move |page, _| {
        if let Some(timer_id) = pending.take() {
            page.clear_timeout(timer_id);
        }
        let timer_id = page.set_timeout(delay_ms, "search-debounce", move |page| {
            submit_owner_form(page, input)
        });
        pending.set(Some(timer_id));
        Ok(())
    });
    Ok(Some(input))
}

fn submit_owner_form(page: &mut Page, input: NodeId) -> Result<()> {
    let Some(form) = page.form_owner(input) else {
        tracing::debug!("search input has no form owner; nothing to submit");
        page.trace_behavior_line("[behavior] search no-form".into());
        return Ok(());
    };
    page.trace_behavior_line(format!(
        "[behavior] search submit form={}",
        page.trace_node_label(form)
    ));
    page.submit_form(form)
}
