//! Required-field validation on form submission.

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "form-validation", |page| {
        bind_forms(page)?;
        Ok(())
    });
}

/// Adds a `submit` listener to every form that cancels the submission and
/// alerts while any required field is blank. Returns the forms bound.
pub fn bind_forms(page: &mut Page) -> Result<Vec<NodeId>> {
    let config = page.shared_config();
    let forms = page.query_selector_all(&config.form_selector)?;
    for &form in &forms {
        let config = config.clone();
        page.add_event_listener(form, "submit", move |page, event| {
            if validate_required_fields(page, form)? {
                return Ok(());
            }
            event.prevent_default();
            page.alert(&config.validation_message);
            Ok(())
        });
    }
    Ok(forms)
}

/// Marks each `[required]` descendant of `form` with the danger border when
/// its trimmed value is empty and the default border otherwise. Returns
/// whether every required field was filled.
pub fn validate_required_fields(page: &mut Page, form: NodeId) -> Result<bool> {
    let config = page.shared_config();
    let fields = page.query_selector_all_within(form, "[required]")?;
    let mut empty = 0usize;
    for field in fields.iter().copied() {
        if page.value(field)?.trim().is_empty() {
            empty += 1;
            page.set_style(field, "border-color", &config.danger_border_color)?;
        } else {
            page.set_style(field, "border-color", &config.default_border_color)?;
        }
    }

    let valid = empty == 0;
    tracing::debug!(
        form = %page.trace_node_label(form),
        required = fields.len(),
        empty,
        "validated required fields"
    );
    page.trace_behavior_line(format!(
        "[behavior] validate form={} required={} empty={empty}",
        page.trace_node_label(form),
        fields.len()
    ));
    Ok(valid)
}
