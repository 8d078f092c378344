//! Auto-dismissal of flash alert banners.

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "alerts", |page| {
        schedule_dismissal(page)?;
        Ok(())
    });
}

/// Schedules every alert currently in the document for removal: the exit
/// animation starts after the display delay and the element is removed once
/// the exit delay has also passed. Returns the alerts scheduled.
pub fn schedule_dismissal(page: &mut Page) -> Result<Vec<NodeId>> {
    let config = page.shared_config();
    let alerts = page.query_selector_all(&config.alert_selector)?;
    for &alert in &alerts {
        let config = config.clone();
        page.set_timeout(config.alert_display_ms, "alert-exit", move |page| {
            page.set_style(alert, "animation", &config.alert_exit_animation)?;
            page.set_timeout(config.alert_exit_ms, "alert-remove", move |page| {
                let removed = page.remove(alert);
                tracing::debug!(alert = %page.trace_node_label(alert), removed, "alert dismissed");
                Ok(())
            });
            Ok(())
        });
    }
    if !alerts.is_empty() {
        page.trace_behavior_line(format!("[behavior] alerts scheduled={}", alerts.len()));
    }
    Ok(alerts)
}
