//! The portal's page behaviors.
//!
//! Every behavior is independent: it reads its hooks from the page's
//! [`BehaviorConfig`](crate::BehaviorConfig), binds listeners or timers, and
//! silently does nothing when the markup it looks for is absent. Load-time
//! behaviors bind on `DOMContentLoaded`; smooth scrolling binds as soon as it
//! is installed.

use crate::{Page, Result};

pub mod alerts;
pub mod csv_export;
pub mod dialogs;
pub mod form_validation;
pub mod grade_preview;
pub mod mobile_menu;
pub mod nav_highlight;
pub mod search;
pub mod smooth_scroll;
pub mod year_stamp;

pub use csv_export::{export_table_to_csv, table_to_csv};
pub use dialogs::{confirm_action, print_report};
pub use grade_preview::{Grade, classify, parse_float};

/// Installs every behavior in the order the portal script registers them.
pub fn install_all(page: &mut Page) -> Result<()> {
    alerts::install(page);
    form_validation::install(page);
    search::install(page);
    nav_highlight::install(page);
    smooth_scroll::install(page)?;
    mobile_menu::install(page);
    grade_preview::install(page);
    year_stamp::install(page);
    tracing::debug!("installed page behaviors");
    Ok(())
}

pub(crate) fn on_dom_content_loaded<F>(page: &mut Page, behavior: &'static str, handler: F)
where
    F: Fn(&mut Page) -> Result<()> + 'static,
{
    let document = page.document();
    page.add_event_listener(document, "DOMContentLoaded", move |page, _| {
        page.trace_behavior_line(format!("[behavior] {behavior} load"));
        handler(page)
    });
}
