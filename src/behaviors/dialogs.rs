//! Host dialog pass-throughs used by the portal's templates.

use crate::Page;

/// Asks the user to confirm a destructive action.
pub fn confirm_action(page: &mut Page, message: &str) -> bool {
    let accepted = page.confirm(message);
    page.trace_behavior_line(format!("[behavior] confirm accepted={accepted}"));
    accepted
}

/// Opens the host print dialog for the current report.
pub fn print_report(page: &mut Page) {
    page.print();
    page.trace_behavior_line("[behavior] print".into());
}
