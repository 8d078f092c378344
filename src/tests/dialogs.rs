use super::*;

#[test]
fn confirm_uses_queued_answers_then_the_default() -> Result<()> {
    let mut page = Page::from_html("<p>Delete?</p>")?;
    page.enqueue_confirm_response(true);

    assert!(behaviors::confirm_action(&mut page, "Delete this result?"));
    assert!(!behaviors::confirm_action(&mut page, "Really?"));

    page.set_default_confirm_response(true);
    assert!(behaviors::confirm_action(&mut page, "Third"));
    assert_eq!(
        page.take_confirm_messages(),
        vec![
            "Delete this result?".to_string(),
            "Really?".to_string(),
            "Third".to_string()
        ]
    );
    Ok(())
}

#[test]
fn confirm_can_gate_a_listener() -> Result<()> {
    let html = "<form id='del' action='/results/1/delete' method='post'><button id='go'>Delete</button></form>";
    let mut page = Page::open(PORTAL_URL, html)?;
    let button = node(&page, "#go")?;
    page.add_event_listener(button, "click", |page, event| {
        if !behaviors::confirm_action(page, "Delete?") {
            event.prevent_default();
        }
        Ok(())
    });

    page.enqueue_confirm_response(false);
    page.click("#go")?;
    assert!(page.take_form_submissions().is_empty());

    page.enqueue_confirm_response(true);
    page.click("#go")?;
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}

#[test]
fn print_is_counted() -> Result<()> {
    let mut page = Page::from_html("<main></main>")?;
    assert_eq!(page.print_count(), 0);
    behaviors::print_report(&mut page);
    behaviors::print_report(&mut page);
    assert_eq!(page.print_count(), 2);
    Ok(())
}
