use super::*;

const SEARCH_PAGE: &str = r#"
    <form id='filter' action='/results' method='get'>
      <input id='q' name='search' type='text'>
      <input id='year' name='year' required>
    </form>
    "#;

#[test]
fn keystroke_burst_submits_once_after_the_last_key() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, SEARCH_PAGE)?;

    page.type_text("#q", "a")?;
    page.advance_time(200)?;
    page.type_text("#q", "am")?;
    page.advance_time(200)?;
    page.type_text("#q", "amy")?;
    assert_eq!(page.pending_timers().len(), 1);

    page.advance_time(499)?;
    assert!(page.take_form_submissions().is_empty());

    page.advance_time(1)?;
    assert_eq!(page.now_ms(), 900);
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].form_id.as_deref(), Some("filter"));
    assert!(!submissions[0].via_submit_event);
    assert_eq!(
        submissions[0].fields,
        vec![
            ("search".to_string(), "amy".to_string()),
            ("year".to_string(), String::new()),
        ]
    );
    Ok(())
}

#[test]
fn debounced_submit_bypasses_required_validation() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, SEARCH_PAGE)?;
    page.type_text("#q", "lee")?;
    page.advance_time(500)?;

    assert!(page.take_alert_messages().is_empty());
    assert_eq!(page.take_form_submissions().len(), 1);
    page.assert_style("#year", "border-color", "")?;
    Ok(())
}

#[test]
fn keys_spaced_past_the_interval_submit_each_time() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, SEARCH_PAGE)?;
    page.type_text("#q", "a")?;
    page.advance_time(500)?;
    page.type_text("#q", "ab")?;
    page.advance_time(500)?;

    let values = page
        .take_form_submissions()
        .into_iter()
        .map(|submission| submission.fields[0].1.clone())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["a".to_string(), "ab".to_string()]);
    Ok(())
}

#[test]
fn search_input_without_form_does_nothing() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, "<input id='q' name='search'>")?;
    page.enable_trace(true);
    page.type_text("#q", "amy")?;
    page.advance_time(500)?;

    assert!(page.take_form_submissions().is_empty());
    assert!(
        page.take_trace_logs()
            .iter()
            .any(|line| line == "[behavior] search no-form")
    );
    Ok(())
}

#[test]
fn only_the_first_search_input_is_bound() -> Result<()> {
    let html = r#"
        <form id='one'><input id='first' name='search'></form>
        <form id='two'><input id='second' name='search'></form>
        "#;
    let mut page = Page::open(PORTAL_URL, html)?;
    let first = node(&page, "#first")?;
    let second = node(&page, "#second")?;
    assert_eq!(page.listener_count(first, "input"), 1);
    assert_eq!(page.listener_count(second, "input"), 0);

    page.type_text("#second", "x")?;
    page.advance_time(1000)?;
    assert!(page.take_form_submissions().is_empty());
    Ok(())
}

#[test]
fn form_attribute_decides_the_owner() -> Result<()> {
    let html = r#"
        <form id='outer'></form>
        <div><input id='q' name='search' form='outer'></div>
        "#;
    let mut page = Page::open(PORTAL_URL, html)?;
    page.type_text("#q", "x")?;
    page.flush()?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].form_id.as_deref(), Some("outer"));
    Ok(())
}
