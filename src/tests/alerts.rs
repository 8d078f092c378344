use super::*;

#[test]
fn alert_slides_up_then_leaves_the_document() -> Result<()> {
    let html = r#"
        <div class='alert alert-success' id='flash'>Results saved</div>
        <p id='keep'>Semester 1</p>
        "#;

    let mut page = Page::open(PORTAL_URL, html)?;
    page.advance_time(4999)?;
    page.assert_exists("#flash")?;
    page.assert_style("#flash", "animation", "")?;

    page.advance_time(1)?;
    page.assert_style("#flash", "animation", "slideUp 0.3s ease")?;

    page.advance_time(299)?;
    page.assert_exists("#flash")?;

    page.advance_time(1)?;
    page.assert_missing("#flash")?;
    page.assert_exists("#keep")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn one_large_clock_jump_runs_both_stages() -> Result<()> {
    let html = r#"
        <div class='alert' id='a'>one</div>
        <div class='alert alert-danger' id='b'>two</div>
        "#;

    let mut page = Page::open(PORTAL_URL, html)?;
    assert_eq!(page.pending_timers().len(), 2);
    page.advance_time(5600)?;
    page.assert_missing(".alert")?;
    assert_eq!(page.now_ms(), 5600);
    Ok(())
}

#[test]
fn alert_removed_by_someone_else_is_left_alone() -> Result<()> {
    let html = "<div class='alert' id='flash'>hi</div>";

    let mut page = Page::open(PORTAL_URL, html)?;
    let flash = node(&page, "#flash")?;
    assert!(page.remove(flash));
    page.advance_time(6000)?;
    assert!(!page.is_connected(flash));
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn page_without_alerts_schedules_nothing() -> Result<()> {
    let page = Page::open(PORTAL_URL, "<main><p>No news</p></main>")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn custom_delays_are_honoured() -> Result<()> {
    let config = BehaviorConfig {
        alert_display_ms: 1000,
        alert_exit_ms: 50,
        ..BehaviorConfig::default()
    };
    let mut page = Page::open_with_config(PORTAL_URL, "<div class='alert' id='x'>x</div>", config)?;
    page.advance_time(1049)?;
    page.assert_exists("#x")?;
    page.advance_time(1)?;
    page.assert_missing("#x")?;
    Ok(())
}
