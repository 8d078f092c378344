use super::*;

const MARKS_FORM: &str = r#"
    <form id='entry'>
      <div class='form-group' id='group'>
        <label for='marks'>Marks</label>
        <input id='marks' name='marks' type='number'>
      </div>
    </form>
    "#;

fn preview(page: &Page) -> Result<NodeId> {
    node(page, ".grade-preview")
}

#[test]
fn preview_is_appended_to_the_input_parent() -> Result<()> {
    let page = Page::open(PORTAL_URL, MARKS_FORM)?;
    let preview = preview(&page)?;
    assert_eq!(page.parent(preview), Some(node(&page, "#group")?));
    page.assert_style(".grade-preview", "margin-top", "10px")?;
    assert_eq!(page.attribute(preview, "style").as_deref(), Some("margin-top: 10px;"));
    assert_eq!(page.inner_html(preview)?, "");
    Ok(())
}

#[test]
fn typing_marks_renders_the_badge() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, MARKS_FORM)?;
    page.type_text("#marks", "95")?;
    let preview = preview(&page)?;
    assert_eq!(
        page.inner_html(preview)?,
        "<strong>Grade Preview:</strong> <span class=\"grade-badge grade-Aplus\">A+</span>"
    );

    page.type_text("#marks", "72.5")?;
    page.assert_text(".grade-badge", "B")?;
    page.assert_class(".grade-badge", "grade-B", true)?;

    page.type_text("#marks", "49.9")?;
    page.assert_text(".grade-badge", "F")?;
    Ok(())
}

#[test]
fn unparseable_or_negative_marks_clear_the_preview() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, MARKS_FORM)?;
    let preview = preview(&page)?;

    page.type_text("#marks", "88")?;
    assert!(!page.inner_html(preview)?.is_empty());

    page.type_text("#marks", "abc")?;
    assert_eq!(page.inner_html(preview)?, "");

    page.type_text("#marks", "60")?;
    page.type_text("#marks", "-5")?;
    assert_eq!(page.inner_html(preview)?, "");

    page.type_text("#marks", "")?;
    assert_eq!(page.inner_html(preview)?, "");
    Ok(())
}

#[test]
fn trailing_garbage_is_ignored() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, MARKS_FORM)?;
    page.type_text("#marks", " 81 marks")?;
    page.assert_text(".grade-badge", "A")?;
    Ok(())
}

#[test]
fn render_preview_returns_the_grade() -> Result<()> {
    let mut page = Page::from_html(MARKS_FORM)?;
    let bound = behaviors::grade_preview::bind_marks_input(&mut page)?;
    let Some((input, preview)) = bound else {
        return Err(Error::Runtime("marks input was not bound".into()));
    };
    page.set_value(input, "60")?;
    assert_eq!(
        behaviors::grade_preview::render_preview(&mut page, input, preview)?,
        Some(behaviors::Grade::C)
    );
    Ok(())
}

#[test]
fn page_without_marks_input_gets_no_preview() -> Result<()> {
    let page = Page::open(PORTAL_URL, "<form><input name='score'></form>")?;
    page.assert_missing(".grade-preview")?;
    Ok(())
}
