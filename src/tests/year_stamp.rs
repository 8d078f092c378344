use super::*;

use chrono::Datelike;

const FOOTER: &str = "<footer>&copy; <span id='current-year'>2000</span> Portal</footer>";

#[test]
fn load_writes_the_mocked_year() -> Result<()> {
    let mut page = Page::from_html_with_url(PORTAL_URL, FOOTER)?;
    page.set_current_year(2031);
    behaviors::install_all(&mut page)?;
    assert!(page.fire_dom_content_loaded()?);
    page.assert_text("#current-year", "2031")?;
    Ok(())
}

#[test]
fn load_fires_once() -> Result<()> {
    let mut page = Page::from_html_with_url(PORTAL_URL, FOOTER)?;
    page.set_current_year(2031);
    behaviors::install_all(&mut page)?;
    assert!(page.fire_dom_content_loaded()?);

    page.set_current_year(2032);
    assert!(!page.fire_dom_content_loaded()?);
    page.assert_text("#current-year", "2031")?;
    Ok(())
}

#[test]
fn default_year_comes_from_the_local_clock() -> Result<()> {
    let before = chrono::Local::now().year();
    let page = Page::open(PORTAL_URL, FOOTER)?;
    let after = chrono::Local::now().year();
    let stamped = page.text_content(node(&page, "#current-year")?);
    assert!(stamped == before.to_string() || stamped == after.to_string());
    Ok(())
}

#[test]
fn missing_year_element_is_ignored() -> Result<()> {
    let mut page = Page::from_html("<footer>Portal</footer>")?;
    assert_eq!(behaviors::year_stamp::stamp_current_year(&mut page)?, None);
    Ok(())
}
