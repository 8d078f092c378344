use super::*;

const HEADER: &str = r#"
    <header>
      <button id='navToggle' type='button'><i id='icon' class='fas fa-bars'></i></button>
      <ul class='nav-menu' id='menu'><li><a href='/'>Home</a></li></ul>
    </header>
    "#;

#[test]
fn toggle_opens_and_closes_the_menu() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, HEADER)?;

    page.click("#navToggle")?;
    page.assert_class("#menu", "active", true)?;
    page.assert_class("#icon", "fa-times", true)?;
    page.assert_class("#icon", "fa-bars", false)?;
    page.assert_class("#icon", "fas", true)?;

    page.click("#navToggle")?;
    page.assert_class("#menu", "active", false)?;
    page.assert_class("#icon", "fa-bars", true)?;
    page.assert_class("#icon", "fa-times", false)?;
    Ok(())
}

#[test]
fn clicking_the_icon_bubbles_to_the_toggle() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, HEADER)?;
    page.click("#icon")?;
    page.assert_class("#menu", "active", true)?;
    Ok(())
}

#[test]
fn state_follows_the_class_list() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, HEADER)?;
    let menu = node(&page, "#menu")?;
    page.add_class(menu, "active")?;

    page.click("#navToggle")?;
    page.assert_class("#menu", "active", false)?;
    page.assert_class("#icon", "fa-bars", true)?;
    Ok(())
}

#[test]
fn toggle_without_icon_only_flips_the_menu() -> Result<()> {
    let html = r#"
        <button id='navToggle' type='button'>Menu</button>
        <ul class='nav-menu' id='menu'></ul>
        "#;
    let mut page = Page::open(PORTAL_URL, html)?;
    page.click("#navToggle")?;
    page.assert_class("#menu", "active", true)?;
    Ok(())
}

#[test]
fn missing_menu_leaves_toggle_unbound() -> Result<()> {
    let html = "<button id='navToggle' type='button'><i class='fas fa-bars'></i></button>";
    let mut page = Page::open(PORTAL_URL, html)?;
    let toggle = node(&page, "#navToggle")?;
    assert_eq!(page.listener_count(toggle, "click"), 0);
    page.click("#navToggle")?;
    page.assert_class("i", "fa-bars", true)?;
    Ok(())
}
