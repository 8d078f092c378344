use super::*;

const TABLE_PAGE: &str = r#"
    <html><body>
      <table class='data-table' id='grades'>
        <thead><tr><th>Name</th><th>Score</th></tr></thead>
        <tbody><tr><td>Amy</td><td>90</td></tr></tbody>
      </table>
    </body></html>
    "#;

#[test]
fn export_downloads_rows_and_cleans_up() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, TABLE_PAGE)?;
    assert!(behaviors::export_table_to_csv(&mut page, "grades.csv")?);

    let downloads = page.take_downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].filename.as_deref(), Some("grades.csv"));
    assert_eq!(downloads[0].mime_type.as_deref(), Some("text/csv"));
    assert_eq!(downloads[0].text(), "Name,Score\nAmy,90");

    page.assert_missing("a[download]")?;
    assert_eq!(page.live_object_url_count(), 0);
    assert!(page.take_location_navigations().is_empty());
    assert_eq!(page.location_href(), PORTAL_URL);
    Ok(())
}

#[test]
fn table_without_rows_exports_empty_file() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, "<body><table class='data-table'></table></body>")?;
    assert!(behaviors::export_table_to_csv(&mut page, "empty.csv")?);
    let downloads = page.take_downloads();
    assert_eq!(downloads.len(), 1);
    assert!(downloads[0].bytes.is_empty());
    Ok(())
}

#[test]
fn missing_table_is_reported_not_raised() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, "<body><table id='plain'></table></body>")?;
    assert!(!behaviors::export_table_to_csv(&mut page, "x.csv")?);
    assert!(page.take_downloads().is_empty());
    Ok(())
}

#[test]
fn commas_are_preserved_by_default_and_quoted_on_request() -> Result<()> {
    let html = r#"
        <body><table class='data-table'>
          <tr><td>Lee, Amy</td><td>say "hi"</td></tr>
        </table></body>
        "#;

    let mut page = Page::open(PORTAL_URL, html)?;
    behaviors::export_table_to_csv(&mut page, "a.csv")?;
    assert_eq!(page.take_downloads()[0].text(), "Lee, Amy,say \"hi\"");

    let config = BehaviorConfig {
        csv_escaping: CsvEscaping::Rfc4180,
        ..BehaviorConfig::default()
    };
    let mut page = Page::open_with_config(PORTAL_URL, html, config)?;
    behaviors::export_table_to_csv(&mut page, "b.csv")?;
    assert_eq!(
        page.take_downloads()[0].text(),
        "\"Lee, Amy\",\"say \"\"hi\"\"\""
    );
    Ok(())
}

#[test]
fn cells_use_rendered_text() -> Result<()> {
    let html = r#"
        <body><table class='data-table' id='t'>
          <tr><td>Amy <span hidden>(draft)</span> Lee</td><th>  88  </th></tr>
          <tr><td></td><td>0</td></tr>
        </table></body>
        "#;
    let page = Page::from_html(html)?;
    let table = node(&page, "#t")?;
    assert_eq!(
        behaviors::table_to_csv(&page, table, CsvEscaping::Preserve)?,
        "Amy Lee,88\n,0"
    );
    Ok(())
}

#[test]
fn export_can_run_from_a_button_handler() -> Result<()> {
    let html = format!("{TABLE_PAGE}<button id='export' type='button'>Export</button>");
    let mut page = Page::open(PORTAL_URL, &html)?;
    let button = node(&page, "#export")?;
    page.add_event_listener(button, "click", |page, _| {
        behaviors::export_table_to_csv(page, "from-button.csv")?;
        Ok(())
    });
    page.click("#export")?;

    let downloads = page.take_downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].filename.as_deref(), Some("from-button.csv"));
    Ok(())
}

#[test]
fn page_without_body_still_exports() -> Result<()> {
    let mut page = Page::open(PORTAL_URL, "<table class='data-table'><tr><td>1</td></tr></table>")?;
    assert!(behaviors::export_table_to_csv(&mut page, "n.csv")?);
    assert_eq!(page.take_downloads()[0].text(), "1");
    page.assert_missing("a")?;
    Ok(())
}
