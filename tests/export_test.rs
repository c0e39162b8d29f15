//! End-to-end tests: full page in, exported files out.

#![allow(clippy::unwrap_used)]

use offline_academy::testing::{ScriptedPanel, ScriptedPanels};
use offline_academy::{
    dom, extract_section, save_section, AssetFetcher, ExtractError, MemorySink, NoTabSupport,
    SectionExtractor,
};
use url::Url;

const SECTION_PAGE: &str = r#"<html><body>
    <nav>
        <ul class="breadcrumb">
            <li class="home">Home</li>
            <li>Networking Fundamentals</li>
            <li>IP Addressing</li>
        </ul>
    </nav>
    <div class="content-chunks">
        <div id="heading"><h1>IP Addressing</h1></div>
        <div id="chunk-1">
            <div class="container">
                <span class="current-li">3.2</span>
                <div class="text-asset">
                    <h2>Subnets</h2>
                    <p>A subnet divides a network.</p>
                </div>
                <code>ip addr show</code>
            </div>
        </div>
        <div id="chunk-2">
            <div class="container">
                <div class="text-asset"><p>Closing notes.</p></div>
            </div>
        </div>
    </div>
</body></html>"#;

fn extractor() -> SectionExtractor {
    let base = Url::parse("https://academy.example/course/3/2").unwrap();
    SectionExtractor::new(AssetFetcher::new(base))
}

#[tokio::test]
async fn test_full_page_export_layout() {
    let result = extract_section(SECTION_PAGE, "https://academy.example/course/3/2")
        .await
        .unwrap();

    assert_eq!(result.metadata.module_index, 3);
    assert_eq!(result.metadata.section_index, 2);
    assert_eq!(result.metadata.module_title, "Networking Fundamentals");
    assert_eq!(result.metadata.section_title, "IP Addressing");

    let sink = MemorySink::new();
    let report = save_section(result, &sink).await.unwrap();
    assert_eq!(report.assets_written, 0);
    assert_eq!(report.assets_failed, 0);

    let files = sink.files();
    let doc = files
        .get("3_Networking_Fundamentals/3_2_IP_Addressing.html")
        .map(|d| String::from_utf8_lossy(d).into_owned())
        .unwrap();

    assert!(doc.starts_with("<html><body>"));
    assert!(doc.ends_with("</body></html>"));
    assert!(doc.contains("<h1>IP Addressing</h1>"));
    assert!(doc.contains("3.2 Subnets"));
    assert!(doc.contains("<p>A subnet divides a network.</p>"));
    assert!(doc.contains("white-space: pre-wrap"));
    assert!(doc.contains("<p>Closing notes.</p>"));
    // Chunk without an index label keeps its content untouched
    assert!(!doc.contains("3.2 Closing"));
}

#[tokio::test]
async fn test_tab_widget_page_needs_panel_driver() {
    let page = SECTION_PAGE.replace(
        "<code>ip addr show</code>",
        r#"<div id="w1" role="tablist"><span class="button-label">IPv4</span></div>"#,
    );

    let result = extract_section(&page, "https://academy.example/course/3/2").await;
    assert!(matches!(result, Err(ExtractError::WidgetShape(_))));

    let doc = dom::parse(&page);
    let mut panels = ScriptedPanels::new().with_panel(
        "w1",
        ScriptedPanel::new()
            .with_tab("IPv4", r#"<div class="text-asset"><p>32-bit addresses</p></div>"#)
            .with_tab("IPv6", r#"<div class="text-asset"><p>128-bit addresses</p></div>"#),
    );
    let result = extractor().extract(&doc, &mut panels).await.unwrap();

    let html = &result.document_html;
    let h4 = html.find("<h3>IPv4</h3>");
    let p4 = html.find("<p>32-bit addresses</p>");
    let h6 = html.find("<h3>IPv6</h3>");
    let p6 = html.find("<p>128-bit addresses</p>");
    assert!(h4 < p4 && p4 < h6 && h6 < p6, "tab order broken: {html}");
}

#[tokio::test]
async fn test_malformed_page_fails_before_output() {
    let no_breadcrumb = "<html><body><div class=\"content-chunks\"></div></body></html>";
    let result = extract_section(no_breadcrumb, "https://academy.example/x").await;
    assert!(matches!(result, Err(ExtractError::MissingMetadata(_))));

    let result = extract_section(SECTION_PAGE, "not a uri").await;
    assert!(matches!(result, Err(ExtractError::BaseUri(_))));
}
