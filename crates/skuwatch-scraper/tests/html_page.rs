//! Integration tests for the static-HTML page provider.
//!
//! A `wiremock` server stands in for the retailer so no real network
//! traffic is made.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skuwatch_core::StoreProfile;
use skuwatch_scraper::{
    scrape_store, EngineConfig, ErrorKind, HtmlPage, Page, PageError, WaitPolicy,
};

const UA: &str = "Mozilla/5.0 (X11; Linux x86_64) skuwatch-test";
const LANG: &str = "en-CA,en;q=0.9";

const RESULTS: &str = r#"<html><body>
  <div class="item-cell">
    <a class="item-title">ZOTAC GAMING GeForce RTX 5090 SOLID</a>
    <li class="price-current">$2,499.99</li>
    <div class="item-button-area"><button>Add to cart</button></div>
  </div>
</body></html>"#;

fn test_page() -> HtmlPage {
    HtmlPage::new(5, UA, LANG, 0, 0).expect("failed to build test HtmlPage")
}

#[tokio::test]
async fn navigate_sends_identity_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p/pl"))
        .and(header("user-agent", UA))
        .and(header("accept-language", LANG))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = test_page();
    page.navigate(&format!("{}/p/pl?d=rtx", server.uri()), WaitPolicy::ContentLoaded)
        .await
        .unwrap();

    assert_eq!(page.content().await.unwrap(), RESULTS);
    assert_eq!(page.query_count(".item-cell").await.unwrap(), 1);
}

#[tokio::test]
async fn content_before_navigation_is_no_document() {
    let page = test_page();
    assert!(matches!(page.content().await, Err(PageError::NoDocument)));
}

#[tokio::test]
async fn not_found_is_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = test_page();
    let err = page
        .navigate(&format!("{}/missing", server.uri()), WaitPolicy::ContentLoaded)
        .await
        .unwrap_err();

    assert!(matches!(err, PageError::HttpStatus { status: 404, .. }), "{err:?}");
    assert!(matches!(page.content().await, Err(PageError::NoDocument)));
}

#[tokio::test]
async fn retries_server_error_then_succeeds() {
    let server = MockServer::start().await;

    // First request fails with 503 (served once).
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS))
        .mount(&server)
        .await;

    let mut page = HtmlPage::new(5, UA, LANG, 2, 0).unwrap();
    page.navigate(&format!("{}/search", server.uri()), WaitPolicy::ContentLoaded)
        .await
        .unwrap();

    assert_eq!(page.content().await.unwrap(), RESULTS);
}

#[tokio::test]
async fn click_and_screenshot_are_unsupported() {
    let mut page = HtmlPage::from_html(RESULTS);
    assert!(matches!(
        page.click("button", 0).await,
        Err(PageError::Unsupported { operation: "click" })
    ));
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        page.screenshot(&dir.path().join("shot.png")).await,
        Err(PageError::Unsupported { .. })
    ));
}

#[tokio::test]
async fn invalid_accept_language_is_rejected() {
    let result = HtmlPage::new(5, UA, "en\nUS", 0, 0);
    assert!(matches!(result, Err(PageError::InvalidIdentity { .. })));
}

#[tokio::test]
async fn scrapes_store_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p/pl"))
        .and(query_param("d", "RTX 5090"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS))
        .mount(&server)
        .await;

    let store = StoreProfile {
        id: "newegg".to_owned(),
        name: "Newegg".to_owned(),
        search_url: format!("{}/p/pl?d={{query}}", server.uri()),
        region: Some("US".to_owned()),
        currency: None,
    };

    let mut page = test_page();
    let records = scrape_store(&mut page, &store, "RTX 5090", &EngineConfig::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price.to_string(), "$2499.99");
}

#[tokio::test]
async fn http_failure_is_a_navigation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = StoreProfile {
        id: "amazon".to_owned(),
        name: "Amazon".to_owned(),
        search_url: format!("{}/s?k={{query}}", server.uri()),
        region: None,
        currency: None,
    };

    let mut page = test_page();
    let err = scrape_store(&mut page, &store, "RTX 5090", &EngineConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Navigation);
    assert!(err.message.contains("403"), "{}", err.message);
}
