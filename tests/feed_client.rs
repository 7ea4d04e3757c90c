use std::time::Duration;

use mockito::Matcher;

use shopfront::domain::types::ProductId;
use shopfront::feed::{Cancellation, FeedError, FeedQuery, HttpFeedClient, ProductSource};

mod common;

use common::{error_envelope, item, list_data, success_envelope};

#[tokio::test]
async fn lists_products_with_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .match_header("accept", "application/json")
        .match_header("cache-control", "no-store")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "camera".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "200".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_envelope(list_data(vec![
            item(1, "Camera Stand", "Photography"),
            item(2, "Tripod", "Photography"),
        ])))
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let page = client
        .list_products(
            FeedQuery::default().search("camera").page(2).limit(200),
            &Cancellation::new(),
        )
        .await
        .unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.items.len(), 2);
    // Records arrive normalized: prices coerced, both image spellings read.
    let first = &page.items[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.buy_price, Some(1499.0));
    assert_eq!(first.original_price, Some(1999.0));
    assert_eq!(
        first.images,
        vec![
            "https://cdn.example.com/1-main.jpg".to_string(),
            "https://cdn.example.com/1-alt.jpg".to_string(),
        ]
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn error_envelope_surfaces_as_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(error_envelope(503, "feed offline"))
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let err = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FeedError::Upstream {
            http_status: 503,
            message: "feed offline".to_string(),
        }
    );
}

#[tokio::test]
async fn non_2xx_is_a_transport_error_with_body_excerpt() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("database exploded")
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let err = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap_err();

    match err {
        FeedError::Transport { status, detail } => {
            assert_eq!(status, Some(500));
            assert!(detail.contains("HTTP 500"));
            assert!(detail.contains("database exploded"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_content_type_is_a_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>maintenance page</html>")
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let err = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap_err();

    match err {
        FeedError::Transport { status, detail } => {
            assert_eq!(status, Some(200));
            assert!(detail.contains("expected JSON"));
            assert!(detail.contains("maintenance page"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let err = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Transport { status: Some(200), .. }));
}

#[tokio::test]
async fn malformed_listing_degrades_to_an_empty_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_envelope(serde_json::json!({"items": "not-a-list"})))
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let page = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap();

    assert_eq!(page.count, 0);
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn fetches_a_product_by_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .match_query(Matcher::UrlEncoded("id".into(), "7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_envelope(item(7, "Camera Stand", "Photography")))
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let product = client
        .get_product_by_id(&ProductId::new("7"), &Cancellation::new())
        .await
        .unwrap()
        .expect("product should exist");

    assert_eq!(product.id, "7");
    assert_eq!(product.name.as_deref(), Some("Camera Stand"));
    mock.assert_async().await;
}

#[tokio::test]
async fn absent_product_is_ok_none_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_envelope(serde_json::Value::Null))
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let product = client
        .get_product_by_id(&ProductId::new("999"), &Cancellation::new())
        .await
        .unwrap();

    assert!(product.is_none());
}

#[tokio::test]
async fn slow_feed_times_out_distinctly() {
    // A bound socket that never answers: the connection lands in the backlog
    // and the request sits until the client timeout fires.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = HttpFeedClient::with_timeout(
        &format!("http://{addr}/products"),
        Duration::from_millis(250),
    )
    .unwrap();
    let err = client
        .list_products(FeedQuery::default(), &Cancellation::new())
        .await
        .unwrap_err();

    assert_eq!(err, FeedError::Timeout(Duration::from_millis(250)));
}

#[tokio::test]
async fn pre_cancelled_token_short_circuits() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = HttpFeedClient::new(&format!("{}/products", server.url())).unwrap();
    let cancel = Cancellation::new();
    cancel.cancel();

    let err = client
        .list_products(FeedQuery::default(), &cancel)
        .await
        .unwrap_err();

    assert_eq!(err, FeedError::Cancelled);
    mock.assert_async().await;
}

#[tokio::test]
async fn in_flight_cancellation_wins_over_a_stalled_request() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = HttpFeedClient::with_timeout(
        &format!("http://{addr}/products"),
        Duration::from_secs(15),
    )
    .unwrap();
    let cancel = Cancellation::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client
        .list_products(FeedQuery::default(), &cancel)
        .await
        .unwrap_err();

    assert_eq!(err, FeedError::Cancelled);
}
