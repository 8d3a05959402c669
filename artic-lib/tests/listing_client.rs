//! Tests for the listing client against a local HTTP server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use artic_lib::ArticClient;
use artic_lib::error::ApiError;
use artic_lib::error::Error;
use artic_lib::model::ArtworkId;
use artic_lib::selection::BulkRequest;
use artic_lib::selection::SelectionSet;
use artic_lib::selection::accumulate;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// Canned reply for one request.
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }
}

/// A local server answering every request through `handler`, which gets the
/// requested page index. Returns the base URL and the log of request URIs.
async fn serve<F>(handler: F) -> (String, Arc<Mutex<Vec<String>>>)
where
    F: Fn(Option<u32>) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = handler.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let handler = handler.clone();
                    let log = log.clone();
                    async move {
                        log.lock().unwrap().push(req.uri().to_string());
                        let page = req.uri().query().and_then(|q| {
                            url::form_urlencoded::parse(q.as_bytes())
                                .find(|(k, _)| k == "page")
                                .and_then(|(_, v)| v.parse().ok())
                        });
                        let reply = handler(page);
                        if !reply.delay.is_zero() {
                            tokio::time::sleep(reply.delay).await;
                        }
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(reply.status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(reply.body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (format!("http://{}/api/v1", addr), requests)
}

/// Listing body for page `page` of a catalog of `total` records, two per page.
fn listing_body(page: u32, total: u64) -> String {
    let total_pages = total.div_ceil(2) as u32;
    let first = (page as u64 - 1) * 2 + 1;
    let data: Vec<serde_json::Value> = (first..=(first + 1).min(total))
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Artwork {id}"),
                "place_of_origin": "Chicago",
                "artist_display": null,
                "date_start": 1900,
                "date_end": 1901
            })
        })
        .collect();
    serde_json::json!({
        "pagination": {
            "total": total,
            "limit": 2,
            "offset": first - 1,
            "total_pages": total_pages,
            "current_page": page,
            "next_url": null
        },
        "data": data
    })
    .to_string()
}

fn client(base_url: &str) -> ArticClient {
    ArticClient::builder()
        .base_url(base_url)
        .page_size(2)
        .fields(["id", "title"])
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_page_parses_records_and_pagination() {
    let (base_url, requests) = serve(|page| Reply::json(listing_body(page.unwrap_or(1), 5))).await;

    let page = client(&base_url).fetch_page(2).await.unwrap();

    assert_eq!(page.page(), 2);
    assert_eq!(page.ids().collect::<Vec<_>>(), vec![ArtworkId(3), ArtworkId(4)]);
    assert_eq!(page.total_pages(), Some(3));
    assert_eq!(page.total_count(), Some(5));
    assert_eq!(page.records()[0].title.as_deref(), Some("Artwork 3"));
    assert_eq!(page.records()[0].artist_display, None);
    assert_eq!(
        requests.lock().unwrap().clone(),
        vec!["/api/v1/artworks?page=2&limit=2&fields=id%2Ctitle".to_string()]
    );
}

#[tokio::test]
async fn test_non_success_status_is_status_error() {
    let (base_url, _) = serve(|_| Reply::status(404)).await;

    let err = client(&base_url).fetch_page(1).await.unwrap_err();

    assert!(err.is_status());
    assert_eq!(err.status_code(), Some(404));
    assert!(matches!(
        err,
        Error::Api(ApiError::Http { ref message, .. }) if message == "Not Found"
    ));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (base_url, _) = serve(|_| Reply::json(r#"{"pagination": {}}"#)).await;

    let err = client(&base_url).fetch_page(1).await.unwrap_err();

    match err {
        Error::Api(ApiError::Parse { body, .. }) => {
            assert_eq!(body.as_deref(), Some(r#"{"pagination": {}}"#));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api/v1", addr))
        .fetch_page(1)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_status());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let (base_url, _) = serve(|page| Reply {
        delay: Duration::from_secs(3),
        ..Reply::json(listing_body(page.unwrap_or(1), 2))
    })
    .await;

    let err = client(&base_url).fetch_page(1).await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Timeout(_))));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_bulk_select_over_http_is_sequential() {
    let (base_url, requests) = serve(|page| Reply::json(listing_body(page.unwrap_or(1), 6))).await;
    let client = client(&base_url);

    let request = BulkRequest::new(1, 3, SelectionSet::new());
    let outcome = accumulate(&client, &request).await.unwrap();

    let mut ids: Vec<u64> = outcome.selection.iter().map(|id| id.get()).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);

    let pages: Vec<String> = requests
        .lock()
        .unwrap()
        .iter()
        .map(|uri| uri.split('&').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        pages,
        vec!["/api/v1/artworks?page=1", "/api/v1/artworks?page=2"]
    );
}

#[tokio::test]
async fn test_bulk_select_over_http_aborts_on_error() {
    let (base_url, _) = serve(|page| match page {
        Some(2) => Reply::status(503),
        Some(p) => Reply::json(listing_body(p, 6)),
        None => Reply::status(400),
    })
    .await;
    let client = client(&base_url);

    let existing: SelectionSet = [ArtworkId(6)].into_iter().collect();
    let request = BulkRequest::new(1, 4, existing.clone());
    let err = accumulate(&client, &request).await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(request.existing, existing);
}
