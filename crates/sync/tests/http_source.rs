use std::net::SocketAddr;
use std::time::Duration;

use api_rest::AppState;
use reqwest::Url;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use trips_core::{TripCatalog, TripService};
use trips_sync::{HttpTripSource, QuerySync, SyncError, SyncPhase, TripSource};

const CATALOGUE: &str = r#"
- id: "1"
  title: Beach Trip
  description: Lazy days by the water
  tags: [sun, sand]
- id: "2"
  title: Mountain Hike
  tags: [cold]
- id: "3"
  title: Island Hopping
  tags: [sun, boat]
"#;

async fn spawn_api() -> SocketAddr {
    let catalog = TripCatalog::from_yaml_str(CATALOGUE).expect("catalogue");
    let app = api_rest::router(AppState::new(TripService::new(catalog)));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    addr
}

fn source_for(addr: SocketAddr) -> HttpTripSource {
    let url = Url::parse(&format!("http://{addr}")).expect("url");
    HttpTripSource::new(&url).expect("source")
}

#[tokio::test]
async fn fetches_matching_trips_over_http() {
    let source = source_for(spawn_api().await);

    let trips = source
        .fetch_trips("SUN", &CancellationToken::new())
        .await
        .expect("search");
    let ids: Vec<_> = trips.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    let everything = source
        .fetch_trips("", &CancellationToken::new())
        .await
        .expect("search");
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
async fn cancelled_token_short_circuits_request() {
    let source = source_for(spawn_api().await);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = source.fetch_trips("sun", &cancel).await.expect_err("cancelled");
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = source_for(addr)
        .fetch_trips("sun", &CancellationToken::new())
        .await
        .expect_err("no server");
    assert!(matches!(err, SyncError::Transport(_)));
}

#[tokio::test]
async fn query_sync_settles_on_last_edit_against_live_api() {
    let source = source_for(spawn_api().await);
    let sync = QuerySync::new(source, Duration::from_millis(50));
    let mut rx = sync.subscribe();

    sync.set_term("s");
    sync.set_term("su");
    sync.set_term("cold");

    let view = rx
        .wait_for(|v| v.phase == SyncPhase::Resolved)
        .await
        .expect("sync alive")
        .clone();
    assert_eq!(view.term, "cold");
    assert!(!view.is_loading);
    assert_eq!(view.revision, 1);
    let ids: Vec<_> = view.results.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2"]);
}
