use engine::{Language, Phase, QueryOutcome, SearchSession};
use fetcher::{
    bootstrap, build_index, discover, fetch_listing, load_document, BootstrapError, DocumentClient, FailurePolicy,
    FetchConfig, FetchError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article(en: &str, gr: &str) -> String {
    format!(
        r#"<html><body><div class="modal-body">
            <div data-lang-section="en">{en}</div>
            <div data-lang-section="gr">{gr}</div>
        </div></body></html>"#
    )
}

fn client_for(server: &MockServer, policy: FailurePolicy) -> DocumentClient {
    let config = FetchConfig::default()
        .with_listing_url(format!("{}/contents", server.uri()))
        .with_timeout(Duration::from_secs(2))
        .with_policy(policy);
    DocumentClient::new(config).unwrap()
}

/// Listing with three articles; `broken` (if any) answers 404.
async fn mount_corpus(server: &MockServer, broken: Option<&str>) {
    let files = [
        ("1_Firewall_Basics_(Βασικά_Τείχους).html", "Block inbound ports.", "Κλείστε τις θύρες."),
        ("2_Passwords.html", "Use long unique passwords.", "Μακριοί κωδικοί."),
        ("3_Tor_Browser.html", "Onion routing for privacy.", "Δρομολόγηση onion."),
    ];
    let mut listing = vec![json!({"type": "dir", "name": "assets", "download_url": null})];
    for (name, en, gr) in files {
        let raw_path = format!("/raw/{}", name.split('_').next().unwrap());
        listing.push(json!({
            "type": "file",
            "name": name,
            "download_url": format!("{}{}", server.uri(), raw_path),
        }));
        let response = if Some(name) == broken {
            ResponseTemplate::new(404)
        } else {
            ResponseTemplate::new(200).set_body_string(article(en, gr))
        };
        Mock::given(method("GET")).and(path(raw_path)).respond_with(response).mount(server).await;
    }
    Mock::given(method("GET"))
        .and(path("/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(server)
        .await;
}

#[tokio::test]
async fn bootstrap_builds_a_searchable_index() {
    let server = MockServer::start().await;
    mount_corpus(&server, None).await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Partial);

    let summary = bootstrap(&session, &client).await.unwrap().expect("first bootstrap runs");
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.items, 6);
    assert!(summary.partial.is_none());
    assert!(session.is_ready());
    assert_eq!(session.phase(), Phase::Ready);

    let results = session.query("firewall").into_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.title(), "Firewall Basics");
    assert!(results[0].score > 0.0);

    session.set_language(Language::Gr);
    let results = session.query("θύρες").into_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.title(), "Βασικά Τείχους");
}

#[tokio::test]
async fn second_bootstrap_is_dropped() {
    let server = MockServer::start().await;
    mount_corpus(&server, None).await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Partial);

    assert!(bootstrap(&session, &client).await.unwrap().is_some());
    assert!(bootstrap(&session, &client).await.unwrap().is_none());
    assert!(discover(&session, &client).await.unwrap().is_none());
}

#[tokio::test]
async fn listing_failure_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contents"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Partial);

    let err = bootstrap(&session, &client).await.unwrap_err();
    match err {
        BootstrapError::Discovery(e) => assert!(matches!(e.0, FetchError::Status { status: 403, .. })),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.phase(), Phase::DiscoveryFailed);
    assert!(session.descriptors().is_empty());
    assert!(!session.is_ready());
}

#[tokio::test]
async fn malformed_listing_is_a_discovery_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"message\": \"not a list\"}"))
        .mount(&server)
        .await;
    let client = client_for(&server, FailurePolicy::Partial);
    let err = fetch_listing(&client).await.unwrap_err();
    assert!(matches!(err.0, FetchError::Decode { .. }));
}

#[tokio::test]
async fn strict_policy_single_failure_keeps_index_unready() {
    let server = MockServer::start().await;
    mount_corpus(&server, Some("2_Passwords.html")).await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Strict);

    let err = bootstrap(&session, &client).await.unwrap_err();
    match err {
        BootstrapError::Build(failure) => {
            assert_eq!(failure.total, 3);
            assert_eq!(failure.failures.len(), 1);
            assert_eq!(failure.failures[0].name, "2_Passwords.html");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!session.is_ready());
    assert_eq!(session.phase(), Phase::BuildFailed);
    assert!(matches!(session.query("firewall"), QueryOutcome::NotReady));
    assert!(session.query("passwords").into_results().is_empty());
    // Navigation still works from the discovered listing.
    assert_eq!(session.navigation(Language::En).len(), 3);
}

#[tokio::test]
async fn partial_policy_indexes_the_rest() {
    let server = MockServer::start().await;
    mount_corpus(&server, Some("2_Passwords.html")).await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Partial);

    let summary = bootstrap(&session, &client).await.unwrap().unwrap();
    let partial = summary.partial.expect("one document failed");
    assert_eq!(partial.indexed, 2);
    assert_eq!(partial.failures.len(), 1);
    assert_eq!(summary.items, 4);

    assert!(session.is_ready());
    let failures = session.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].reason.contains("404"));
    assert_eq!(session.query("firewall").into_results().len(), 1);
    assert!(session.query("unique").into_results().is_empty());
}

#[tokio::test]
async fn partial_policy_with_nothing_fetched_fails() {
    let server = MockServer::start().await;
    let descriptors = vec![engine::DocumentDescriptor::new(
        "Intro.html",
        format!("{}/raw/missing", server.uri()),
        ".html",
    )];
    let client = client_for(&server, FailurePolicy::Partial);
    let err = build_index(&client, &descriptors).await.unwrap_err();
    assert_eq!(err.total, 1);
    assert_eq!(err.failures.len(), 1);
}

#[tokio::test]
async fn empty_listing_builds_an_empty_ready_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let session = SearchSession::default();
    let client = client_for(&server, FailurePolicy::Strict);

    let summary = bootstrap(&session, &client).await.unwrap().unwrap();
    assert_eq!(summary.items, 0);
    assert!(session.is_ready());
    assert!(session.query("anything").into_results().is_empty());
}

#[tokio::test]
async fn slow_document_times_out_as_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article("x", "y")).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let config = FetchConfig::default().with_timeout(Duration::from_millis(200));
    let client = DocumentClient::new(config).unwrap();
    let descriptors = vec![engine::DocumentDescriptor::new("Slow.html", format!("{}/raw/slow", server.uri()), ".html")];

    let err = build_index(&client, &descriptors).await.unwrap_err();
    assert!(matches!(err.failures[0].error, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;
    let client = DocumentClient::new(FetchConfig::default().with_max_body_bytes(16)).unwrap();
    let err = load_document(&client, &format!("{}/raw/big", server.uri())).await.unwrap_err();
    assert!(matches!(err.0, FetchError::TooLarge { limit: 16, .. }));
}

#[tokio::test]
async fn load_document_renders_active_language_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article("<p>Hello</p>", "<p>Γεια</p>")))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server, FailurePolicy::Partial);
    let url = format!("{}/raw/doc", server.uri());

    let body = load_document(&client, &url).await.unwrap();
    let gr = body.render(Language::Gr);
    assert!(gr.contains("Γεια"));
    assert!(!gr.contains("Hello"));

    let again = load_document(&client, &url).await.unwrap();
    assert!(again.render(Language::En).contains("Hello"));
}

#[tokio::test]
async fn load_failure_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server, FailurePolicy::Partial);
    let err = load_document(&client, &format!("{}/raw/gone", server.uri())).await.unwrap_err();
    assert!(matches!(err.0, FetchError::Status { status: 500, .. }));
}
