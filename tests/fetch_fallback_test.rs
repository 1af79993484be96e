use aximoix_client::core::FallbackProvider;
use aximoix_client::domain::model::{CompanyInfo, Service};
use aximoix_client::{
    ApiError, ClientConfig, FetchState, SiteClient, StaticFallback, UnknownServicePolicy,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

fn site_for(base_url: &str) -> SiteClient {
    let config = ClientConfig::new(base_url)
        .unwrap()
        .with_timeout(Duration::from_millis(500));
    SiteClient::new(config).unwrap()
}

/// Base URL of a port nothing listens on.
fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

fn live_company() -> Value {
    json!({
        "id": "aximoix-company",
        "name": "AximoIX Live",
        "motto": "Innovate. Engage. Grow.",
        "tagline": "Empowering Business, Amplifying Success",
        "description": "Served by the backend",
        "about": {"goal": "g", "vision": "v", "mission": "m"},
        "contact": {
            "email": "hello@aximoix.com",
            "phone": "+1 (555) 123-4567",
            "address": "123 Innovation Drive",
            "social_media": {"linkedin": "https://linkedin.example"}
        }
    })
}

fn live_services() -> Value {
    json!([
        {
            "id": "10",
            "title": "Cloud Audits",
            "description": "Live only",
            "icon": "Cloud",
            "features": ["Assessment"],
            "is_active": true
        },
        {
            "id": "11",
            "title": "Data Platforms",
            "description": "Live only",
            "icon": "Database",
            "features": [],
            "is_active": false
        }
    ])
}

#[tokio::test]
async fn test_company_success_matches_body() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/company");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(live_company());
    });

    let site = site_for(&server.url("/api"));
    let watch = site.company();
    let state = watch.settled().await;

    api_mock.assert();
    let expected: CompanyInfo = serde_json::from_value(live_company()).unwrap();
    assert_eq!(state, FetchState::Loaded(expected.clone()));
    assert_eq!(serde_json::to_value(&expected).unwrap(), live_company());
}

#[tokio::test]
async fn test_service_list_success_matches_body() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services");
        then.status(200).json_body(live_services());
    });

    let watch = site_for(&server.url("/api")).services();

    match watch.settled().await {
        FetchState::Loaded(services) => {
            assert_eq!(serde_json::to_value(&services).unwrap(), live_services());
            assert!(!services[1].is_active);
        }
        other => panic!("expected Loaded, got {:?}", other),
    }
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_unreachable_backend_serves_fallback_for_every_kind() {
    let site = site_for(&unreachable_base());
    let provider = StaticFallback::default();

    let company = site.company().settled().await;
    assert!(matches!(company.error(), Some(ApiError::Transport { .. })));
    assert_eq!(company.fallback(), Some(&provider.company()));

    let services = site.services().settled().await;
    assert!(services.error().is_some());
    assert_eq!(services.fallback(), Some(&provider.services()));

    let detail = site.service("4").settled().await;
    assert!(detail.error().is_some());
    assert_eq!(detail.fallback(), provider.service("4").as_ref());
}

#[tokio::test]
async fn test_service_detail_server_error_uses_matching_fallback() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/services/2");
        then.status(500)
            .json_body(json!({"detail": "Internal server error"}));
    });

    let watch = site_for(&server.url("/api")).service("2");
    let state = watch.settled().await;

    api_mock.assert();
    match &state {
        FetchState::Failed { error, fallback } => {
            assert_eq!(
                *error,
                ApiError::Server {
                    status: 500,
                    detail: Some("Internal server error".to_string())
                }
            );
            let fallback: &Service = fallback.as_ref().unwrap();
            assert_eq!(fallback.id, "2");
            assert_eq!(fallback.title, "AI Solutions");
        }
        other => panic!("expected Failed, got {:?}", other),
    }

    let view = watch.view();
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("Internal server error"));
}

#[tokio::test]
async fn test_unknown_service_policy_not_found_has_no_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/services/77");
        then.status(404).json_body(json!({"detail": "Service not found"}));
    });

    let config = ClientConfig::new(&server.url("/api"))
        .unwrap()
        .with_unknown_service_policy(UnknownServicePolicy::NotFound);
    let state = SiteClient::new(config).unwrap().service("77").settled().await;

    assert_eq!(state.error_message().as_deref(), Some("Service not found"));
    assert!(state.data().is_none());

    let lenient = site_for(&server.url("/api")).service("77").settled().await;
    assert_eq!(lenient.fallback().unwrap().id, "1");
}

#[tokio::test]
async fn test_timeout_becomes_failed_once() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/company");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(live_company());
    });

    let state = site_for(&server.url("/api")).company().settled().await;

    assert_eq!(state.error(), Some(&ApiError::Timeout));
    assert_eq!(
        state.error_message().as_deref(),
        Some("Request timeout. Please check your connection.")
    );
    assert_eq!(state.data().unwrap().name, "AximoIX");
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_refetch_after_failure_is_not_cached() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/api/services");
        then.status(503);
    });

    let watch = site_for(&server.url("/api")).services();
    let first = watch.settled().await;
    assert_eq!(first.error_message().as_deref(), Some("Server error: 503"));
    failing.assert_hits(1);
    failing.delete();

    let healthy = server.mock(|when, then| {
        when.method(GET).path("/api/services");
        then.status(200).json_body(live_services());
    });

    watch.refetch();
    assert!(watch.view().loading);

    match watch.settled().await {
        FetchState::Loaded(services) => assert_eq!(services.len(), 2),
        other => panic!("expected Loaded, got {:?}", other),
    }
    healthy.assert_hits(1);
}

#[tokio::test]
async fn test_concurrent_fetches_keep_independent_slots() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/company");
        then.status(200)
            .delay(Duration::from_millis(200))
            .json_body(live_company());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/services");
        then.status(500);
    });

    let site = site_for(&server.url("/api"));
    let company = site.company();
    let services = site.services();

    let (company_state, services_state) = tokio::join!(company.settled(), services.settled());

    assert_eq!(company_state.data().unwrap().name, "AximoIX Live");
    assert!(company_state.error().is_none());

    assert!(services_state.error().is_some());
    assert_eq!(
        services_state.fallback().unwrap().len(),
        StaticFallback::default().services().len()
    );
}

#[tokio::test]
async fn test_dependency_change_fetches_new_id() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/api/services/1");
        then.status(500);
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/api/services/3");
        then.status(500);
    });

    let watch = site_for(&server.url("/api")).service("1");
    assert_eq!(watch.settled().await.fallback().unwrap().id, "1");

    assert!(!watch.set_endpoint(aximoix_client::ServiceDetailRequest::new("1")));
    assert!(watch.set_endpoint(aximoix_client::ServiceDetailRequest::new("3")));
    assert_eq!(watch.settled().await.fallback().unwrap().id, "3");

    first.assert_hits(1);
    second.assert_hits(1);
}
