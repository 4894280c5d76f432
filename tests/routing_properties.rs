//! Property tests for the routing rules.
//!
//! Each property builds a handler over a fixed directory snapshot and
//! drives it from a single-threaded runtime.

use std::sync::Arc;

use proptest::prelude::*;
use tokio::runtime::Runtime;

use lifelegacy_gateway::adapters::auth::MockSessionAccessor;
use lifelegacy_gateway::adapters::InMemoryTenantDirectory;
use lifelegacy_gateway::application::{ResolveRouteHandler, ResolveRouteQuery, RouteResolution};
use lifelegacy_gateway::domain::foundation::UserId;
use lifelegacy_gateway::domain::tenancy::{
    Organization, Professional, RedirectReason, RequestTarget, RouteDecision, RouterConfig,
    Subdomain,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "token";

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn prod_config() -> RouterConfig {
    RouterConfig::new(false, "lifelegacy.me", "https://lifelegacy.me").unwrap()
}

fn dev_config() -> RouterConfig {
    RouterConfig::new(true, "localhost:3000", "http://localhost:3000").unwrap()
}

fn handler(signed_in_as: Option<&str>) -> ResolveRouteHandler {
    handler_with(prod_config(), signed_in_as)
}

fn handler_with(config: RouterConfig, signed_in_as: Option<&str>) -> ResolveRouteHandler {
    let acme = Organization::new("Acme Law", Subdomain::new("acme").unwrap());
    let dormant =
        Organization::new("Dormant LLP", Subdomain::new("dormant").unwrap()).deactivated();
    let directory = InMemoryTenantDirectory::new()
        .with_professional(Professional::new(UserId::new("pro-1").unwrap(), acme.id))
        .with_organization(acme)
        .with_organization(dormant);

    let sessions = match signed_in_as {
        Some(user) => {
            MockSessionAccessor::new().with_test_principal(TOKEN, UserId::new(user).unwrap())
        }
        None => MockSessionAccessor::new(),
    };

    ResolveRouteHandler::new(Arc::new(config), Arc::new(directory), Arc::new(sessions))
}

fn resolve(rt: &Runtime, handler: &ResolveRouteHandler, host: &str, path: &str) -> RouteResolution {
    resolve_with_query(rt, handler, host, path, None)
}

fn resolve_with_query(
    rt: &Runtime,
    handler: &ResolveRouteHandler,
    host: &str,
    path: &str,
    query: Option<String>,
) -> RouteResolution {
    let target = RequestTarget::new(host, path, query);
    rt.block_on(handler.handle(ResolveRouteQuery::new(target, Some(TOKEN.to_string()))))
}

fn label() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?"
}

fn page_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9-]{1,12}", 0..4)
        .prop_filter("excluded prefix", |segments| {
            !matches!(
                segments.first().map(String::as_str),
                Some("api" | "assets" | "static")
            )
        })
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

fn host() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lifelegacy.me".to_string()),
        Just("www.lifelegacy.me".to_string()),
        label().prop_map(|l| format!("{}.lifelegacy.me", l)),
        Just("preview.vercel.app".to_string()),
        Just("localhost:3000".to_string()),
        label().prop_map(|l| format!("{}.localhost:3000", l)),
    ]
}

fn query() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        label().prop_map(|l| format!("subdomain={}", l)),
        Just("subdomain=acme".to_string()),
        Just("subdomain=-bad-".to_string()),
        "[a-z]{1,8}=[a-z0-9]{0,8}",
    ])
}

fn config() -> impl Strategy<Value = RouterConfig> {
    prop_oneof![Just(prod_config()), Just(dev_config())]
}

fn principal() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), Just(Some("pro-1")), Just(Some("visitor-1"))]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn excluded_paths_always_forward(
        config in config(),
        host in host(),
        prefix in prop_oneof![Just("/_next"), Just("/assets"), Just("/static"), Just("/api")],
        rest in page_path(),
        query in query(),
        who in principal(),
    ) {
        let rt = runtime();
        let handler = handler_with(config, who);
        let path = format!("{}{}", prefix, rest);

        let resolution = resolve_with_query(&rt, &handler, &host, &path, query);
        prop_assert_eq!(resolution.decision, RouteDecision::forward());
    }

    #[test]
    fn file_paths_always_forward(
        config in config(),
        host in host(),
        dir in page_path(),
        file in "[a-z0-9-]{1,12}\\.(png|js|css|ico|txt)",
        query in query(),
        who in principal(),
    ) {
        let rt = runtime();
        let handler = handler_with(config, who);
        let path = format!("{}/{}", dir.trim_end_matches('/'), file);

        let resolution = resolve_with_query(&rt, &handler, &host, &path, query);
        prop_assert_eq!(resolution.decision, RouteDecision::forward());
    }

    #[test]
    fn unknown_tenants_go_to_main_domain(
        label in label().prop_filter("known tenant", |l| l != "acme" && l != "dormant" && l != "www"),
        path in page_path(),
        who in principal(),
    ) {
        let rt = runtime();
        let handler = handler(who);

        let resolution = resolve(&rt, &handler, &format!("{}.lifelegacy.me", label), &path);
        prop_assert_eq!(resolution.decision.redirect_location(), Some("https://lifelegacy.me/"));
        prop_assert_eq!(resolution.decision.redirect_reason(), Some(RedirectReason::MainDomain));
    }

    #[test]
    fn inactive_tenant_goes_to_main_domain(path in page_path(), who in principal()) {
        let rt = runtime();
        let handler = handler(who);

        let resolution = resolve(&rt, &handler, "dormant.lifelegacy.me", &path);
        prop_assert_eq!(resolution.decision.redirect_location(), Some("https://lifelegacy.me/"));
    }

    #[test]
    fn professional_keeps_path_on_their_subdomain(
        host in prop_oneof![Just("lifelegacy.me"), Just("www.lifelegacy.me")],
        path in page_path(),
    ) {
        let rt = runtime();
        let handler = handler(Some("pro-1"));

        let resolution = resolve(&rt, &handler, host, &path);
        let expected = format!("https://acme.lifelegacy.me{}", path);
        prop_assert_eq!(resolution.decision.redirect_location(), Some(expected.as_str()));
    }

    #[test]
    fn protected_pages_require_login(
        prefix in prop_oneof![Just("/dashboard"), Just("/settings")],
        rest in page_path(),
    ) {
        let rt = runtime();
        let handler = handler(None);
        let path = if rest == "/" { prefix.to_string() } else { format!("{}{}", prefix, rest) };

        let resolution = resolve(&rt, &handler, "lifelegacy.me", &path);
        prop_assert_eq!(
            resolution.decision.redirect_location(),
            Some("https://lifelegacy.me/auth/login")
        );
    }

    #[test]
    fn evaluation_is_idempotent(host in host(), path in page_path(), who in principal()) {
        let rt = runtime();
        let handler = handler(who);

        let first = resolve(&rt, &handler, &host, &path);
        let second = resolve(&rt, &handler, &host, &path);
        prop_assert_eq!(first, second);
    }
}
