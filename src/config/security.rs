use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

/// Security header values
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Stamps the standard security headers onto every response. HSTS is only
/// sent in production, where the service sits behind HTTPS.
pub fn apply_security_headers(router: Router) -> Router {
    let mut router = router
        .layer(set_header("x-content-type-options", NOSNIFF))
        .layer(set_header("x-frame-options", DENY))
        .layer(set_header("content-security-policy", CSP_API_VALUE))
        .layer(set_header("referrer-policy", REFERRER_POLICY_VALUE))
        .layer(set_header("permissions-policy", PERMISSIONS_POLICY_VALUE));

    if hsts_enabled() {
        router = router.layer(set_header("strict-transport-security", HSTS_VALUE));
    }

    router
}

fn set_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

fn hsts_enabled() -> bool {
    let is_production = env::var("RUST_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if is_production {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    is_production
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    #[test]
    fn test_hsts_defaults_to_disabled() {
        // Without RUST_ENV set to production, HSTS should be disabled
        std::env::remove_var("RUST_ENV");
        assert!(!hsts_enabled());
    }

    #[tokio::test]
    async fn test_headers_are_stamped_on_responses() {
        std::env::remove_var("RUST_ENV");
        let app = apply_security_headers(Router::new().route("/", get(|| async { "ok" })));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], NOSNIFF);
        assert_eq!(headers["x-frame-options"], DENY);
        assert_eq!(headers["content-security-policy"], CSP_API_VALUE);
        assert_eq!(headers["referrer-policy"], REFERRER_POLICY_VALUE);
        assert!(headers.get("strict-transport-security").is_none());
    }
}
