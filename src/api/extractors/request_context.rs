//! Request context extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts, HeaderMap},
};
use url::Url;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{ANY_HOST, FORWARDED_PROTO_HEADER};
use crate::errors::AppError;
use crate::serializers::RequestContext;

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let base = request_base(&parts.headers, &state.public_base, &state.allowed_hosts);
        let ctx = RequestContext::new(base, state.media_url.clone());

        Ok(match parts.extensions.get::<CurrentUser>() {
            Some(user) => ctx.with_actor(user.id),
            None => ctx,
        })
    }
}

/// `scheme://host` of the incoming request.
///
/// The scheme comes from `X-Forwarded-Proto`, else from `fallback`. The whole
/// `fallback` is used when the `Host` header is missing, unparsable, or names
/// a host outside `allowed_hosts`.
pub fn request_base(headers: &HeaderMap, fallback: &Url, allowed_hosts: &[String]) -> Url {
    let Some(host) = headers.get(HOST).and_then(|value| value.to_str().ok()) else {
        return fallback.clone();
    };

    let scheme = headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|scheme| matches!(*scheme, "http" | "https"))
        .unwrap_or_else(|| fallback.scheme());

    let url = match Url::parse(&format!("{}://{}/", scheme, host)) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(host, error = %e, "Ignoring unusable Host header");
            return fallback.clone();
        }
    };

    match url.host_str() {
        Some(name) if host_allowed(name, allowed_hosts) => url,
        _ => {
            tracing::warn!(host, "Host header not in ALLOWED_HOSTS, using public base URL");
            fallback.clone()
        }
    }
}

/// Exact match, `*`, or a `.example.com` entry covering the domain and its
/// subdomains. `name` is already lowercase.
fn host_allowed(name: &str, allowed_hosts: &[String]) -> bool {
    allowed_hosts.iter().any(|pattern| {
        if pattern == ANY_HOST {
            return true;
        }
        match pattern.strip_prefix('.') {
            Some(domain) => name == domain || name.ends_with(pattern.as_str()),
            None => name == pattern,
        }
    })
}
