//! Per-request context handed to every transform.

use url::Url;

/// Collaborators a transform needs from the surrounding request.
///
/// Carries the base address used to build absolute resource URLs, the media
/// prefix uploaded files are served under, and the acting user if any.
#[derive(Debug, Clone)]
pub struct RequestContext {
    base: Url,
    media_url: String,
    actor: Option<i64>,
}

impl RequestContext {
    /// `media_url` is expected to end with `/`.
    pub fn new(base: Url, media_url: impl Into<String>) -> Self {
        Self {
            base,
            media_url: media_url.into(),
            actor: None,
        }
    }

    /// Attach the authenticated user.
    pub fn with_actor(mut self, actor: i64) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn actor(&self) -> Option<i64> {
        self.actor
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `location` against the request base.
    ///
    /// Absolute locations are returned as they are.
    pub fn build_absolute_uri(&self, location: &str) -> String {
        match self.base.join(location) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(location, error = %e, "Could not resolve location against base");
                location.to_string()
            }
        }
    }

    /// Absolute URL of an uploaded file given its relative storage path.
    pub fn absolute_media_url(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_string();
        }

        let relative = format!("{}{}", self.media_url, path.trim_start_matches('/'));
        self.build_absolute_uri(&relative)
    }
}
