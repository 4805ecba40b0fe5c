//! Internal scheme URLs
//!
//! Special pages (session restore, error pages) are served from the
//! application's own scheme. Older versions served them from the embedded
//! web server on `localhost`, so both forms are recognized here.
//! Loading a restricted internal page requires an authorization token in the
//! `uuidkey` query parameter; persisted history must never keep it.

use url::{Position, Url};

use crate::config::MigrationConfig;

/// Query parameter carrying the authorization token
pub const AUTHORIZATION_PARAM: &str = "uuidkey";
/// Query parameter carrying the wrapped target address
pub const URL_PARAM: &str = "url";
pub const ERROR_PAGE_PATH: &str = "errorpage";

#[derive(Debug, Clone, Copy)]
pub struct InternalUrl<'a> {
    url: &'a Url,
    config: &'a MigrationConfig,
}

impl<'a> InternalUrl<'a> {
    /// Returns `None` for ordinary network addresses
    pub fn new(url: &'a Url, config: &'a MigrationConfig) -> Option<Self> {
        Self::is_valid(url, config).then_some(Self { url, config })
    }

    pub fn is_valid(url: &Url, config: &MigrationConfig) -> bool {
        url.scheme() == config.internal_scheme()
            || url.as_str().starts_with(config.webserver_origin())
    }

    pub fn url(&self) -> &'a Url {
        self.url
    }

    /// Token value, if the address carries one
    pub fn authorization_key(&self) -> Option<&'a str> {
        self.url.query()?.split('&').find_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (name == AUTHORIZATION_PARAM).then_some(value)
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.authorization_key().is_some_and(|key| !key.is_empty())
    }

    pub fn is_authorized_by(&self, token: &str) -> bool {
        !token.is_empty() && self.authorization_key() == Some(token)
    }

    /// Serialized address without the authorization parameter.
    ///
    /// Works on the raw query text so the remaining parameters keep their
    /// exact encoding. An emptied query is dropped entirely.
    pub fn strip_authorization(&self) -> String {
        let Some(query) = self.url.query() else {
            return self.url.as_str().to_string();
        };

        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| param_name(pair) != AUTHORIZATION_PARAM)
            .collect();

        let mut stripped = self.url[..Position::AfterPath].to_string();
        if !kept.is_empty() {
            stripped.push('?');
            stripped.push_str(&kept.join("&"));
        }
        if let Some(fragment) = self.url.fragment() {
            stripped.push('#');
            stripped.push_str(fragment);
        }
        stripped
    }

    /// Append (or replace) the authorization token
    pub fn authorize(url: &Url, token: &str) -> Url {
        let mut pairs: Vec<String> = url
            .query()
            .map(|q| {
                q.split('&')
                    .filter(|pair| !pair.is_empty() && param_name(pair) != AUTHORIZATION_PARAM)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        pairs.push(format!("{}={}", AUTHORIZATION_PARAM, token));

        let mut authorized = url.clone();
        authorized.set_query(Some(&pairs.join("&")));
        authorized
    }

    pub fn is_session_restore(&self) -> bool {
        self.is_internal_scheme() && self.page() == self.config.session_restore_path()
    }

    pub fn is_error_page(&self) -> bool {
        self.is_internal_scheme() && self.page() == ERROR_PAGE_PATH
    }

    /// Target address wrapped by a session-restore or error page
    pub fn extracted_url_param(&self) -> Option<Url> {
        let (_, value) = self.url.query_pairs().find(|(name, _)| name == URL_PARAM)?;
        Url::parse(&value).ok()
    }

    fn is_internal_scheme(&self) -> bool {
        self.url.scheme() == self.config.internal_scheme()
    }

    fn page(&self) -> &str {
        self.url.path().trim_matches('/')
    }
}

fn param_name(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_recognizes_internal_urls() {
        let config = MigrationConfig::default();

        let internal = parse("internal://local/session-restore?url=https://example.com");
        assert!(InternalUrl::new(&internal, &config).is_some());

        let webserver = parse("http://localhost:6571/reader-mode/page?url=https://example.com");
        assert!(InternalUrl::new(&webserver, &config).is_some());

        let other_port = parse("http://localhost:8080/index.html");
        assert!(InternalUrl::new(&other_port, &config).is_none());

        let network = parse("https://example.com/?uuidkey=abc");
        assert!(InternalUrl::new(&network, &config).is_none());
    }

    #[test]
    fn test_authorization_key() {
        let config = MigrationConfig::default();

        let url = parse("internal://local/errorpage?url=https://example.com&uuidkey=abc123");
        let internal = InternalUrl::new(&url, &config).unwrap();
        assert_eq!(internal.authorization_key(), Some("abc123"));
        assert!(internal.is_authorized());
        assert!(internal.is_authorized_by("abc123"));
        assert!(!internal.is_authorized_by("other"));

        let empty = parse("internal://local/errorpage?uuidkey=");
        let internal = InternalUrl::new(&empty, &config).unwrap();
        assert!(!internal.is_authorized());

        let none = parse("internal://local/errorpage?url=https://example.com");
        let internal = InternalUrl::new(&none, &config).unwrap();
        assert_eq!(internal.authorization_key(), None);
    }

    #[test]
    fn test_strip_authorization_preserves_rest() {
        let config = MigrationConfig::default();

        let url = parse("internal://local/errorpage?uuidkey=abc&url=https://example.com/a?b=c#frag");
        let internal = InternalUrl::new(&url, &config).unwrap();
        assert_eq!(
            internal.strip_authorization(),
            "internal://local/errorpage?url=https://example.com/a?b=c#frag"
        );

        let only_key = parse("internal://local/about/home?uuidkey=abc");
        let internal = InternalUrl::new(&only_key, &config).unwrap();
        assert_eq!(internal.strip_authorization(), "internal://local/about/home");
    }

    #[test]
    fn test_authorize_round_trip() {
        let config = MigrationConfig::default();

        let url = parse("internal://local/errorpage?url=https://example.com&uuidkey=stale");
        let authorized = InternalUrl::authorize(&url, "fresh");
        assert_eq!(
            authorized.as_str(),
            "internal://local/errorpage?url=https://example.com&uuidkey=fresh"
        );

        let internal = InternalUrl::new(&authorized, &config).unwrap();
        assert!(internal.is_authorized_by("fresh"));
        assert_eq!(
            internal.strip_authorization(),
            "internal://local/errorpage?url=https://example.com"
        );
    }

    #[test]
    fn test_page_kinds() {
        let config = MigrationConfig::default();

        let restore = parse("internal://local/session-restore?url=https://example.com/path");
        let internal = InternalUrl::new(&restore, &config).unwrap();
        assert!(internal.is_session_restore());
        assert!(!internal.is_error_page());
        assert_eq!(
            internal.extracted_url_param().unwrap().as_str(),
            "https://example.com/path"
        );

        let error = parse("internal://local/errorpage?url=https%3A%2F%2Fexample.com%2F");
        let internal = InternalUrl::new(&error, &config).unwrap();
        assert!(internal.is_error_page());
        assert_eq!(
            internal.extracted_url_param().unwrap().as_str(),
            "https://example.com/"
        );
    }
}
