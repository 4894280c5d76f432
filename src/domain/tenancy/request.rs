//! The routable parts of an incoming request.

/// Host, path, and query of a request, detached from any HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    host: String,
    path: String,
    query: Option<String>,
}

impl RequestTarget {
    /// Builds a target from the raw `Host` value, path, and query string.
    ///
    /// The host is lowercased; an empty path becomes `/`.
    pub fn new(host: impl Into<String>, path: impl Into<String>, query: Option<String>) -> Self {
        let path = path.into();
        Self {
            host: host.into().trim().to_ascii_lowercase(),
            path: if path.is_empty() { "/".to_string() } else { path },
            query: query.filter(|q| !q.is_empty()),
        }
    }

    /// Host as sent, including any port (`acme.localhost:3000`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host with the port removed (`acme.localhost`).
    pub fn hostname(&self) -> &str {
        strip_port(&self.host)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// First non-empty value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Removes a trailing `:port` from a host, leaving IPv6 literals intact.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
