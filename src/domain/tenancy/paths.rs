//! Path classification rules.

/// Path prefixes the router treats specially.
///
/// All prefix checks are segment-aware: `/auth` matches `/auth` and
/// `/auth/login`, never `/authority`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRules {
    /// Never routed: build assets, static files, the API namespace.
    pub excluded_prefixes: Vec<String>,
    /// Login, signup, and password pages.
    pub auth_prefix: String,
    pub login_path: String,
    pub dashboard_path: String,
    /// Require a principal on the main domain.
    pub protected_prefixes: Vec<String>,
}

impl PathRules {
    /// True for asset, static, and API paths, and any path whose last
    /// segment carries a file extension.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| has_prefix(path, prefix))
            || has_file_extension(path)
    }

    pub fn is_auth_page(&self, path: &str) -> bool {
        has_prefix(path, &self.auth_prefix)
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| has_prefix(path, prefix))
    }
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            excluded_prefixes: ["/_next", "/assets", "/static", "/api"]
                .into_iter()
                .map(String::from)
                .collect(),
            auth_prefix: "/auth".to_string(),
            login_path: "/auth/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            protected_prefixes: ["/dashboard", "/settings"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Segment-aware prefix match.
pub fn has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn has_file_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rfind('.') {
        Some(dot) => dot + 1 < last.len(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_whole_segments_only() {
        assert!(has_prefix("/auth", "/auth"));
        assert!(has_prefix("/auth/login", "/auth"));
        assert!(!has_prefix("/authority", "/auth"));
        assert!(!has_prefix("/", "/auth"));
    }

    #[test]
    fn prefix_ignores_trailing_slash_in_rule() {
        assert!(has_prefix("/settings/billing", "/settings/"));
    }

    #[test]
    fn excluded_covers_assets_and_api() {
        let rules = PathRules::default();
        assert!(rules.is_excluded("/_next/static/chunks/main.js"));
        assert!(rules.is_excluded("/api/chat"));
        assert!(rules.is_excluded("/static"));
        assert!(!rules.is_excluded("/apiary"));
    }

    #[test]
    fn excluded_covers_file_extensions() {
        let rules = PathRules::default();
        assert!(rules.is_excluded("/favicon.ico"));
        assert!(rules.is_excluded("/images/logo.svg"));
        assert!(!rules.is_excluded("/dashboard"));
        assert!(!rules.is_excluded("/v1.2/"));
        assert!(!rules.is_excluded("/trailing."));
    }

    #[test]
    fn auth_and_protected_pages() {
        let rules = PathRules::default();
        assert!(rules.is_auth_page("/auth/login"));
        assert!(rules.is_auth_page("/auth/signup"));
        assert!(!rules.is_auth_page("/dashboard"));

        assert!(rules.is_protected("/dashboard"));
        assert!(rules.is_protected("/dashboard/clients/42"));
        assert!(rules.is_protected("/settings"));
        assert!(!rules.is_protected("/pricing"));
    }
}
