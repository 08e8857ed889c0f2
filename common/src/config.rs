/// Backend used when no override is given outside development builds.
pub const PRODUCTION_API_BASE_URL: &str = "https://gofastbackendv2-fall2025.onrender.com";

/// Where the volunteer API lives.
///
/// An empty base URL means same-origin relative paths (a dev server proxies
/// `/api`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Resolves the base URL: explicit override, else an empty base in
    /// development, else the production backend.
    pub fn resolve(override_url: Option<&str>, development: bool) -> Self {
        let base_url = match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if development => String::new(),
            None => PRODUCTION_API_BASE_URL.to_string(),
        };
        log::debug!("volunteer API base url resolved to {base_url:?}");
        Self { base_url }
    }

    /// Resolves from the compile-time environment, treating debug builds as
    /// development.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("VOLUNTEER_API_BASE_URL"), cfg!(debug_assertions))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL, adding a leading slash when missing.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
