//! Route guard: the render decision for a pathname given the session.
//!
//! Decision order (first match wins):
//!
//! 1. public pathname -> render children;
//! 2. no token -> redirect to login;
//! 3. validated -> render children when authenticated, else redirect;
//! 4. token present but not yet validated -> loading interstitial.
//!
//! Step 4 also covers the instant before bootstrap marks the request in
//! flight, so protected content is never flashed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::collections::BTreeSet;

use super::store::SessionState;

/// Routes reachable without a session.
pub const DEFAULT_PUBLIC_ROUTES: [&str; 2] = ["/", "/login"];

/// What a route should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderDecision {
    RenderChildren,
    RenderLoading,
    RedirectToLogin,
}

/// Exact-match allowlist of public pathnames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicRoutes {
    paths: BTreeSet<String>,
}

impl PublicRoutes {
    /// Build an allowlist. Entries are normalized the same way lookups are.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| normalize_path(p.as_ref()).to_owned())
            .collect();
        Self { paths }
    }

    /// Whether `pathname` is public. No prefix matching: `/login` does not make
    /// `/login/reset` public.
    #[must_use]
    pub fn contains(&self, pathname: &str) -> bool {
        self.paths.contains(normalize_path(pathname))
    }

    /// Add `pathname` to the allowlist.
    pub fn insert(&mut self, pathname: &str) {
        self.paths.insert(normalize_path(pathname).to_owned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_ROUTES)
    }
}

/// Strip query, fragment, and a single trailing slash. Empty input maps to
/// `/`. Paths with doubled slashes are left as-is so they never collapse
/// onto a public entry.
#[must_use]
pub fn normalize_path(pathname: &str) -> &str {
    let end = pathname.find(['?', '#']).unwrap_or(pathname.len());
    let path = &pathname[..end];
    if path.is_empty() {
        return "/";
    }
    if path.len() > 1 && !path.contains("//") {
        return path.strip_suffix('/').unwrap_or(path);
    }
    path
}

/// Decide what `pathname` renders for `session`.
#[must_use]
pub fn decide(pathname: &str, session: &SessionState, public: &PublicRoutes) -> RenderDecision {
    if public.contains(pathname) {
        return RenderDecision::RenderChildren;
    }
    if !session.has_token() {
        return RenderDecision::RedirectToLogin;
    }
    if session.session_validated() {
        return if session.is_authenticated() {
            RenderDecision::RenderChildren
        } else {
            RenderDecision::RedirectToLogin
        };
    }
    RenderDecision::RenderLoading
}
