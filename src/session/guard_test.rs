use super::*;
use crate::session::store::UserIdentity;

fn with_token() -> SessionState {
    let mut state = SessionState::default();
    state.restore_token("tok");
    state
}

fn loading() -> SessionState {
    let mut state = with_token();
    state.begin_validation();
    state
}

fn authenticated() -> SessionState {
    let mut state = with_token();
    let ticket = state.begin_validation().unwrap();
    state.settle(&ticket, Ok(UserIdentity::new("u1")));
    state
}

fn all_states() -> Vec<SessionState> {
    vec![SessionState::default(), with_token(), loading(), authenticated()]
}

// =============================================================
// Public routes
// =============================================================

#[test]
fn public_routes_render_children_for_every_session_state() {
    let routes = PublicRoutes::default();
    for path in ["/", "/login"] {
        for state in all_states() {
            assert_eq!(decide(path, &state, &routes), RenderDecision::RenderChildren, "{path}");
        }
    }
}

#[test]
fn public_match_is_exact_not_prefix() {
    let routes = PublicRoutes::default();
    assert!(routes.contains("/login"));
    assert!(!routes.contains("/login/admin"));
    assert!(!routes.contains("/loginx"));
    assert_eq!(
        decide("/login/admin", &SessionState::default(), &routes),
        RenderDecision::RedirectToLogin
    );
}

#[test]
fn root_is_public_but_does_not_cover_children() {
    let routes = PublicRoutes::default();
    assert!(routes.contains("/"));
    assert!(!routes.contains("/dashboard"));
}

#[test]
fn public_match_ignores_trailing_slash_query_and_fragment() {
    let routes = PublicRoutes::default();
    assert!(routes.contains("/login/"));
    assert!(routes.contains("/login?next=%2Fdashboard"));
    assert!(routes.contains("/login#form"));
    assert!(routes.contains(""));
}

#[test]
fn custom_allowlist_is_normalized() {
    let routes = PublicRoutes::new(["/pricing/", "/register"]);
    assert!(routes.contains("/pricing"));
    assert!(routes.contains("/register/"));
    assert!(!routes.contains("/"));
    assert_eq!(routes.iter().collect::<Vec<_>>(), vec!["/pricing", "/register"]);
}

// =============================================================
// Protected routes
// =============================================================

#[test]
fn protected_without_token_redirects() {
    let routes = PublicRoutes::default();
    assert_eq!(
        decide("/dashboard", &SessionState::default(), &routes),
        RenderDecision::RedirectToLogin
    );
}

#[test]
fn protected_while_loading_renders_loading() {
    let routes = PublicRoutes::default();
    assert_eq!(decide("/dashboard", &loading(), &routes), RenderDecision::RenderLoading);
}

#[test]
fn protected_with_unvalidated_token_renders_loading_before_bootstrap() {
    let routes = PublicRoutes::default();
    assert_eq!(decide("/dashboard", &with_token(), &routes), RenderDecision::RenderLoading);
}

#[test]
fn protected_when_authenticated_renders_children() {
    let routes = PublicRoutes::default();
    assert_eq!(decide("/dashboard", &authenticated(), &routes), RenderDecision::RenderChildren);
    assert_eq!(decide("/orders/42", &authenticated(), &routes), RenderDecision::RenderChildren);
}

#[test]
fn protected_after_failed_validation_redirects() {
    let routes = PublicRoutes::default();
    let mut state = with_token();
    let ticket = state.begin_validation().unwrap();
    state.settle(&ticket, Err(crate::session::AuthError::Rejected { status: 401 }));
    assert_eq!(decide("/dashboard", &state, &routes), RenderDecision::RedirectToLogin);
}

// =============================================================
// normalize_path
// =============================================================

#[test]
fn normalize_path_cases() {
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/?x=1"), "/");
    assert_eq!(normalize_path("/dashboard/"), "/dashboard");
    assert_eq!(normalize_path("/dashboard?tab=orders"), "/dashboard");
}

#[test]
fn normalize_path_keeps_doubled_slashes_and_whitespace() {
    assert_eq!(normalize_path("//"), "//");
    assert_eq!(normalize_path("//login/"), "//login/");
    assert_eq!(normalize_path(" /login"), " /login");
}

#[test]
fn doubled_slash_and_padded_paths_are_not_public() {
    let routes = PublicRoutes::default();
    assert!(!routes.contains("//"));
    assert!(!routes.contains("/login//"));
    assert!(!routes.contains(" /login "));
    assert_eq!(
        decide("//", &SessionState::default(), &routes),
        RenderDecision::RedirectToLogin
    );
}

#[test]
fn insert_adds_normalized_entry() {
    let mut routes = PublicRoutes::new(["/pricing"]);
    routes.insert("/login/");
    assert!(routes.contains("/login"));
}
