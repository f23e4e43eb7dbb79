use std::cell::{Cell, RefCell};

use super::*;
use crate::session::store::UserIdentity;
use crate::session::validator::AuthError;

// =========================================================================
// Test doubles
// =========================================================================

#[derive(Default)]
struct MemoryStorage {
    token: RefCell<Option<String>>,
}

impl MemoryStorage {
    fn with(token: &str) -> Self {
        Self { token: RefCell::new(Some(token.to_owned())) }
    }

    fn current(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

struct MockValidator {
    outcome: Result<UserIdentity, AuthError>,
    calls: Cell<usize>,
}

impl MockValidator {
    fn ok(id: &str) -> Self {
        Self { outcome: Ok(UserIdentity::new(id)), calls: Cell::new(0) }
    }

    fn rejecting() -> Self {
        Self { outcome: Err(AuthError::Rejected { status: 401 }), calls: Cell::new(0) }
    }

    fn network_down() -> Self {
        Self { outcome: Err(AuthError::Network("offline".into())), calls: Cell::new(0) }
    }
}

#[async_trait::async_trait(?Send)]
impl SessionValidator for MockValidator {
    async fn validate(&self, token: &str) -> Result<UserIdentity, AuthError> {
        assert!(!token.is_empty());
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

/// Validator that logs the user out while its request is "in flight".
struct LogoutDuringValidation<'a> {
    cell: &'a RefCell<SessionState>,
}

#[async_trait::async_trait(?Send)]
impl SessionValidator for LogoutDuringValidation<'_> {
    async fn validate(&self, _token: &str) -> Result<UserIdentity, AuthError> {
        let mut state = self.cell.snapshot();
        state.logout();
        self.cell.replace(state);
        Ok(UserIdentity::new("u1"))
    }
}

fn controller() -> BootstrapController {
    BootstrapController::new(PublicRoutes::default(), "/login")
}

fn to_login() -> Option<Navigation> {
    Some(Navigation { to: "/login".to_owned() })
}

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test]
async fn no_token_on_protected_route_redirects_without_validating() {
    let cell = RefCell::new(SessionState::default());
    let validator = MockValidator::ok("u1");
    let ctl = controller();

    let nav = ctl.run(&cell, &validator, &MemoryStorage::default(), "/dashboard").await;

    assert_eq!(nav, to_login());
    assert_eq!(validator.calls.get(), 0);
    assert_eq!(ctl.phase(), BootstrapPhase::Settled);
    assert_eq!(
        decide("/dashboard", &cell.borrow(), &PublicRoutes::default()),
        RenderDecision::RedirectToLogin
    );
}

#[tokio::test]
async fn valid_token_authenticates_and_renders() {
    let cell = RefCell::new(SessionState::default());
    let validator = MockValidator::ok("u1");
    let storage = MemoryStorage::with("tok");
    let ctl = controller();

    let nav = ctl.run(&cell, &validator, &storage, "/dashboard").await;

    let state = cell.borrow();
    assert_eq!(nav, None);
    assert!(state.is_authenticated());
    assert!(state.session_validated());
    assert!(!state.is_loading());
    assert_eq!(state.user().map(|u| u.id.as_str()), Some("u1"));
    assert_eq!(validator.calls.get(), 1);
    assert_eq!(storage.current().as_deref(), Some("tok"));
    assert_eq!(
        decide("/dashboard", &state, &PublicRoutes::default()),
        RenderDecision::RenderChildren
    );
}

#[tokio::test]
async fn rejected_token_clears_session_and_storage() {
    let cell = RefCell::new(SessionState::default());
    let validator = MockValidator::rejecting();
    let storage = MemoryStorage::with("expired");
    let ctl = controller();

    let nav = ctl.run(&cell, &validator, &storage, "/dashboard").await;

    let state = cell.borrow();
    assert_eq!(nav, to_login());
    assert_eq!(state.token(), None);
    assert!(!state.is_authenticated());
    assert!(!state.session_validated());
    assert_eq!(storage.current(), None);
    assert_eq!(
        decide("/dashboard", &state, &PublicRoutes::default()),
        RenderDecision::RedirectToLogin
    );
}

#[tokio::test]
async fn no_token_on_public_route_renders_without_validating() {
    let cell = RefCell::new(SessionState::default());
    let validator = MockValidator::ok("u1");
    let ctl = controller();

    let nav = ctl.run(&cell, &validator, &MemoryStorage::default(), "/login").await;

    assert_eq!(nav, None);
    assert_eq!(validator.calls.get(), 0);
    assert_eq!(
        decide("/login", &cell.borrow(), &PublicRoutes::default()),
        RenderDecision::RenderChildren
    );
}

#[tokio::test]
async fn rejected_token_on_public_route_does_not_redirect() {
    let cell = RefCell::new(SessionState::default());
    let ctl = controller();

    let nav = ctl
        .run(&cell, &MockValidator::network_down(), &MemoryStorage::with("tok"), "/")
        .await;

    assert_eq!(nav, None);
    assert!(!cell.borrow().has_token());
}

// =========================================================================
// Latch and ordering
// =========================================================================

#[tokio::test]
async fn repeated_runs_validate_at_most_once() {
    let cell = RefCell::new(SessionState::default());
    let validator = MockValidator::ok("u1");
    let storage = MemoryStorage::with("tok");
    let ctl = controller();

    ctl.run(&cell, &validator, &storage, "/dashboard").await;
    ctl.run(&cell, &validator, &storage, "/dashboard").await;
    ctl.run(&cell, &validator, &storage, "/orders").await;

    assert_eq!(validator.calls.get(), 1);
    assert!(cell.borrow().is_authenticated());
}

#[test]
fn start_twice_while_validating_is_a_noop() {
    let cell = RefCell::new(SessionState::default());
    let storage = MemoryStorage::with("tok");
    let ctl = controller();

    assert!(matches!(ctl.start(&cell, &storage, "/dashboard"), BootstrapStart::Validate(_)));
    assert_eq!(ctl.phase(), BootstrapPhase::Validating);
    assert_eq!(ctl.start(&cell, &storage, "/dashboard"), BootstrapStart::AlreadyStarted);
}

#[test]
fn start_marks_loading_before_any_await() {
    let cell = RefCell::new(SessionState::default());
    let ctl = controller();

    let started = ctl.start(&cell, &MemoryStorage::with("tok"), "/dashboard");

    assert!(matches!(started, BootstrapStart::Validate(ref t) if t.token() == "tok"));
    let state = cell.borrow();
    assert!(state.is_loading());
    assert!(!state.session_validated());
    assert_eq!(
        decide("/dashboard", &state, &PublicRoutes::default()),
        RenderDecision::RenderLoading
    );
}

#[test]
fn start_without_token_settles_immediately() {
    let cell = RefCell::new(SessionState::default());
    let ctl = controller();

    let started = ctl.start(&cell, &MemoryStorage::default(), "/dashboard");

    assert_eq!(started, BootstrapStart::Settled(to_login()));
    assert_eq!(ctl.phase(), BootstrapPhase::Settled);
    assert!(!cell.borrow().is_loading());
}

#[test]
fn blank_persisted_token_counts_as_missing() {
    let cell = RefCell::new(SessionState::default());
    let ctl = controller();

    let started = ctl.start(&cell, &MemoryStorage::with("  "), "/login");

    assert_eq!(started, BootstrapStart::Settled(None));
    assert!(!cell.borrow().has_token());
}

#[tokio::test]
async fn logout_during_validation_wins() {
    let cell = RefCell::new(SessionState::default());
    let validator = LogoutDuringValidation { cell: &cell };
    let ctl = controller();

    let nav = ctl.run(&cell, &validator, &MemoryStorage::with("tok"), "/dashboard").await;

    let state = cell.borrow();
    assert_eq!(nav, to_login());
    assert!(!state.is_authenticated());
    assert!(state.user().is_none());
    assert!(!state.has_token());
    assert_eq!(ctl.phase(), BootstrapPhase::Settled);
}

#[test]
fn phase_defaults_to_unstarted() {
    assert_eq!(controller().phase(), BootstrapPhase::Unstarted);
    assert_eq!(BootstrapPhase::default(), BootstrapPhase::Unstarted);
}
