//! One-shot session bootstrap.
//!
//! ARCHITECTURE
//! ============
//! `Unstarted -> Validating -> Settled`, or `Unstarted -> Settled` when no
//! token is persisted. [`BootstrapController::start`] is synchronous and writes
//! the loading flag; [`BootstrapController::complete`] awaits the validator.
//! The flag is in the store before the first await.
//!
//! Once settled, the controller never runs again for this client; later route
//! changes are handled by the guard alone.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::sync::atomic::{AtomicU8, Ordering};

use leptos::prelude::{GetUntracked, RwSignal, Set};

use super::guard::{PublicRoutes, RenderDecision, decide};
use super::storage::TokenStorage;
use super::store::{SessionState, Settlement, ValidationTicket};
use super::validator::SessionValidator;

/// Where the bootstrap latch stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BootstrapPhase {
    #[default]
    Unstarted = 0,
    Validating = 1,
    Settled = 2,
}

impl BootstrapPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Unstarted,
            1 => Self::Validating,
            _ => Self::Settled,
        }
    }
}

/// A navigation the caller should perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

/// Result of the synchronous half of bootstrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapStart {
    /// Bootstrap already ran (or is running); nothing to do.
    AlreadyStarted,
    /// No token: bootstrap is settled, with an optional redirect.
    Settled(Option<Navigation>),
    /// Token present and marked loading; hand the ticket to `complete`.
    Validate(ValidationTicket),
}

/// Read/write access to the single session store.
///
/// Implemented for the app's `RwSignal` and for a plain `RefCell` in tests.
/// No await happens between a `snapshot` and the matching `replace`.
pub trait SessionCell {
    fn snapshot(&self) -> SessionState;
    fn replace(&self, state: SessionState);
}

impl SessionCell for RwSignal<SessionState> {
    fn snapshot(&self) -> SessionState {
        self.get_untracked()
    }

    fn replace(&self, state: SessionState) {
        self.set(state);
    }
}

impl SessionCell for std::cell::RefCell<SessionState> {
    fn snapshot(&self) -> SessionState {
        self.borrow().clone()
    }

    fn replace(&self, state: SessionState) {
        *self.borrow_mut() = state;
    }
}

/// Restores and validates the persisted session exactly once.
#[derive(Debug)]
pub struct BootstrapController {
    phase: AtomicU8,
    public_routes: PublicRoutes,
    login_path: String,
}

impl BootstrapController {
    pub fn new(public_routes: PublicRoutes, login_path: impl Into<String>) -> Self {
        Self {
            phase: AtomicU8::new(BootstrapPhase::Unstarted as u8),
            public_routes,
            login_path: login_path.into(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> BootstrapPhase {
        BootstrapPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    fn set_phase(&self, phase: BootstrapPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    /// Synchronous half: take the latch, restore the persisted token, and
    /// either settle immediately or mark the store loading.
    pub fn start(&self, cell: &impl SessionCell, storage: &dyn TokenStorage, pathname: &str) -> BootstrapStart {
        let latched = self.phase.compare_exchange(
            BootstrapPhase::Unstarted as u8,
            BootstrapPhase::Validating as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if latched.is_err() {
            return BootstrapStart::AlreadyStarted;
        }

        let mut state = cell.snapshot();
        if !state.has_token() {
            if let Some(token) = storage.load() {
                state.restore_token(token);
            }
        }

        if let Some(ticket) = state.begin_validation() {
            cell.replace(state);
            return BootstrapStart::Validate(ticket);
        }

        log::debug!("no persisted session token; bootstrap settled");
        self.set_phase(BootstrapPhase::Settled);
        let navigation = self.redirect_for(pathname, &state);
        cell.replace(state);
        BootstrapStart::Settled(navigation)
    }

    /// Async half: run the validator for `ticket` and settle the store.
    /// Returns the redirect to perform, if the route is now forbidden.
    pub async fn complete<V>(
        &self,
        cell: &impl SessionCell,
        validator: &V,
        storage: &dyn TokenStorage,
        ticket: ValidationTicket,
        pathname: &str,
    ) -> Option<Navigation>
    where
        V: SessionValidator + ?Sized,
    {
        let outcome = validator.validate(ticket.token()).await;

        let mut state = cell.snapshot();
        match state.settle(&ticket, outcome) {
            Settlement::Cleared => {
                log::info!("persisted session rejected; forcing logout");
                storage.clear();
            }
            Settlement::Authenticated | Settlement::Stale => {}
        }
        self.set_phase(BootstrapPhase::Settled);
        let navigation = self.redirect_for(pathname, &state);
        cell.replace(state);
        navigation
    }

    /// Both halves back to back. Repeat calls are no-ops returning `None`.
    pub async fn run<V>(
        &self,
        cell: &impl SessionCell,
        validator: &V,
        storage: &dyn TokenStorage,
        pathname: &str,
    ) -> Option<Navigation>
    where
        V: SessionValidator + ?Sized,
    {
        match self.start(cell, storage, pathname) {
            BootstrapStart::AlreadyStarted => None,
            BootstrapStart::Settled(navigation) => navigation,
            BootstrapStart::Validate(ticket) => self.complete(cell, validator, storage, ticket, pathname).await,
        }
    }

    fn redirect_for(&self, pathname: &str, state: &SessionState) -> Option<Navigation> {
        (decide(pathname, state, &self.public_routes) == RenderDecision::RedirectToLogin).then(|| Navigation {
            to: self.login_path.clone(),
        })
    }
}
