//! Session bootstrap and route guarding.
//!
//! ARCHITECTURE
//! ============
//! - `store`: the single [`SessionState`] value and its transitions.
//! - `validator`: the async seam that exchanges a token for an identity.
//! - `storage`: where the token is persisted between page loads.
//! - `guard`: the pure render decision for a pathname.
//! - `bootstrap`: the one-shot controller that restores and validates the
//!   persisted token.
//!
//! Control flows one way: bootstrap -> validator -> store -> guard. Navigation
//! is returned as a value and performed by the Leptos layer, never here.

pub mod bootstrap;
pub mod guard;
pub mod storage;
pub mod store;
pub mod validator;

pub use bootstrap::{BootstrapController, BootstrapPhase, BootstrapStart, Navigation, SessionCell};
pub use guard::{PublicRoutes, RenderDecision, decide};
pub use storage::{BrowserTokenStorage, TokenStorage};
pub use store::{SessionState, Settlement, UserIdentity, ValidationTicket};
pub use validator::{AuthError, HttpSessionValidator, SessionValidator};
