//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_bootstrap` and `route_guard` wrap the router and own session-driven
//! rendering; the rest are presentational pieces for dashboard pages.

pub mod data_table;
pub mod page_header;
pub mod route_guard;
pub mod session_bootstrap;
pub mod spinner;
pub mod stat_card;
