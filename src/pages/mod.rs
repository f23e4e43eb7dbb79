//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control is not a page concern: the route guard
//! decides before a page is ever mounted.

pub mod dashboard;
pub mod landing;
pub mod login;
