//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns URL building, bearer-token injection, timeouts, and status
//! classification. Every backend call in the crate goes through it.

pub mod api;
