//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session state lives in `crate::session`; this module holds the per-entity
//! resource slices that dashboard pages hold in `RwSignal`s.

pub mod resource;
