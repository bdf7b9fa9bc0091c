//! Application layer
//!
//! Use cases that orchestrate domain services to implement the storefront's
//! workflows. Each use case is a thin, explicitly-wired struct.

pub mod auth;
pub mod catalog;
