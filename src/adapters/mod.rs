//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP services, token persistence, terminal UI. Map errors to DomainError.

pub mod http;
pub mod persistence;
pub mod ui;
