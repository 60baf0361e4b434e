//! Userdeck API Library
//!
//! A layered user-management service: domain entity and rules, repository
//! and notification ports, a SQLite adapter, use-case orchestration with a
//! uniform result envelope, and an axum HTTP boundary on top.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
