//! IP Blacklist Lookup API Library
//!
//! Validates IP addresses, queries a third-party blacklist lookup API and
//! normalizes its loosely shaped responses into a stable `LookupOutcome`.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Validation and lookup error types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Lookup data models.
//! - `normalization`: Upstream response classification and mapping.
//! - `services`: Upstream API client and lookup entry point.
//! - `validation`: IPv4/IPv6 address validation.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalization;
pub mod services;
pub mod validation;
