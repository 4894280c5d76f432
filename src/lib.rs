//! LifeLegacy Gateway - Tenant resolution and request routing
//!
//! This crate decides, for every request to the LifeLegacy estate planning
//! platform, whether it passes through to the application or is redirected
//! to the main domain, the login page, the dashboard, or the caller's
//! organization subdomain.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
