//! tidepost: accounts, bearer tokens and per-user posts behind a small HTTP API.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
