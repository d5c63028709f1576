//! Castlink backend core.
//!
//! This crate contains the asynchronous episode-resolution pipeline for the
//! podcast smartlink pages: a Redis-backed worker queue with throttled
//! submission, a worker pool that resolves cross-platform deep links and
//! generates Open Graph preview images, and the persistent link cache the
//! page-rendering layer reads from.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod store;
pub mod worker;
