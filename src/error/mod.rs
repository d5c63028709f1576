//! Error types for the castlink backend.
//!
//! Domain-specific error enums live in submodules and are aggregated into a
//! single [`Error`] type with `#[from]` conversions so `?` works across
//! module boundaries. Transient upstream failures (platform APIs, object
//! store, image sources) are contained where they happen and never reach this
//! type from the worker's normal path; what does reach it is infrastructure
//! trouble the caller has to know about (queue down, database down).

pub mod feed;
pub mod og_image;
pub mod platform;
pub mod store;
pub mod worker;

use thiserror::Error;

use crate::error::{
    feed::FeedError, og_image::OgImageError, platform::PlatformError, store::StoreError,
    worker::WorkerError,
};

#[derive(Error, Debug)]
pub enum Error {
    /// Feed reader error (fetch failure or malformed entry).
    #[error(transparent)]
    FeedError(#[from] FeedError),
    /// Platform resolver error (auth, request transport).
    #[error(transparent)]
    PlatformError(#[from] PlatformError),
    /// Preview image generation error (fetch, decode, encode).
    #[error(transparent)]
    OgImageError(#[from] OgImageError),
    /// Object store error (upload/delete transport or status).
    #[error(transparent)]
    StoreError(#[from] StoreError),
    /// Worker queue error (job validation, serialization).
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis error (connection, command execution, Lua scripts).
    #[error(transparent)]
    RedisError(#[from] fred::prelude::Error),
    /// HTTP client error outside a more specific domain.
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}
