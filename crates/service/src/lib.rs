//! Service layer for bear-tracks
//!
//! Centralizes ingestion, aggregation and live fan-out between the HTTP
//! handlers and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod analytics_service;
mod error;
mod live_feed;
mod tracking_service;

pub use analytics_service::{AnalyticsService, SessionDetail};
pub use error::ServiceError;
pub use live_feed::{LiveFeed, Subscription};
pub use tracking_service::TrackingService;
