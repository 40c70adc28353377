//! Core types for bear-tracks
//!
//! Domain records shared by every crate, plus the pure metric transforms the
//! dashboard is built from.

pub mod constants;
mod device;
pub mod env_config;
mod error;
pub mod metrics;
mod page_view;
mod recent;
mod session;
mod tracking;

pub use device::DeviceType;
pub use error::CoreError;
pub use page_view::{NewPageView, PageView};
pub use recent::RecentPageViews;
pub use session::Session;
pub use tracking::{IngestOutcome, TrackEvent};
