//! Storage backend trait abstraction
//!
//! Async domain traits implemented by every backend. Services depend on these
//! rather than on a concrete database.

pub mod page_view;
pub mod session;
pub mod stats;

pub use page_view::PageViewStore;
pub use session::SessionStore;
pub use stats::StatsStore;
