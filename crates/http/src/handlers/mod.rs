#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod live;
pub mod metrics;
pub mod sessions;
pub mod track;
