//! API middleware. Only the upstream proxy routes are rate limited.

pub mod rate;
