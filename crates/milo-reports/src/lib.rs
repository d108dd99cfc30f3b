//! Read-only reporting over fetched snapshots.
//!
//! Every function here is a pure transformation of already-fetched
//! rows into counts, sums or grouped series. Nothing is cached and
//! nothing is written; callers re-fetch and recompute per request.

mod dashboard;
pub use dashboard::*;

mod revenue;
pub use revenue::*;

mod attendance;
pub use attendance::*;

mod breakdown;
pub use breakdown::*;
