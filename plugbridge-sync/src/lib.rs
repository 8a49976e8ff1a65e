//! # plugbridge-sync
//!
//! Three-way diff engine between a plugin source tree and its installed
//! copy inside the host application.
//!
//! Call [`plan::compute`] to classify files into add/copy/delete,
//! [`apply::apply`] to carry the plan out, or [`pipeline::run`] for the
//! canonical resolve-compute-apply entrypoint the CLI uses.

pub mod apply;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod plan;

pub use apply::SyncOutcome;
pub use error::SyncError;
pub use plan::{DeleteEntry, PlanEntry, SyncPlan};
