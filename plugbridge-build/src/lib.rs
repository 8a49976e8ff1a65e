//! # plugbridge-build
//!
//! Distribution build pipeline: partition the dependency manifest, assemble
//! an isolated temporary workspace (source copy + vendored VCS
//! dependencies), and serialize it into a versioned zip archive.
//!
//! [`pipeline::run`] is the canonical entrypoint; the workspace it creates
//! is a scoped resource, torn down on every exit path.

pub mod archive;
pub mod deps;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod workspace;

pub use deps::{DependencyKind, DependencyManifest, DependencySpec, Partition};
pub use error::BuildError;
pub use pipeline::BuildReport;
pub use resolver::{DependencyResolver, PipResolver};
