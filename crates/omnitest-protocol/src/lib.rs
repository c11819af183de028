//! Contracts for talking to an OmniSharp-style .NET test backend.
//!
//! The backend is an external process that compiles test projects, enumerates
//! test methods and streams execution results back over an event channel.
//! This crate defines the payload shapes it produces and the [`TestBackend`]
//! trait the adapter core calls into:
//!
//! - [`types`] — discovered tests and test results. The backend serializes
//!   these with PascalCase field names (e.g. `FullyQualifiedName`).
//! - [`workspace`] — workspace metadata in its two project-system shapes
//!   (`DotNet` and `MsBuild`).
//! - [`events`] — the asynchronous events the backend emits.
//! - [`backend`] — the discover/run/debug call surface.
//!
//! Process management and the underlying RPC transport are deliberately out
//! of scope; hosts provide a [`TestBackend`] implementation bound to whatever
//! transport they use.

pub mod backend;
pub mod events;
pub mod types;
pub mod workspace;

pub use backend::{BackendError, TestBackend, MSTEST_FRAMEWORK};
pub use events::BackendEvent;
pub use types::{TestInfo, TestOutcome, TestResult};
pub use workspace::WorkspaceInformation;
