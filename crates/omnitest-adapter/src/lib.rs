//! Core of a .NET test-explorer adapter.
//!
//! The adapter bridges a host IDE's generic test-explorer contract and an
//! OmniSharp-style test backend (see `omnitest-protocol`). It keeps a
//! three-level test hierarchy (project → class → method) synchronized with
//! the backend's view of the workspace and translates between the two
//! identifier worlds:
//!
//! - UI nodes carry opaque colon-composed ids (`Foo`, `Foo:CalculatorTests`,
//!   `Foo:CalculatorTests:Foo.Tests.CalculatorTests.Adds`); the level of an
//!   id is its colon count.
//! - The backend identifies methods by fully-qualified name only.
//!
//! [`TestExplorerAdapter`] owns the synchronization cycle: workspace updates
//! rebuild the known-project set, build-completion triggers re-discover tests
//! for projects whose build outputs changed on disk, and backend result
//! events are correlated back to UI node ids and republished as state events.
//!
//! All intake goes through a single [`events::AdapterEvent`] queue (see
//! [`TestExplorerAdapter::drive`]), so refresh cycles never interleave and
//! start/result ordering is preserved.

pub mod config;
pub mod controller;
pub mod events;
pub mod hierarchy;
pub mod identity;
pub mod model;
mod staleness;

pub use config::{AdapterConfig, ProjectFilter};
pub use controller::{AdapterChannels, TestExplorerAdapter};
pub use events::{AdapterEvent, TaskCategory, TestLoadEvent, TestRunEvent, TestState};
pub use identity::TestIndex;
pub use model::{ClassNode, MethodNode, Project, ProjectNode, SuiteNode};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend error: {0}")]
    Backend(#[from] omnitest_protocol::BackendError),
    #[error("invalid project filter: {0}")]
    Filter(#[from] globset::Error),
    #[error("test run cancellation is not implemented")]
    CancellationUnsupported,
}

pub type Result<T> = std::result::Result<T, AdapterError>;
