/// Component and workflow registries
///
/// - Record types (Component, Workflow) and the component patch
/// - Optional SQLite write-through storage with sqlx
/// - Generic registry: lock-free snapshot reads, one mutex per registry for writes

pub mod types;

pub mod storage;

#[allow(clippy::module_inception)]
pub mod registry;

pub use registry::{ComponentRegistry, Registry, RegistryError, WorkflowRegistry};
pub use storage::RegistryStorage;
pub use types::{Component, ComponentPatch, Stored, Workflow};
