//! Core GPA domain: catalog, engine, custom subjects, sessions and reports

pub mod catalog;
pub mod custom;
pub mod engine;
pub mod exclusion;
pub mod models;
pub mod report;
pub mod session;
pub mod snapshot;

pub use catalog::{Catalog, LoadError};
pub use custom::{add_custom, ValidationError};
pub use engine::{compute, compute_filtered, DegreeMode, GpaResult, SubjectFilter};
pub use exclusion::is_excluded;
pub use session::{Session, SessionError};
pub use snapshot::{Snapshot, SnapshotError};
