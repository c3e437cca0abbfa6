//! Feature and dependency convention checks for the package manifest.
//!
//! The package declares one feature and four optional dependencies per
//! supported arrow version. Those declarations are maintained by hand (or by
//! the version bump), so [`validate`] compares them against the version lists
//! the task runner is configured with.

pub mod error;
pub mod model;
pub mod validate;
pub mod versions;

pub use error::{Error, Result, ValidationError};
pub use model::{CargoManifest, Dependency, DependencyDetail, Target};
pub use validate::{ARROW_COMPONENTS, Convention, check_manifest, validate};
pub use versions::{DefaultFeatureSet, FeatureFamily, VersionList};
