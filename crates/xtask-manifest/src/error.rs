//! Error types for xtask-manifest

/// Result type for xtask-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or checking a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] xtask_fs::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A manifest declaration that diverges from the convention.
///
/// Sorted lists are reported so the expected and found values line up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {key} in manifest")]
    MissingKey { key: String },

    #[error("Invalid {label}. Expected: {expected:?}, found: {found:?}")]
    FeatureList {
        label: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Missing feature definition for {feature}")]
    MissingFeature { feature: String },

    #[error("Invalid feature definition for {feature}. Expected: {expected:?}, found: {found:?}")]
    FeatureDefinition {
        feature: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Missing dependency {name}")]
    MissingDependency { name: String },

    #[error("Invalid dependency {name}. Expected: {expected}, found: {found}")]
    InvalidDependency {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Default features for {name} not deactivated")]
    DefaultFeaturesEnabled { name: String },
}
