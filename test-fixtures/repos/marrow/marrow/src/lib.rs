//! Minimalist Arrow interop.

pub mod impl_arrow;

/// The arrow release enabled by the default feature set.
// arrow-version:replace: pub const DEFAULT_ARROW_VERSION: &str = "{version}";
pub const DEFAULT_ARROW_VERSION: &str = "53";
