use thiserror::Error;

/// Errors from the subarch profile registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchError {
    /// The identifier is absent from the table, or defined but reserved for
    /// a newer toolchain. Lookups never fall back to another profile.
    #[error("unknown subarch profile: {0}")]
    UnknownProfile(String),
}
