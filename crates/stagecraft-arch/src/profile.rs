use serde::{Deserialize, Serialize};

use stagecraft_types::BuildSettings;

/// A named bundle of toolchain settings for one CPU target variant.
///
/// Profiles are value objects with no identity beyond their key. The
/// registry hands them out behind `Arc` because several identifiers may
/// alias one profile; callers must treat them as read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarchProfile {
    /// Unique key within the family registry.
    pub id: String,

    /// Human-readable summary of the CPU variant; no behavioral effect.
    pub description: String,

    /// Family defaults merged with this profile's overrides.
    pub settings: BuildSettings,
}

impl SubarchProfile {
    /// Freeze a profile from its merged settings.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        settings: BuildSettings,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            settings,
        }
    }
}
