use semver::Version;
use serde::{Deserialize, Serialize};

/// Description of the host toolchain a release build runs against.
///
/// Some subarch profiles are defined but withheld until the stable compiler
/// grows the required `-march` support; the registry compares their gate
/// against this record when it is constructed. Sourced from the
/// orchestrator's configuration, hence the serde derives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    /// Version of the C compiler available inside the build root.
    pub gcc: Version,
}

impl Toolchain {
    /// Toolchain with the given gcc version.
    pub fn new(gcc: Version) -> Self {
        Self { gcc }
    }

    /// The currently-assumed stable toolchain (gcc 4.1.2).
    ///
    /// Under this baseline every version-gated registry entry stays
    /// inactive.
    pub fn baseline() -> Self {
        Self {
            gcc: Version::new(4, 1, 2),
        }
    }

    /// Whether this toolchain satisfies a minimum gcc requirement.
    pub fn supports_gcc(&self, min: &Version) -> bool {
        self.gcc >= *min
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_predates_gcc_4_3() {
        let toolchain = Toolchain::baseline();
        assert!(!toolchain.supports_gcc(&Version::new(4, 3, 0)));
        assert!(toolchain.supports_gcc(&Version::new(4, 1, 0)));
    }

    #[test]
    fn newer_gcc_satisfies_gate() {
        let toolchain = Toolchain::new(Version::new(4, 3, 1));
        assert!(toolchain.supports_gcc(&Version::new(4, 3, 0)));
    }

    #[test]
    fn roundtrips_through_config_json() {
        let toolchain = Toolchain::new(Version::new(4, 3, 0));
        let json = serde_json::to_string(&toolchain).unwrap();
        let back: Toolchain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, toolchain);
    }
}
