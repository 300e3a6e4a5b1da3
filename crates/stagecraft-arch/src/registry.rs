//! Per-family registry mapping subarch identifiers to profiles.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use semver::Version;
use tracing::debug;

use stagecraft_types::Toolchain;

use crate::error::ArchError;
use crate::profile::SubarchProfile;

/// Condition under which a registry entry becomes resolvable.
///
/// Reserved profiles are real, tested definitions withheld pending a
/// toolchain capability; the gate is data, so enabling them is a
/// configuration change rather than a code change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivationGate {
    /// Entry is resolvable under any toolchain.
    Always,
    /// Entry stays reserved until the host toolchain carries at least this
    /// gcc version.
    MinGcc(Version),
}

impl ActivationGate {
    fn is_met(&self, toolchain: &Toolchain) -> bool {
        match self {
            ActivationGate::Always => true,
            ActivationGate::MinGcc(min) => toolchain.supports_gcc(min),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    profile: Arc<SubarchProfile>,
    active: bool,
}

/// Immutable identifier table for one architecture family.
///
/// Holds the family's subarch profiles, the aliases pointing at them, and
/// the machine canonicalization set. Constructed once at startup for a
/// concrete host toolchain; read-only afterwards, so it is safe to share
/// across concurrent readers without locking.
#[derive(Clone, Debug)]
pub struct ArchRegistry {
    family: &'static str,
    entries: BTreeMap<String, Entry>,
    machines: BTreeSet<String>,
}

impl ArchRegistry {
    /// Start assembling a registry for the named family.
    pub fn builder(family: &'static str) -> ArchRegistryBuilder {
        ArchRegistryBuilder {
            family,
            profiles: Vec::new(),
            machines: BTreeSet::new(),
        }
    }

    /// Name of the architecture family this registry serves.
    pub fn family_name(&self) -> &'static str {
        self.family
    }

    /// Look up a subarch identifier.
    ///
    /// Exact table lookup, no fuzzy matching. Identifiers that are present
    /// but reserved for a newer toolchain fail exactly like unknown ones.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<SubarchProfile>, ArchError> {
        match self.entries.get(identifier) {
            Some(entry) if entry.active => {
                debug!(
                    family = self.family,
                    identifier,
                    profile = %entry.profile.id,
                    "resolved subarch profile"
                );
                Ok(Arc::clone(&entry.profile))
            }
            Some(_) => {
                debug!(
                    family = self.family,
                    identifier, "subarch identifier reserved for a newer toolchain"
                );
                Err(ArchError::UnknownProfile(identifier.to_string()))
            }
            None => {
                debug!(family = self.family, identifier, "unknown subarch identifier");
                Err(ArchError::UnknownProfile(identifier.to_string()))
            }
        }
    }

    /// Whether a platform-detected machine string belongs to this family.
    ///
    /// Exact, case-sensitive membership test against the family's machine
    /// canonicalization set; independent of [`resolve`](Self::resolve).
    pub fn matches_machine(&self, machine: &str) -> bool {
        self.machines.contains(machine)
    }

    /// Whether an identifier is resolvable under this registry's toolchain.
    pub fn has(&self, identifier: &str) -> bool {
        self.entries
            .get(identifier)
            .is_some_and(|entry| entry.active)
    }

    /// Sorted identifiers resolvable under this registry's toolchain.
    pub fn list(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.active)
            .map(|(identifier, _)| identifier.as_str())
            .collect()
    }

    /// Sorted identifiers defined but reserved for a newer toolchain.
    pub fn list_reserved(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.active)
            .map(|(identifier, _)| identifier.as_str())
            .collect()
    }
}

/// Builder assembling a family registry before it is frozen.
pub struct ArchRegistryBuilder {
    family: &'static str,
    profiles: Vec<(Vec<String>, Arc<SubarchProfile>, ActivationGate)>,
    machines: BTreeSet<String>,
}

impl ArchRegistryBuilder {
    /// Declare the raw machine strings that canonicalize to this family.
    pub fn machines<I, S>(mut self, machines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.machines.extend(machines.into_iter().map(Into::into));
        self
    }

    /// Register a profile under one or more identifiers.
    pub fn profile(self, identifiers: &[&str], profile: SubarchProfile) -> Self {
        self.gated(identifiers, profile, ActivationGate::Always)
    }

    /// Register a profile whose identifiers stay reserved until the gate is
    /// met.
    pub fn gated(
        mut self,
        identifiers: &[&str],
        profile: SubarchProfile,
        gate: ActivationGate,
    ) -> Self {
        let identifiers = identifiers.iter().map(|s| (*s).to_string()).collect();
        self.profiles.push((identifiers, Arc::new(profile), gate));
        self
    }

    /// Freeze the registry for a concrete host toolchain.
    ///
    /// Entries whose gate the toolchain satisfies become active; the rest
    /// stay present-but-inactive and resolve as unknown.
    pub fn build(self, toolchain: &Toolchain) -> ArchRegistry {
        let mut entries = BTreeMap::new();
        for (identifiers, profile, gate) in self.profiles {
            let active = gate.is_met(toolchain);
            for identifier in identifiers {
                entries.insert(
                    identifier,
                    Entry {
                        profile: Arc::clone(&profile),
                        active,
                    },
                );
            }
        }

        let active = entries.values().filter(|entry| entry.active).count();
        debug!(
            family = self.family,
            entries = entries.len(),
            active,
            gcc = %toolchain.gcc,
            "constructed subarch registry"
        );

        ArchRegistry {
            family: self.family,
            entries,
            machines: self.machines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_types::BuildSettings;

    fn settings(cflags: &str) -> BuildSettings {
        BuildSettings {
            chroot: "chroot".to_string(),
            cflags: cflags.to_string(),
            chost: "test-triple".to_string(),
            hostuse: Vec::new(),
        }
    }

    fn registry(toolchain: &Toolchain) -> ArchRegistry {
        ArchRegistry::builder("testfam")
            .machines(["machine-a", "machine-b"])
            .profile(
                &["plain", "plain-alias"],
                SubarchProfile::new("plain", "always active", settings("-O2")),
            )
            .gated(
                &["future"],
                SubarchProfile::new("future", "needs newer gcc", settings("-O3")),
                ActivationGate::MinGcc(Version::new(9, 0, 0)),
            )
            .build(toolchain)
    }

    #[test]
    fn aliases_share_one_profile() {
        let registry = registry(&Toolchain::baseline());
        let direct = registry.resolve("plain").unwrap();
        let aliased = registry.resolve("plain-alias").unwrap();
        assert!(Arc::ptr_eq(&direct, &aliased));
    }

    #[test]
    fn gated_entry_resolves_as_unknown_until_met() {
        let registry = registry(&Toolchain::baseline());
        assert_eq!(
            registry.resolve("future"),
            Err(ArchError::UnknownProfile("future".to_string()))
        );
        assert_eq!(registry.list_reserved(), vec!["future"]);

        let registry = registry_with_gcc(9, 1);
        let profile = registry.resolve("future").unwrap();
        assert_eq!(profile.settings.cflags, "-O3");
        assert!(registry.list_reserved().is_empty());
    }

    fn registry_with_gcc(major: u64, minor: u64) -> ArchRegistry {
        registry(&Toolchain::new(Version::new(major, minor, 0)))
    }

    #[test]
    fn list_is_sorted_and_active_only() {
        let registry = registry(&Toolchain::baseline());
        assert_eq!(registry.list(), vec!["plain", "plain-alias"]);
        assert!(registry.has("plain"));
        assert!(!registry.has("future"));
        assert!(!registry.has("missing"));
    }

    #[test]
    fn machine_membership_is_exact() {
        let registry = registry(&Toolchain::baseline());
        assert!(registry.matches_machine("machine-a"));
        assert!(!registry.matches_machine("Machine-a"));
        assert!(!registry.matches_machine("machine-c"));
    }
}
