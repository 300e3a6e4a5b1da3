//! Built-in architecture families.

pub mod amd64;

use tracing::debug;

use stagecraft_types::Toolchain;

use crate::registry::ArchRegistry;

/// Registries for every built-in family under the given toolchain.
pub fn builtin(toolchain: &Toolchain) -> Vec<ArchRegistry> {
    vec![amd64::family(toolchain)]
}

/// Find the family owning a platform-detected machine string.
///
/// Callers pick the family here, then resolve a user- or config-supplied
/// subarch identifier against the returned registry. The two lookups are
/// deliberately not chained: the machine string says which family applies,
/// not which subarch to build.
pub fn detect(machine: &str, toolchain: &Toolchain) -> Option<ArchRegistry> {
    let found = builtin(toolchain)
        .into_iter()
        .find(|family| family.matches_machine(machine));
    match &found {
        Some(family) => debug!(
            machine,
            family = family.family_name(),
            "canonicalized machine string"
        ),
        None => debug!(machine, "machine string matches no built-in family"),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_classifies_amd64_machines() {
        let toolchain = Toolchain::baseline();
        let family = detect("x86_64", &toolchain).unwrap();
        assert_eq!(family.family_name(), "amd64");
    }

    #[test]
    fn detect_rejects_foreign_machines() {
        let toolchain = Toolchain::baseline();
        assert!(detect("i386", &toolchain).is_none());
        assert!(detect("", &toolchain).is_none());
    }
}
