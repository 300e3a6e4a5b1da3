//! amd64 family: 64-bit x86 builders for Intel and AMD.

use semver::Version;

use stagecraft_types::{BuildSettings, Toolchain};

use crate::profile::SubarchProfile;
use crate::registry::{ActivationGate, ArchRegistry};

/// Raw machine strings that canonicalize to this family.
const MACHINES: [&str; 3] = ["x86_64", "amd64", "nocona"];

/// First gcc release with `-march` support for the reserved profiles.
fn gcc_4_3() -> Version {
    Version::new(4, 3, 0)
}

/// Family-wide defaults applied before each profile's own overrides.
///
/// Every amd64 builder enters the build root via plain `chroot` and targets
/// the family's canonical triple unless it overrides it. Compiler flags and
/// feature tags carry no family default; each concrete profile assigns its
/// own.
fn base() -> BuildSettings {
    BuildSettings {
        chroot: "chroot".to_string(),
        cflags: String::new(),
        chost: "x86_64-pc-linux-gnu".to_string(),
        hostuse: Vec::new(),
    }
}

fn hostuse(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| (*tag).to_string()).collect()
}

/// Generic 64-bit x86, Intel and AMD.
fn amd64() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -pipe".to_string();
    settings.chost = "x86_64-pc-linux-gnu".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2"]);
    SubarchProfile::new("amd64", "generic 64-bit x86, Intel and AMD", settings)
}

/// Intel Pentium 4 with 64-bit extensions, MMX, SSE, SSE2 and SSE3.
fn nocona() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -march=nocona -pipe".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2"]);
    SubarchProfile::new(
        "nocona",
        "Intel Pentium 4 with 64-bit extensions, MMX, SSE, SSE2 and SSE3",
        settings,
    )
}

/// Intel Core 2 with 64-bit extensions, MMX, SSE, SSE2, SSE3 and SSSE3.
fn core2() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -march=core2 -pipe".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2", "ssse3"]);
    SubarchProfile::new(
        "core2",
        "Intel Core 2 with 64-bit extensions, MMX, SSE, SSE2, SSE3 and SSSE3",
        settings,
    )
}

/// AMD K8: Opteron, Athlon 64 and Athlon FX.
fn k8() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -march=k8 -pipe".to_string();
    settings.chost = "x86_64-pc-linux-gnu".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2", "3dnow"]);
    SubarchProfile::new("k8", "AMD K8: Opteron, Athlon 64 and Athlon FX", settings)
}

/// AMD K8 revisions with SSE3 support.
fn k8_sse3() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -march=k8-sse3 -pipe".to_string();
    settings.chost = "x86_64-pc-linux-gnu".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2", "3dnow"]);
    SubarchProfile::new("k8-sse3", "AMD K8 revisions with SSE3 support", settings)
}

/// AMD Family 10h (Barcelona) CPUs.
fn amdfam10() -> SubarchProfile {
    let mut settings = base();
    settings.cflags = "-O2 -march=amdfam10 -pipe".to_string();
    settings.chost = "x86_64-pc-linux-gnu".to_string();
    settings.hostuse = hostuse(&["mmx", "sse", "sse2", "3dnow"]);
    SubarchProfile::new("amdfam10", "AMD Family 10h (Barcelona) CPUs", settings)
}

/// Build the amd64 family registry for the given host toolchain.
///
/// The reserved identifiers are real, tested profiles gated on gcc 4.3
/// `-march` support; they activate by constructing the registry with a new
/// enough toolchain, with no change to the table itself.
pub fn family(toolchain: &Toolchain) -> ArchRegistry {
    ArchRegistry::builder("amd64")
        .machines(MACHINES)
        .profile(&["amd64"], amd64())
        .profile(&["nocona"], nocona())
        .profile(&["k8", "opteron", "athlon64", "athlonfx"], k8())
        .gated(&["core2"], core2(), ActivationGate::MinGcc(gcc_4_3()))
        .gated(
            &["k8-sse3", "opteron-sse3", "athlon64-sse3"],
            k8_sse3(),
            ActivationGate::MinGcc(gcc_4_3()),
        )
        .gated(
            &["amdfam10", "barcelona"],
            amdfam10(),
            ActivationGate::MinGcc(gcc_4_3()),
        )
        .build(toolchain)
}

/// The amd64 registry under the baseline toolchain.
///
/// All version-gated entries stay reserved.
pub fn family_baseline() -> ArchRegistry {
    family(&Toolchain::baseline())
}
