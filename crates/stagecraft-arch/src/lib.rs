//! CPU subarchitecture profiles for release builds.
//!
//! Maps user- or config-supplied subarch identifiers (`"k8"`, `"opteron"`,
//! `"nocona"`, ...) to immutable toolchain profiles, and classifies
//! platform-detected machine strings into architecture families. The
//! orchestrator feeds the resolved settings verbatim to the build executor.
//!
//! Registries are constructed once at startup for a concrete host
//! [`Toolchain`](stagecraft_types::Toolchain) and never mutated afterwards,
//! so they can be shared across threads without locking.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod families;
pub mod profile;
pub mod registry;

pub use error::ArchError;
pub use profile::SubarchProfile;
pub use registry::{ActivationGate, ArchRegistry, ArchRegistryBuilder};
