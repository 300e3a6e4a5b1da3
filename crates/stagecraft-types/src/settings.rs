use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of one exported build setting.
///
/// The build executor consumes settings as an open mapping; values are
/// either scalar strings (CFLAGS, CHOST) or ordered lists of feature tags
/// (HOSTUSE). Untagged so the exported mapping serializes to plain JSON
/// strings and arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Scalar option such as `CFLAGS` or `CHOST`.
    Str(String),
    /// Ordered list of feature tags such as `HOSTUSE`.
    List(Vec<String>),
}

/// Toolchain configuration for one buildable target.
///
/// Fixed schema rather than an open string-keyed map: every profile carries
/// all four settings, and missing keys are a compile error instead of a
/// runtime surprise. [`BuildSettings::to_map`] renders the open mapping the
/// build executor expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Command used to enter the build root.
    pub chroot: String,

    /// Compiler optimization and tuning flags.
    pub cflags: String,

    /// Canonical target triple for the toolchain.
    pub chost: String,

    /// Ordered CPU instruction-set feature tags. Order is significant and
    /// preserved verbatim in the exported mapping.
    pub hostuse: Vec<String>,
}

impl BuildSettings {
    /// Render the settings mapping consumed verbatim by the build executor.
    ///
    /// Keys are the conventional upper-case option names: `CHROOT`,
    /// `CFLAGS`, `CHOST`, `HOSTUSE`.
    pub fn to_map(&self) -> BTreeMap<String, SettingValue> {
        BTreeMap::from([
            ("CHROOT".to_string(), SettingValue::Str(self.chroot.clone())),
            ("CFLAGS".to_string(), SettingValue::Str(self.cflags.clone())),
            ("CHOST".to_string(), SettingValue::Str(self.chost.clone())),
            (
                "HOSTUSE".to_string(),
                SettingValue::List(self.hostuse.clone()),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildSettings {
        BuildSettings {
            chroot: "chroot".to_string(),
            cflags: "-O2 -pipe".to_string(),
            chost: "x86_64-pc-linux-gnu".to_string(),
            hostuse: vec!["mmx".to_string(), "sse".to_string()],
        }
    }

    #[test]
    fn map_carries_all_four_keys() {
        let map = sample().to_map();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["CFLAGS", "CHOST", "CHROOT", "HOSTUSE"]);
    }

    #[test]
    fn map_serializes_scalars_and_lists() {
        let json = serde_json::to_value(sample().to_map()).unwrap();
        assert_eq!(json["CFLAGS"], "-O2 -pipe");
        assert_eq!(json["HOSTUSE"], serde_json::json!(["mmx", "sse"]));
    }

    #[test]
    fn hostuse_order_is_preserved() {
        let map = sample().to_map();
        assert_eq!(
            map["HOSTUSE"],
            SettingValue::List(vec!["mmx".to_string(), "sse".to_string()])
        );
    }
}
