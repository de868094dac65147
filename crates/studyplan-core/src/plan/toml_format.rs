//! TOML format types for the plan manifest.
//!
//! A plan directory holds a `plan.toml` manifest plus one TOML file per
//! phase. Phase files deserialize straight into [`Phase`](crate::models::Phase);
//! the manifest maps to the types below.

use serde::{Deserialize, Serialize};

/// File name of the manifest inside a plan directory.
pub const MANIFEST_FILE: &str = "plan.toml";

/// Top-level structure of a `plan.toml` manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestToml {
    /// Plan metadata.
    pub plan: ManifestMeta,
}

/// Plan-level metadata in `[plan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestMeta {
    /// Human-readable plan title.
    pub title: String,
    /// Number of days the plan must cover.
    pub total_days: u32,
    /// Phase files in curriculum order, relative to the manifest's directory.
    pub phases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_manifest() {
        let toml_str = r#"
[plan]
title = "Mini plan"
total_days = 14
phases = ["phases/01-a.toml", "phases/02-b.toml"]
"#;
        let manifest: ManifestToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(manifest.plan.title, "Mini plan");
        assert_eq!(manifest.plan.total_days, 14);
        assert_eq!(manifest.plan.phases.len(), 2);
    }

    #[test]
    fn manifest_requires_total_days() {
        let toml_str = r#"
[plan]
title = "Mini plan"
phases = []
"#;
        let result: Result<ManifestToml, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn roundtrip_manifest() {
        let manifest = ManifestToml {
            plan: ManifestMeta {
                title: "Roundtrip".into(),
                total_days: 7,
                phases: vec!["phases/01-only.toml".into()],
            },
        };
        let text = toml::to_string_pretty(&manifest).expect("should serialize");
        let back: ManifestToml = toml::from_str(&text).expect("should parse back");
        assert_eq!(back, manifest);
    }
}
