//! Plan loading: TOML format, parsing, validation.

pub mod parser;
pub mod toml_format;
pub mod validate;

pub use parser::{
    PlanParseError, assemble_plan, parse_manifest, parse_phase_toml, parse_plan_sources,
};
pub use toml_format::{MANIFEST_FILE, ManifestMeta, ManifestToml};
pub use validate::{PlanValidationError, format_duration, validate_plan};
