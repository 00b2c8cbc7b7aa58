// Configuration: TOML-backed settings and the color palette.

pub mod palette;
pub mod types;
