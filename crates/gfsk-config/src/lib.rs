//! Configuration layer for the GFSK baseband reference model
//!
//! Parameter structs with reference-design defaults, eager validation
//! against the configuration error taxonomy, and a TOML loader.

pub mod chain_config;
pub mod toml_config;

pub use chain_config::{ChainConfig, ModemConfig, ReceiverConfig};
pub use toml_config::{from_toml_file, from_toml_str};
