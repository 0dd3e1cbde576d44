//! Simulator configuration.
//!
//! Loaded from a TOML file; every field carries a default so a partial file
//! (or none at all) works. The forwarding mode lives here rather than on
//! the command line: it selects between the two hazard-handling strategies
//! and also picks the output file suffix.

use serde::Deserialize;
use std::fs;
use std::process;

const DEFAULT_DATA_MEM_BYTES: usize = 1024;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Operand forwarding; disabling it falls back to pure stalling.
    #[serde(default = "default_forwarding")]
    pub forwarding: bool,

    /// Per-stage logging to stderr plus the terminal trace table.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            forwarding: true,
            trace_instructions: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    /// Size of the byte-addressed data memory.
    #[serde(default = "default_data_mem")]
    pub data_mem_bytes: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_mem_bytes: DEFAULT_DATA_MEM_BYTES,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Also emit the trace grid as CSV next to the text output.
    #[serde(default)]
    pub csv: bool,
}

fn default_forwarding() -> bool {
    true
}

fn default_data_mem() -> usize {
    DEFAULT_DATA_MEM_BYTES
}

impl Config {
    /// Reads and parses a configuration file, exiting with a diagnostic on
    /// failure.
    pub fn load(path: &str) -> Self {
        let text = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: could not read config '{}': {}", path, e);
            process::exit(1);
        });
        toml::from_str(&text).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: could not parse config '{}': {}", path, e);
            process::exit(1);
        })
    }
}
