//! Scan and aggregate output
//!
//! - `config` - Output configuration types
//! - `streaming` - Line-per-entry formatter, colored on terminals
//! - `json` - JSON and JSON-lines output
//! - `utils` - Size and number formatting

mod config;
mod json;
mod streaming;
mod utils;

pub use config::OutputConfig;
pub use json::{print_json, write_json_line};
pub use streaming::EntryFormatter;
pub use utils::{format_number, format_size};
