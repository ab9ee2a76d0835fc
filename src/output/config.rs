//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print base names instead of full paths.
    pub names_only: bool,
    /// Print sizes in human-readable units.
    pub human_sizes: bool,
}
