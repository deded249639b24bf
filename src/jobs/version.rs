//! A simple job reporting the CLI version.

/// Version command for the macforge CLI.
pub struct VersionJob;

impl VersionJob {
    /// Prints the crate version.
    pub fn invoke(&self) {
        println!("Macforge Version: {}", env!("CARGO_PKG_VERSION"));
    }
}
