/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line summary printed by `--version`.
    pub fn summary(&self) -> String {
        format!(
            "commit_inquiry {} ({} {}, {} {}, {})",
            self.version, self.git_hash, self.git_status, self.target, self.profile, self.rustc
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("COMMIT_INQUIRY_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("COMMIT_INQUIRY_BUILD_STATUS").unwrap_or("unknown"),
        target: option_env!("COMMIT_INQUIRY_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("COMMIT_INQUIRY_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("COMMIT_INQUIRY_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
