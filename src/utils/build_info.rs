/// Build metadata captured by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("BUDGET_VIEW_BUILD_HASH"),
        git_status: env!("BUDGET_VIEW_BUILD_STATUS"),
        timestamp: env!("BUDGET_VIEW_BUILD_TIMESTAMP"),
        target: env!("BUDGET_VIEW_BUILD_TARGET"),
        profile: env!("BUDGET_VIEW_BUILD_PROFILE"),
        rustc: env!("BUDGET_VIEW_BUILD_RUSTC"),
    }
}
