//! Build-time configuration.
//!
//! `PUBLIC_URL` is the deployment base path (e.g. `/cards` when hosted under a
//! subdirectory). `SCRATCH_API_BASE` points at the platform API and defaults to
//! `/api` on the same origin. `SCRATCH_LOG` picks the console log level.
use log::LevelFilter;
use scratch_core::Endpoints;

const DEFAULT_API_BASE: &str = "/api";

fn public_url() -> &'static str {
    option_env!("PUBLIC_URL").unwrap_or("")
}

/// URL of a static asset under the deployment base path.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    join_base(public_url(), relative)
}

/// Router basename, `None` when the app is served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    non_empty_base(public_url())
}

/// Base URL every API request is built from.
#[must_use]
pub fn api_base() -> String {
    non_empty_base(option_env!("SCRATCH_API_BASE").unwrap_or(DEFAULT_API_BASE))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[must_use]
pub fn endpoints() -> Endpoints {
    Endpoints::new(&api_base())
}

#[must_use]
pub fn log_level() -> LevelFilter {
    parse_level(option_env!("SCRATCH_LOG").unwrap_or("info"))
}

/// Resolve an icon reference: absolute URLs pass through, bundled paths get
/// the deployment base.
#[must_use]
pub fn icon_src(icon: &str) -> String {
    if icon.starts_with("http://") || icon.starts_with("https://") || icon.starts_with("data:") {
        icon.to_string()
    } else {
        asset_path(icon)
    }
}

fn join_base(base: &str, relative: &str) -> String {
    let rel = relative.trim_start_matches('/');
    match non_empty_base(base) {
        Some(base) => format!("{base}/{rel}"),
        None => format!("/{rel}"),
    }
}

fn non_empty_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    (!base.is_empty()).then(|| base.to_string())
}

fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::Info)
}
