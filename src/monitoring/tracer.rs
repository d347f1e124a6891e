/*!
 * Structured Tracing
 * Subscriber for the spans and events emitted by area growth and swapping
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "VM_TRACE_JSON";

/// Filter used when RUST_LOG is unset
const DEFAULT_FILTER: &str = "paging_vm=info";

/// Install a subscriber for this crate's events
///
/// RUST_LOG overrides the default `paging_vm=info` filter; VM_TRACE_JSON
/// switches to JSON lines. `grow_area` and `swap_page` spans are reported
/// when they close, carrying the pid and request fields. Only the first call
/// installs anything.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = env_flag(TRACE_JSON_ENV);
    let layer = tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(layer.json().with_current_span(true)).try_init()
    } else {
        registry.with(layer.compact().with_target(false)).try_init()
    };

    if installed.is_ok() {
        info!(json, "VM tracing initialized");
    }
}

/// `"1"` or `"true"` enables a flag; anything else, or absence, disables it
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false)
}
