//! Tracing bootstrap for hosts and the replay tool.

use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "info,chat_session=info,session_auth=info,session_timeline=info,auth_api=warn";
const DEBUG_FILTER: &str =
    "info,chat_session=debug,session_auth=debug,session_timeline=debug,auth_api=debug";

/// Install the global subscriber, writing to stderr.
///
/// Filter precedence: `RUST_LOG`, then `CHAT_SESSION_LOG`, then the built-in
/// default (raised to debug when `debug` is set). Calling this twice is a
/// no-op.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter_from_env(debug))
        .try_init();
}

fn filter_from_env(debug: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(filter) = env::var("CHAT_SESSION_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
    {
        return filter;
    }

    EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER })
}
