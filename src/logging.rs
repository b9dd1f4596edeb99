//! Console logging setup.
//!
//! Events go to stderr so stdout stays clean for tables and `--json` output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding an env-filter directive (`debug`, `finboard=trace`)
pub const LOG_ENV: &str = "FINBOARD_LOG";

/// Level used when neither the environment nor the config names one
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: environment first, then config, then the default
pub fn resolve_directive(env_value: Option<String>, config_level: Option<&str>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config_level.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(config_level: Option<&str>) {
    let directive = resolve_directive(std::env::var(LOG_ENV).ok(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let ansi = atty::is(atty::Stream::Stderr);

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}
