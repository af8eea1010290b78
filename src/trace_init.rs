use std::path::Path;

/// JSON-lines log written under the directory passed to `init_tracing`.
pub const TRACE_FILE_NAME: &str = "tagcomplete-trace.jsonl";

/// Filter used when `RUST_LOG` is unset.
#[cfg_attr(not(feature = "trace"), allow(dead_code))]
const DEFAULT_FILTER: &str = "tagcomplete=debug,tag_core=debug";

/// Route engine spans and events to `log_dir/tagcomplete-trace.jsonl`.
///
/// Returns whether this process now logs to that file. Only the first call
/// installs a subscriber; if the host already set a global subscriber the
/// engine's events go there instead and this returns `false`. Without the
/// `trace` feature nothing is installed.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    use std::sync::OnceLock;

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INSTALLED: OnceLock<bool> = OnceLock::new();
    *INSTALLED.get_or_init(|| {
        let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .is_ok();
        if installed {
            // flushes on drop; must outlive every log call
            std::mem::forget(guard);
        }
        installed
    })
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> bool {
    false
}
