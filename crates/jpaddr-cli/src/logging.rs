use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "jpaddr_core=info,jpaddr_cli=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Without `trace_dir`, human-readable lines go to stderr. With it, JSON
/// lines are appended to `<trace_dir>/jpaddr-trace.jsonl`; keep the returned
/// guard alive until exit so buffered lines are flushed. A second call is a
/// no-op.
pub fn init_tracing(trace_dir: Option<&Path>) -> Option<WorkerGuard> {
    match trace_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "jpaddr-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_env_filter(env_filter())
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(env_filter())
                .try_init();
            None
        }
    }
}
