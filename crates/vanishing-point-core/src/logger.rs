//! Stderr logging for the CLI and small tools.
//!
//! Lines look like `   12.4ms INFO  estimator: vanishing point at ...`: the
//! time since the logger was installed, the level and the module that
//! emitted the record (crate prefix stripped). With the `tracing` feature,
//! [`init_tracing`] installs a `tracing-subscriber` formatter instead.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

static LOGGER: StderrLogger = StderrLogger;
static STARTED: OnceLock<Instant> = OnceLock::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Level filtering is left to `log::max_level`, so re-initialising only
/// moves the global filter.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = STARTED.get().map(Instant::elapsed).unwrap_or_default();
        let _ = render(&mut std::io::stderr().lock(), elapsed, record);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// `vanishing_point_estimator::estimator` -> `estimator`; bare crate
/// targets are kept as they are.
fn short_target(target: &str) -> &str {
    target.split_once("::").map_or(target, |(_, rest)| rest)
}

fn render(out: &mut impl Write, elapsed: Duration, record: &Record) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>9.1}ms {:<5} {}: {}",
        elapsed.as_secs_f64() * 1e3,
        record.level(),
        short_target(record.target()),
        record.args()
    )
}

/// Install the stderr logger and set the global level filter.
///
/// The first call installs the logger and fails if another logger is
/// already registered. Later calls only change the level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if !INSTALLED.swap(true, Ordering::SeqCst) {
        STARTED.get_or_init(Instant::now);
        if let Err(err) = log::set_logger(&LOGGER) {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(err);
        }
    }
    log::set_max_level(level);
    Ok(())
}

#[cfg(feature = "tracing")]
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a `tracing` subscriber on stderr, filtered by `RUST_LOG`
/// (default `info`). Span close events carry their busy/idle timings.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let base = fmt()
        .with_env_filter(env_filter())
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        base.json().flatten_event(true).finish().try_init()
    } else {
        base.with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn strips_the_crate_prefix() {
        assert_eq!(
            short_target("vanishing_point_estimator::estimator"),
            "estimator"
        );
        assert_eq!(short_target("vanishing_point::detect::io"), "detect::io");
        assert_eq!(short_target("vanishing_point"), "vanishing_point");
    }

    #[test]
    fn renders_elapsed_level_and_module() {
        let mut buf = Vec::new();
        render(
            &mut buf,
            Duration::from_micros(12_400),
            &Record::builder()
                .args(format_args!("found {} clusters", 3))
                .level(Level::Info)
                .target("vanishing_point_estimator::estimator")
                .build(),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "     12.4ms INFO  estimator: found 3 clusters\n"
        );
    }
}
