use std::fs::File;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Events go to stderr so stdout stays clean for effect output. Set
/// `SWIPESTACK_LOG` to a file path to also write a plain-text copy there;
/// the pid is appended so concurrent runs don't clobber each other.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    let file_layer = log_file().map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn log_file() -> Option<File> {
    let base = std::env::var("SWIPESTACK_LOG").ok()?;
    let path = format!("{}.{}", base, std::process::id());
    match File::create(&path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: Failed to create log file {}: {}", path, err);
            None
        }
    }
}
