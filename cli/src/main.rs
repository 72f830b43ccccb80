use clap::Parser;
use prospector_cli::app::{self, AppContext};
use prospector_cli::commands::{self, cli};
use prospector_core::api::{AppConfig, CliError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

fn main() {
    let exit = match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            app::exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg =
        prospector_core::config::load_default().map_err(|e| CliError::Config(format!("{e:#}")))?;
    init_tracing(&cfg).map_err(CliError::Config)?;

    let ctx = AppContext::new(cfg, &args);
    tracing::debug!(
        working_set = %ctx.working_set().display(),
        variant = %ctx.cfg().workflow.variant,
        "cli started"
    );

    commands::dispatch(args.command, &ctx)
}

/// Console and/or daily log file, as configured in `[logging]`.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(cfg: &AppConfig) -> Result<(), String> {
    let logging = &cfg.logging;
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging enabled but both console and file output are off".to_string());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level)
            .map_err(|e| format!("invalid logging level '{}': {e}", logging.level))?,
    };

    let file_writer = if logging.file {
        let dir = cfg.log_directory();
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("create log dir {} failed: {e}", dir.display()))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "prospector.log"));
        let _ = LOG_GUARD.set(guard);
        Some(writer)
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });
    let file_layer = file_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
