use std::process::ExitCode;

use console::style;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dspdfviewer::constants::{exit, paths};
use dspdfviewer::{ConfigLoader, Resolution, ResolvedConfiguration, resolve};

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n{}", style("━━━ PANIC ━━━").red().bold());
        eprintln!("{}", style("dspdfviewer encountered an unexpected error:").red());
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "{}",
                style(format!(
                    "Location: {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                ))
                .dim()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let home = std::env::var_os(paths::HOME_ENV);
    let config_file = ConfigLoader::read_user_config(home.as_deref());

    let config = match resolve(std::env::args_os().skip(1), config_file.as_deref()) {
        Ok(Resolution::Configured(config)) => config,
        Ok(Resolution::Informational(request)) => {
            println!("{}", request.text);
            return Ok(ExitCode::from(exit::INFORMATIONAL));
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red(), e);
            return Ok(ExitCode::from(e.exit_code()));
        }
    };

    if let Err(e) = config.document_path() {
        eprintln!("{} {}", style("Error:").red(), e);
        return Ok(ExitCode::from(exit::NO_DOCUMENT));
    }

    report(&config)?;
    Ok(ExitCode::SUCCESS)
}

/// Print the effective configuration for the rendering side to pick up
fn report(config: &ResolvedConfiguration) -> anyhow::Result<()> {
    if let Ok(path) = config.document_path() {
        info!("Presenting {}", path.display());
    }
    if config.i3_workaround() {
        debug!("i3 workaround shellcode: {}", config.i3_workaround_shellcode());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
