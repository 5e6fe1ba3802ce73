//! Sourcewatch CLI - verify quoted primary sources against their archives.

use clap::Parser;
use sourcewatch_cli::{commands, exit_code, Cli, Command, Config, Formatter, EXIT_FATAL};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let code = match run(cli).await {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> sourcewatch_cli::Result<sourcewatch_domain::RunStatus> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, config, &formatter).await,
        Command::Status(args) => commands::execute_status(args, &config, &formatter),
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
