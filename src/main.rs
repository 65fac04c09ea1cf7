use clap::Parser;
use tracing_subscriber::EnvFilter;

use gm_seqload::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr so reports on stdout stay machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("gm_seqload=debug,info")
    } else {
        EnvFilter::new("gm_seqload=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Load(args) => {
            cli::load::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Seqassoc(args) => {
            cli::seqassoc::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
