use arena_reader::cli::commands::{cmd_classify, cmd_simulate};
use arena_reader::cli::config::{load_config, Cli, Commands};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve trace path: CLI > config > off
    let trace_path = cli.trace.as_deref().or(config.trace.path.as_deref());

    match cli.command {
        Commands::Simulate { scenario, output } => {
            let all_passed = cmd_simulate(&scenario, output.as_deref(), trace_path, cli.verbose)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Classify { dump } => {
            cmd_classify(&dump)?;
        }
    }

    Ok(())
}
