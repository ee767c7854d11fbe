use clap::Parser;
use revtrack::cli::Cli;

fn main() -> anyhow::Result<()> {
    revtrack::logging::init_tracing();
    let cli = Cli::parse();
    cli.run()
}
