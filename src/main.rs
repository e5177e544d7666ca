use clap::Parser;
use sigchain::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    sigchain::logging::init_logging(cli.verbose);
    run(cli)
}
