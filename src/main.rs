use clap::Parser;
use noted::cli::commands::Cli;
use noted::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // No subcommand launches the TUI; both paths share data dir and logging setup
    if let Err(e) = handlers::dispatch(cli) {
        log::error!("event=exit status=error error={}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
