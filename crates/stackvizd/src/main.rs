use anyhow::Result;
use clap::Parser;
use stackvizd::ServerConfig;

#[derive(Parser)]
#[command(name = "stackvizd")]
#[command(about = "Bracket validation service speaking framed JSON over stdio", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,
}

fn main() -> Result<()> {
    // stdout carries protocol frames; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    stackvizd::run_stdio_session(cli.config)
}
