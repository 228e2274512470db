use clap::Parser;

use orderlens::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run::execute(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
