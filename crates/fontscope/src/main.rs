use std::process::ExitCode;

use clap::Parser;
use fontscope::cli::{self, Cli};
use fontscope::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init(args.verbose);

    match cli::run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
