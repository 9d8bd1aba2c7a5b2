use clap::Parser;
use planner_lib::cli::Cli;
use planner_lib::utils::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = cli.run().await {
        // {:#} 展开完整的错误链
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
