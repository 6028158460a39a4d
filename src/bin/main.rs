use std::error::Error;

use chrono::Utc;
use clap::Parser;
use simple_jwt::commands::build_token::BuildTokenCommand;
use simple_jwt::parameters::{
    Commands, OutputTokenFormat, create_request_for_token_build, select_algorithm,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "simple-jwt-cli")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::BuildToken(args) => {
            let now = Utc::now();
            let request = create_request_for_token_build(&args, now)?;
            let output = BuildTokenCommand::at(
                now,
                args.token_type.clone(),
                select_algorithm(&args.algorithm),
            )
            .build_token(request)?;
            match args.output_token_format {
                OutputTokenFormat::Plain => {
                    println!("{}", output.token);
                }
                OutputTokenFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(())
        }
    }
}
