//! shardroute, the INSERT planner CLI.

use std::process::ExitCode;

use clap::Parser;
use shardroute::cli::{configcheck, Cli, Commands, PlanCli};
use shardroute::logger::logger;
use shardroute::{Error, VSchema};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    logger(args.log_json);

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode, Error> {
    let vschema = VSchema::load(&args.vschema)?;

    match args.command {
        Commands::Configcheck => {
            configcheck(&vschema);
            info!("\"{}\" is valid", args.vschema.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Plan { file, pretty } => {
            let outcomes = PlanCli::new(&file).await?.run(&vschema);
            let failed = outcomes.iter().filter(|outcome| outcome.is_error()).count();

            let output = if pretty {
                serde_json::to_string_pretty(&outcomes)?
            } else {
                serde_json::to_string(&outcomes)?
            };
            println!("{}", output);

            if failed > 0 {
                error!("{} of {} statements failed to plan", failed, outcomes.len());
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
