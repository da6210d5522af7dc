use std::process::ExitCode;

use clap::Parser;
use grayharvest::cli::CliOptions;
use grayharvest::config::{Config, setup_logging};
use grayharvest::pipeline::run;
use grayharvest::transport::UreqTransport;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = match CliOptions::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // usage errors exit 1, not clap's 2
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let _ = setup_logging(cli.debug);

    let config = Config::from(&cli);
    let transport = UreqTransport::new(config.probe_timeout);

    match run(&config, &transport, cli.count) {
        Ok(summary) => {
            info!(
                "Done: {} URLs found, {} downloaded, {} converted",
                summary.harvest.urls.len(),
                summary.downloaded,
                summary.converted
            );
            if summary.harvest.shortfall() > 0 {
                warn!(
                    "{} of {} requested images could not be found",
                    summary.harvest.shortfall(),
                    cli.count
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
