use anyhow::Result;
use clap::Parser;

use langmon::cli::Args;
use langmon::cli::commands::monitor::{self, MonitorOptions};
use langmon::{output, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(output::OutputConfig::with_quiet(args.quiet));
    telemetry::init(args.verbose);

    let options = MonitorOptions {
        file: args.file,
        language: args.language,
        model: args.model,
        voice: args.voice,
        no_audio: args.no_audio,
    };
    monitor::run_monitor(options).await
}
