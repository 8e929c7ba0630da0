use env_logger::Env;
use log::{error, info};
use spoolq::{
    shared::{
        broker::AmqpBroker,
        config::Config,
        error::SpoolqError,
        trigger::FixedDelay,
    },
    features::pipeline::Pipeline,
};
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    tokio::select! {
        result = run() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(SpoolqError::Config(e)) => {
                error!("Failed to load configuration: {}", e);
                ExitCode::from(2)
            }
            Err(e) => {
                error!("Stopping: {}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
            ExitCode::SUCCESS
        }
    }
}

async fn run() -> Result<(), SpoolqError> {
    let config = Config::from_env()?;

    info!(
        "Polling {} every {}s for *{} files, moving them to {}",
        config.source_dir.display(),
        config.poll_interval_secs,
        config.suffix,
        config.target_dir.display()
    );
    info!(
        "Publishing lines to queue {} at {}",
        config.broker.queue,
        config.broker.redacted_url()
    );

    let broker = AmqpBroker::new(config.broker.url.clone());
    let mut pipeline = Pipeline::new(&config, broker, io::stdout().lock());
    let mut trigger = FixedDelay::new(config.poll_interval());

    pipeline.run(&mut trigger, config.on_fs_error).await?;
    Ok(())
}
