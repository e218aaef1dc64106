mod config;
mod error;
mod gpio;
mod logging;
mod rest;
mod station;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{error, info, warn};

static TERMINATED: AtomicUsize = AtomicUsize::new(0);

#[tokio::main]
pub async fn main() -> std::process::ExitCode {
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    logging::init(config.log_level());

    // Claiming may retry with a blocking sleep
    let claim_config = config.clone();
    let output = match tokio::task::spawn_blocking(move || gpio::build_output(&claim_config)).await
    {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            error!("{}", e);
            return std::process::ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Claiming relay output failed: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    let station = station::ConcurrentStation::new(&config, output);
    let shutdown = register_sigint_handler();

    let server_res =
        rest::dispatch_server_daemon(station.clone(), config.bind_addr(), shutdown).await;
    if let Err(e) = station.release() {
        error!("{}", e);
    }

    match server_res {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("Webserver failed: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

/// First signal stops the server gracefully, a second one kills the process
fn register_sigint_handler() -> impl Future<Output = ()> + Send + 'static {
    let notify = Arc::new(Notify::new());
    let handler_notify = notify.clone();

    let res = ctrlc::set_handler(move || {
        let count = TERMINATED.fetch_add(1, Ordering::Relaxed);
        if count >= 1 {
            info!("Force killing");
            std::process::exit(1);
        }
        info!("Shutting down, releasing relay");
        handler_notify.notify_one();
    });
    if let Err(e) = res {
        warn!("Failed registering termination handler: {}", e);
    }

    async move { notify.notified().await }
}
