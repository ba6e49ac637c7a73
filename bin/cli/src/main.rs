use nodefit_cli::run;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries only the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(request_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: nodefit <request.json>");
        return ExitCode::from(2);
    };

    match run(&request_path).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "compatibility analysis failed");
            ExitCode::FAILURE
        }
    }
}
