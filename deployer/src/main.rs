//! rundeploy - Entry Point
//!
//! Deploys a container image to Cloud Run and prints the service URL.
//!
//! examples:
//! rundeploy create-service --project myproject --location us-central1 --image docker.io/nginx --http-port 80 --credential env:GOOGLE_CREDENTIAL
//! rundeploy update-service --project myproject --location us-central1 --service myservice --image docker.io/httpd --http-port 80

use std::process::ExitCode;

use clap::Parser;

use rundeploy::cli::{error_line, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}
