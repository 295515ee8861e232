//! Command line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::authn::credential::SecretSource;
use crate::deploy::{DeploymentRequest, DeploymentResult, PolicyFailureMode, ServiceDeployer, Visibility};
use crate::cloud::session::CloudSessionFactory;
use crate::logs::{init_logging, LogLevel, LogOptions};
use crate::settings::{Settings, CONFIG_ENV_VAR};
use crate::utils::version_info;

/// Deploy container images to Cloud Run
///
/// The credential needs the Editor, Service Account Token Creator and Cloud Run
/// Admin roles on the target project.
#[derive(Debug, Parser)]
#[command(name = "rundeploy", version, about, long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Log level (overrides the settings file)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Print the deployment result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy an image as a new, publicly invokable service
    CreateService(CreateArgs),
    /// Deploy an image to an existing service
    UpdateService(UpdateArgs),
    /// Print version information
    Version,
}

/// Arguments shared by create and update
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Google Cloud project id
    #[arg(long)]
    pub project: String,

    /// Region, e.g. us-central1
    #[arg(long)]
    pub location: String,

    /// Container image reference
    #[arg(long)]
    pub image: String,

    /// Port the container listens on
    #[arg(long)]
    pub http_port: i32,

    /// Service account key reference: env:NAME or file:PATH
    #[arg(long, default_value = "env:GOOGLE_CREDENTIAL")]
    pub credential: SecretSource,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Do not grant public invoke permission
    #[arg(long, conflicts_with = "rollback_on_policy_failure")]
    pub private: bool,

    /// Delete the new service if it cannot be made public
    #[arg(long)]
    pub rollback_on_policy_failure: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Id of the existing service
    #[arg(long)]
    pub service: String,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Also grant public invoke permission
    #[arg(long)]
    pub make_public: bool,
}

impl Cli {
    /// Run the selected command
    pub async fn execute(self) -> Result<()> {
        let (target, service_id, visibility, rollback) = match self.command {
            Command::Version => {
                println!("{}", serde_json::to_string_pretty(&version_info())?);
                return Ok(());
            }
            Command::CreateService(args) => {
                let visibility = if args.private {
                    Visibility::Unchanged
                } else {
                    Visibility::Public
                };
                (args.target, None, visibility, args.rollback_on_policy_failure)
            }
            Command::UpdateService(args) => {
                let visibility = if args.make_public {
                    Visibility::Public
                } else {
                    Visibility::Unchanged
                };
                (args.target, Some(args.service), visibility, false)
            }
        };

        let mut settings = Settings::load(self.config.as_deref()).await?;
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
        if rollback {
            settings.policy_failure = PolicyFailureMode::DeleteService;
        }

        let log_options = LogOptions {
            log_level: settings.log_level,
            json_format: settings.json_logs,
        };
        if let Err(e) = init_logging(log_options) {
            eprintln!("Failed to initialize logging: {e}");
        }
        debug!("Settings: {:?}", settings);

        let credential = target
            .credential
            .resolve()
            .await
            .with_context(|| format!("Unable to resolve credential from {}", target.credential))?;

        let request = match service_id {
            Some(service_id) => DeploymentRequest::update(
                target.project,
                target.location,
                service_id,
                target.image,
                target.http_port,
                credential,
            ),
            None => DeploymentRequest::create(
                target.project,
                target.location,
                target.image,
                target.http_port,
                credential,
            ),
        }
        .with_visibility(visibility);

        let policy_failure = settings.policy_failure;
        let deployer = ServiceDeployer::new(CloudSessionFactory::new(settings))
            .with_policy_failure(policy_failure);
        let result = deployer.deploy(&request).await?;

        print_result(&result, self.json)
    }
}

/// The single line a failed run reports on stderr
pub fn error_line(err: &anyhow::Error) -> String {
    format!("{} {:#}", "error:".red().bold(), err)
}

fn print_result(result: &DeploymentResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        eprintln!(
            "{} {}",
            "Deployed".green().bold(),
            result.resource_name.bold()
        );
        println!("{}", result.uri);
    }
    Ok(())
}
