//! S3 infrastructure management commands.

mod bucket;
mod error;

pub use error::{Result, S3Error};

use crate::aws::AwsTarget;
use crate::prelude::*;

/// S3 infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct S3Command {
    #[command(subcommand)]
    pub action: S3Action,
}

/// Available S3 actions.
#[derive(Debug, clap::Subcommand)]
pub enum S3Action {
    /// Create the customer images bucket if it does not exist.
    Deploy(DeployCommand),
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the customer images bucket if it does not exist.

Environment variables:
  AWS_ENDPOINT_URL    - Use a local S3 emulator (e.g., http://localhost:4566)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Bucket name to use.
    #[arg(long, env = "CUSTOMER_IMAGES_BUCKET", default_value = "customer-images")]
    pub bucket: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for s3 command.
pub async fn run(command: S3Command, global: crate::Global) -> Result<()> {
    match command.action {
        S3Action::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let target = AwsTarget::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), target.display("S3"));
        aprintln!();
    }

    let client = bucket::create_client(&target).await;

    if bucket::bucket_exists(&client, &cmd.bucket).await? {
        if !global.is_silent() {
            print_plan("Deploy Plan:", &[format!("= Bucket '{}' exists", cmd.bucket)]);
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !global.is_silent() {
        print_plan(
            "Deploy Plan:",
            &[format!("+ Create bucket: {} ({})", cmd.bucket, target.region)],
        );
    }

    if !confirm(cmd.force, "Apply these changes?", true)? {
        return Err(S3Error::UserCancelled);
    }

    bucket::create_bucket(&client, &cmd.bucket, &target.region).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Bucket created successfully."));
    }

    Ok(())
}
