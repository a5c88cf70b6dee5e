//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use customers::storage::DynamoDbCustomerRepository;

use crate::aws::AwsTarget;
use crate::prelude::*;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the customers table.
    Deploy(DeployCommand),

    /// Insert demo customers.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the customers DynamoDB table.

By default, this command creates the customers table (keys pk/sk) together
with the Email-id-index Global Secondary Index, or adds the index to an
existing table that lacks it. Tables whose keys differ from the expected
schema are reported and left untouched.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, env = "CUSTOMERS_TABLE_NAME", default_value = "customers")]
    pub table_name: String,
}

/// Insert demo customers.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate demo customers and store them in DynamoDB.

Customers are written through the library repository, so they carry the
same attributes and timestamps as records written by the service.")]
pub struct SeedCommand {
    /// Number of customers to generate.
    #[arg(long, default_value = "10")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, env = "CUSTOMERS_TABLE_NAME", default_value = "customers")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let target = AwsTarget::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), target.display("DynamoDB"));
        aprintln!();
    }

    let dynamo_client = client::create_client(&target).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            print_plan("Destroy Plan:", &planning::format_destroy_plan(&plan));
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !confirm(
            cmd.force,
            "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
            false,
        )? {
            return Err(DynamodbError::UserCancelled);
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
        return Ok(());
    }

    let table_config = config::customers_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !global.is_silent() {
        print_plan("Deploy Plan:", &planning::format_deploy_plan(&plan));
    }

    match plan {
        planning::DeployPlan::NoChanges { .. } => {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }
        planning::DeployPlan::Incompatible { .. } => {
            // Fails without touching the table.
            return deploy::execute_deploy_plan(&dynamo_client, &plan).await;
        }
        _ => {}
    }

    if !confirm(cmd.force, "Apply these changes?", true)? {
        return Err(DynamodbError::UserCancelled);
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let target = AwsTarget::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), target.display("DynamoDB"));
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Customer count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&target).await;

    // Verify table exists
    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let customers = seed::generate_seed_customers(cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Customers to create:"));
        for customer in customers.iter().take(5) {
            aprintln!("  {} <{}>", customer.full_name, customer.email);
        }
        if customers.len() > 5 {
            aprintln!("  ... and {} more", customers.len() - 5);
        }
        aprintln!();
    }

    if !confirm(cmd.force, &format!("Insert {} customers?", customers.len()), true)? {
        return Err(DynamodbError::UserCancelled);
    }

    let repository = DynamoDbCustomerRepository::new(dynamo_client, &cmd.table_name);
    let inserted = seed::seed_customers(&repository, &customers).await?;

    if !global.is_silent() {
        aprintln!("{} {} customers inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
