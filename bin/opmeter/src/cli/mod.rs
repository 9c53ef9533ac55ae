// This file is part of Opmeter.
//
// Opmeter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Opmeter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Opmeter.
// If not, see https://www.gnu.org/licenses/.

use std::{path::PathBuf, time::Duration};

use alloy_primitives::Address;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use opmeter_bench::{
    fund_accounts, provision, run_measurement, FundSettings, MeasureMode, MeasureSettings,
    MeasurementOutcome, RunContext,
};
use opmeter_provider::{new_bundler_provider, BundlerProvider};
use opmeter_types::{
    Account, FUNDING_VALUE, MEASUREMENT_RECIPIENT, MEASUREMENT_VALUE, SIMPLE_7702_DELEGATE,
};

mod tracing;

/// Main entry point for the CLI
///
/// Parses the CLI arguments and runs the selected flow to completion.
pub async fn run() -> anyhow::Result<()> {
    let opt = Cli::parse();
    let _guard = tracing::configure_logging(&opt.logs)?;
    tracing::info!("bundler endpoint: {}", opt.common.bundler_url);

    let provider = new_bundler_provider(&opt.common.bundler_url)?;

    match opt.command {
        Command::SetupAccounts(args) => setup_accounts(&provider, args, &opt.common).await,
        Command::MeasureReceipt(args) => {
            measure(&provider, args, MeasureMode::Receipt, &opt.common).await
        }
        Command::MeasureP2pPropagation(args) => {
            measure(&provider, args, MeasureMode::P2pPropagation, &opt.common).await
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "opmeter", about = "User operation submission latency benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    logs: LogsArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Provision disposable accounts and fund them from the owner key
    SetupAccounts(SetupArgs),
    /// Measure time from mempool acceptance to on-chain inclusion
    MeasureReceipt(MeasureArgs),
    /// Measure time for operations to become visible on a second bundler
    MeasureP2pPropagation(MeasureArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Bundler RPC endpoint operations are submitted to
    #[arg(long = "bundler_url", env = "BUNDLER_URL")]
    bundler_url: String,

    /// Chain id of the target network
    #[arg(long = "chain_id", env = "CHAIN_ID", default_value = "10")]
    chain_id: u64,

    /// Implementation contract installed on 7702 smart accounts
    #[arg(long = "delegate", env = "DELEGATE_ADDRESS", default_value_t = SIMPLE_7702_DELEGATE)]
    delegate: Address,
}

#[derive(Debug, Args)]
struct SetupArgs {
    /// Private key of the owner funding the new accounts
    #[arg(long = "private_key", env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Number of accounts to provision
    #[arg(long = "count", env = "NUMBER_OF_ACCOUNTS", default_value = "2")]
    count: usize,

    /// Directory receiving the key output artifact
    #[arg(long = "output_dir", env = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Debug, Args)]
struct MeasureArgs {
    /// Comma-separated owner private keys, one operation per key
    #[arg(
        long = "accounts",
        env = "ACCOUNTS",
        value_delimiter = ',',
        hide_env_values = true
    )]
    accounts: Vec<String>,

    /// Endpoint of the bundler observed for propagation; defaults to the
    /// submitting bundler
    #[arg(long = "observer_url", env = "OBSERVER_BUNDLER_URL")]
    observer_url: Option<String>,
}

#[derive(Debug, Args)]
struct LogsArgs {
    /// Log file. If not provided, logs to stdout
    #[arg(long = "log.file", env = "LOG_FILE")]
    file: Option<String>,

    /// Log in JSON format
    #[arg(long = "log.json", env = "LOG_JSON", default_value = "false")]
    json: bool,
}

async fn setup_accounts<P: BundlerProvider>(
    provider: &P,
    args: SetupArgs,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    anyhow::ensure!(args.count >= 1, "account count must be at least 1");
    let owner =
        opmeter_signer::parse_account(&args.private_key).context("invalid owner private key")?;

    let ctx = RunContext::new(&args.output_dir);
    let accounts = provision(&ctx, args.count)?;

    let settings = FundSettings {
        chain_id: common.chain_id,
        delegate: common.delegate,
        funding_value: FUNDING_VALUE,
    };
    fund_accounts(provider, &owner, &accounts, &settings).await
}

async fn measure<P: BundlerProvider>(
    provider: &P,
    args: MeasureArgs,
    mode: MeasureMode,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    anyhow::ensure!(!args.accounts.is_empty(), "at least one owner key is required");
    let owners = args
        .accounts
        .iter()
        .map(|key| opmeter_signer::parse_account(key))
        .collect::<Result<Vec<Account>, _>>()
        .context("invalid owner key in accounts list")?;

    // A distinct client instance, possibly pointed at a different node, so
    // propagation checks never hit the submitting bundler's local view.
    let observer_url = args.observer_url.as_deref().unwrap_or(&common.bundler_url);
    let observer = new_bundler_provider(observer_url)?;

    let settings = MeasureSettings {
        chain_id: common.chain_id,
        delegate: common.delegate,
        recipient: MEASUREMENT_RECIPIENT,
        value: MEASUREMENT_VALUE,
    };
    let outcomes = run_measurement(provider, &observer, &owners, mode, &settings).await?;
    log_summary(&outcomes);
    Ok(())
}

fn log_summary(outcomes: &[MeasurementOutcome]) {
    if outcomes.is_empty() {
        return;
    }

    let submit_avg =
        outcomes.iter().map(|o| o.submit_latency).sum::<Duration>() / outcomes.len() as u32;
    let observed: Vec<Duration> = outcomes.iter().filter_map(|o| o.poll_latency).collect();
    let timeouts = outcomes.len() - observed.len();
    tracing::info!(
        "measured {} operations: average submit latency {submit_avg:?}, {timeouts} timed out",
        outcomes.len()
    );
    if !observed.is_empty() {
        let poll_avg = observed.iter().sum::<Duration>() / observed.len() as u32;
        tracing::info!(
            "average checkpoint latency over {} observed operations: {poll_avg:?}",
            observed.len()
        );
    }
}
