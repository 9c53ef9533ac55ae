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

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use anyhow::Context;
use opmeter_provider::BundlerProvider;
use opmeter_types::{
    Account, Call, SmartAccount, MEASUREMENT_RECIPIENT, MEASUREMENT_VALUE, SIMPLE_7702_DELEGATE,
};
use tokio::time::Instant;

use crate::{poll_until, resolve_authorization, submit_operation, POLL_DEADLINE};

/// Which lifecycle checkpoint a measurement run records.
///
/// Fixed for the whole run, never per operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeasureMode {
    /// Poll the submitting bundler for a mined receipt: time from mempool
    /// acceptance to on-chain inclusion.
    Receipt,
    /// Poll a second bundler instance for operation visibility: time to
    /// propagate across nodes.
    P2pPropagation,
}

/// Settings for the measurement flow.
#[derive(Clone, Debug)]
pub struct MeasureSettings {
    /// Chain id authorizations are bound to.
    pub chain_id: u64,
    /// Delegate installed on each owner's smart account.
    pub delegate: Address,
    /// Recipient of every measurement transfer.
    pub recipient: Address,
    /// Wei sent per operation.
    pub value: U256,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            chain_id: 10,
            delegate: SIMPLE_7702_DELEGATE,
            recipient: MEASUREMENT_RECIPIENT,
            value: MEASUREMENT_VALUE,
        }
    }
}

/// Latency sample for one submitted operation.
#[derive(Clone, Debug)]
pub struct MeasurementOutcome {
    /// Owner the operation was sent for.
    pub owner: Address,
    /// Hash returned at submission.
    pub user_op_hash: B256,
    /// Time to build, estimate and submit the operation.
    pub submit_latency: Duration,
    /// Time from submission to the observed checkpoint; `None` on timeout.
    pub poll_latency: Option<Duration>,
    /// Inclusion transaction hash, where the checkpoint exposes one.
    pub transaction_hash: Option<B256>,
}

/// Submit one operation for `owner` and poll its checkpoint.
///
/// `observer` is the client polled in propagation mode; receipt mode polls
/// the submitting `provider` itself. Checkpoint polls use no inter-attempt
/// delay, as any pause would be indistinguishable from network latency in
/// the sample.
pub async fn measure_operation<P: BundlerProvider, O: BundlerProvider>(
    provider: &P,
    observer: &O,
    owner: &Account,
    mode: MeasureMode,
    settings: &MeasureSettings,
) -> anyhow::Result<MeasurementOutcome> {
    let smart_account = SmartAccount::for_owner(owner.address, settings.delegate);
    let authorization =
        resolve_authorization(provider, owner, &smart_account, settings.chain_id).await?;
    let call = Call {
        to: settings.recipient,
        value: settings.value,
    };

    let submit_start = Instant::now();
    let hash = submit_operation(
        provider,
        &smart_account,
        authorization.as_ref(),
        std::slice::from_ref(&call),
    )
    .await
    .context("failed to submit measurement operation")?;
    let submit_latency = submit_start.elapsed();
    tracing::info!(
        "operation {hash} for owner {} submitted in {submit_latency:?}",
        owner.address
    );

    let poll_start = Instant::now();
    let deadline = poll_start + POLL_DEADLINE;
    let (poll_latency, transaction_hash) = match mode {
        MeasureMode::Receipt => {
            match poll_until(
                || provider.get_user_operation_receipt(hash),
                deadline,
                Duration::ZERO,
            )
            .await
            {
                Some(receipt) => (
                    Some(poll_start.elapsed()),
                    Some(receipt.receipt.transaction_hash),
                ),
                None => (None, None),
            }
        }
        MeasureMode::P2pPropagation => {
            match poll_until(|| observer.get_user_operation(hash), deadline, Duration::ZERO).await
            {
                Some(status) => (Some(poll_start.elapsed()), status.transaction_hash),
                None => (None, None),
            }
        }
    };

    Ok(MeasurementOutcome {
        owner: owner.address,
        user_op_hash: hash,
        submit_latency,
        poll_latency,
        transaction_hash,
    })
}

/// Run the measurement flow over each owner key in turn, strictly
/// sequentially so samples never contend with each other.
pub async fn run_measurement<P: BundlerProvider, O: BundlerProvider>(
    provider: &P,
    observer: &O,
    owners: &[Account],
    mode: MeasureMode,
    settings: &MeasureSettings,
) -> anyhow::Result<Vec<MeasurementOutcome>> {
    let mut outcomes = Vec::with_capacity(owners.len());
    for owner in owners {
        let outcome = measure_operation(provider, observer, owner, mode, settings).await?;
        match (mode, outcome.poll_latency) {
            (MeasureMode::Receipt, Some(latency)) => tracing::info!(
                "operation {} mined in {latency:?} (tx {:?})",
                outcome.user_op_hash,
                outcome.transaction_hash
            ),
            (MeasureMode::P2pPropagation, Some(latency)) => tracing::info!(
                "operation {} propagated in {latency:?}",
                outcome.user_op_hash
            ),
            (_, None) => tracing::warn!(
                "operation {} not observed within {POLL_DEADLINE:?}",
                outcome.user_op_hash
            ),
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
