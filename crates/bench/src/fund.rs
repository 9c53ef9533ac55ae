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

use alloy_primitives::{Address, U256};
use anyhow::Context;
use opmeter_provider::BundlerProvider;
use opmeter_types::{
    Account, Call, SmartAccount, FUNDING_VALUE, MAX_CALLS_PER_OP, SIMPLE_7702_DELEGATE,
};
use tokio::time::Instant;

use crate::{
    plan_batches, poll_until, resolve_authorization, submit_operation, POLL_DEADLINE,
    RECEIPT_POLL_INTERVAL,
};

/// Settings for the funding flow.
#[derive(Clone, Debug)]
pub struct FundSettings {
    /// Chain id authorizations are bound to.
    pub chain_id: u64,
    /// Delegate installed on the owner's smart account.
    pub delegate: Address,
    /// Wei sent to each destination account.
    pub funding_value: U256,
}

impl Default for FundSettings {
    fn default() -> Self {
        Self {
            chain_id: 10,
            delegate: SIMPLE_7702_DELEGATE,
            funding_value: FUNDING_VALUE,
        }
    }
}

/// Fund `accounts` from `owner`'s smart account, batching transfers into
/// user operations of at most [`MAX_CALLS_PER_OP`] calls.
///
/// The authorization is resolved once and reused for every batch. Batches
/// are submitted strictly in order, each one waiting for its receipt poll
/// to finish before the next is sent, so a stalled batch delays the rest
/// rather than racing it for the owner's nonce.
pub async fn fund_accounts<P: BundlerProvider>(
    provider: &P,
    owner: &Account,
    accounts: &[Account],
    settings: &FundSettings,
) -> anyhow::Result<()> {
    let smart_account = SmartAccount::for_owner(owner.address, settings.delegate);
    let authorization =
        resolve_authorization(provider, owner, &smart_account, settings.chain_id).await?;

    let calls: Vec<Call> = accounts
        .iter()
        .map(|account| Call {
            to: account.address,
            value: settings.funding_value,
        })
        .collect();

    for (index, batch) in plan_batches(&calls, MAX_CALLS_PER_OP).into_iter().enumerate() {
        let hash = submit_operation(provider, &smart_account, authorization.as_ref(), batch)
            .await
            .with_context(|| format!("failed to submit funding batch {index}"))?;
        tracing::info!("funding batch {index}: user operation hash {hash}");

        let deadline = Instant::now() + POLL_DEADLINE;
        let receipt = poll_until(
            || provider.get_user_operation_receipt(hash),
            deadline,
            RECEIPT_POLL_INTERVAL,
        )
        .await;

        match receipt {
            Some(receipt) => tracing::info!(
                "funding batch {index}: mined in transaction {}",
                receipt.receipt.transaction_hash
            ),
            None => tracing::warn!(
                "funding batch {index}: no receipt within {POLL_DEADLINE:?}"
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, B256};
    use mockall::Sequence;
    use opmeter_provider::MockBundlerProvider;
    use opmeter_types::{OnchainReceipt, UserOperationReceipt};

    use super::*;

    fn receipt_for(hash: B256) -> UserOperationReceipt {
        UserOperationReceipt {
            user_op_hash: hash,
            success: true,
            receipt: OnchainReceipt {
                transaction_hash: B256::repeat_byte(0x33),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_seven_accounts_fund_in_two_ordered_batches() {
        let owner = opmeter_signer::generate_account();
        let accounts: Vec<Account> =
            (0..7).map(|_| opmeter_signer::generate_account()).collect();

        let hash_a = B256::repeat_byte(0x01);
        let hash_b = B256::repeat_byte(0x02);

        let mut provider = MockBundlerProvider::new();
        provider.expect_get_code().returning(|_| Ok(Bytes::new()));
        provider.expect_get_transaction_count().returning(|_| Ok(0));

        // The second submission may only happen after the first batch's
        // receipt poll has completed.
        let mut seq = Sequence::new();
        provider
            .expect_send_user_operation()
            .withf(|op| op.calls.len() == 5 && op.authorization.is_some())
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(hash_a));
        provider
            .expect_get_user_operation_receipt()
            .withf(move |h| *h == hash_a)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |h| Ok(Some(receipt_for(h))));
        provider
            .expect_send_user_operation()
            .withf(|op| op.calls.len() == 2 && op.authorization.is_some())
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(hash_b));
        provider
            .expect_get_user_operation_receipt()
            .withf(move |h| *h == hash_b)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |h| Ok(Some(receipt_for(h))));

        fund_accounts(&provider, &owner, &accounts, &FundSettings::default())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_authorization_resolved_once_for_all_batches() {
        let owner = opmeter_signer::generate_account();
        let accounts: Vec<Account> =
            (0..12).map(|_| opmeter_signer::generate_account()).collect();

        let mut provider = MockBundlerProvider::new();
        // One code read and one nonce read for three batches.
        provider
            .expect_get_code()
            .times(1)
            .returning(|_| Ok(Bytes::new()));
        provider
            .expect_get_transaction_count()
            .times(1)
            .returning(|_| Ok(4));
        provider
            .expect_send_user_operation()
            .times(3)
            .withf(|op| op.authorization.as_ref().is_some_and(|a| a.nonce == 4))
            .returning(|_| Ok(B256::repeat_byte(0x01)));
        provider
            .expect_get_user_operation_receipt()
            .times(3)
            .returning(|h| Ok(Some(receipt_for(h))));

        fund_accounts(&provider, &owner, &accounts, &FundSettings::default())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_installed_delegation_sends_without_tuple() {
        let owner = opmeter_signer::generate_account();
        let accounts = vec![opmeter_signer::generate_account()];

        let mut provider = MockBundlerProvider::new();
        provider
            .expect_get_code()
            .returning(|_| Ok(opmeter_types::delegation_designator(SIMPLE_7702_DELEGATE)));
        provider
            .expect_send_user_operation()
            .withf(|op| op.authorization.is_none())
            .returning(|_| Ok(B256::repeat_byte(0x01)));
        provider
            .expect_get_user_operation_receipt()
            .returning(|h| Ok(Some(receipt_for(h))));

        fund_accounts(&provider, &owner, &accounts, &FundSettings::default())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_timeout_is_not_an_error() {
        let owner = opmeter_signer::generate_account();
        let accounts = vec![opmeter_signer::generate_account()];

        let mut provider = MockBundlerProvider::new();
        provider.expect_get_code().returning(|_| Ok(Bytes::new()));
        provider.expect_get_transaction_count().returning(|_| Ok(0));
        provider
            .expect_send_user_operation()
            .returning(|_| Ok(B256::repeat_byte(0x01)));
        provider
            .expect_get_user_operation_receipt()
            .returning(|_| Ok(None));

        fund_accounts(&provider, &owner, &accounts, &FundSettings::default())
            .await
            .unwrap();
    }
}
