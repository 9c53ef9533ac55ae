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

use anyhow::Context;
use opmeter_provider::BundlerProvider;
use opmeter_types::{code_matches_delegation, Account, Eip7702Auth, SmartAccount};

/// Decide whether operations from `smart_account` must carry a 7702
/// authorization tuple, signing one if so.
///
/// No tuple is needed when the code at the smart account address already
/// equals the delegation designator for its delegate; attaching a stale one
/// there would waste gas re-registering an existing delegation. Callers
/// invoke this once per flow invocation and reuse the result for every
/// batch that follows.
pub async fn resolve_authorization<P: BundlerProvider>(
    provider: &P,
    owner: &Account,
    smart_account: &SmartAccount,
    chain_id: u64,
) -> anyhow::Result<Option<Eip7702Auth>> {
    let code = provider
        .get_code(smart_account.address)
        .await
        .context("failed to read smart account code")?;

    if code_matches_delegation(&code, smart_account.delegate) {
        tracing::debug!(
            "delegation already installed for {}, skipping authorization",
            smart_account.address
        );
        return Ok(None);
    }

    let nonce = provider
        .get_transaction_count(owner.address)
        .await
        .context("failed to read owner transaction count")?;
    let auth =
        opmeter_signer::sign_authorization(owner, chain_id, smart_account.delegate, nonce)
            .context("failed to sign authorization")?;
    Ok(Some(auth))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Bytes;
    use opmeter_provider::MockBundlerProvider;
    use opmeter_types::{delegation_designator, SIMPLE_7702_DELEGATE};

    use super::*;

    fn owner_and_account() -> (Account, SmartAccount) {
        let owner = opmeter_signer::generate_account();
        let smart_account = SmartAccount::for_owner(owner.address, SIMPLE_7702_DELEGATE);
        (owner, smart_account)
    }

    #[tokio::test]
    async fn test_installed_delegation_needs_no_tuple() {
        let (owner, smart_account) = owner_and_account();

        // No expectation on get_transaction_count: any nonce fetch or
        // signing attempt fails the test.
        let mut provider = MockBundlerProvider::new();
        provider
            .expect_get_code()
            .returning(move |_| Ok(delegation_designator(SIMPLE_7702_DELEGATE)));

        let auth = resolve_authorization(&provider, &owner, &smart_account, 10)
            .await
            .unwrap();
        assert!(auth.is_none());
    }

    #[tokio::test]
    async fn test_empty_code_yields_tuple() {
        let (owner, smart_account) = owner_and_account();

        let mut provider = MockBundlerProvider::new();
        provider.expect_get_code().returning(|_| Ok(Bytes::new()));
        provider
            .expect_get_transaction_count()
            .returning(|_| Ok(12));

        let auth = resolve_authorization(&provider, &owner, &smart_account, 10)
            .await
            .unwrap()
            .expect("authorization expected");
        assert_eq!(auth.nonce, 12);
        assert_eq!(auth.address, SIMPLE_7702_DELEGATE);
        auth.validate(owner.address).unwrap();
    }

    #[tokio::test]
    async fn test_foreign_code_yields_tuple() {
        let (owner, smart_account) = owner_and_account();

        let mut provider = MockBundlerProvider::new();
        provider
            .expect_get_code()
            .returning(|_| Ok(Bytes::from_static(&[0x60, 0x80])));
        provider.expect_get_transaction_count().returning(|_| Ok(0));

        let auth = resolve_authorization(&provider, &owner, &smart_account, 10)
            .await
            .unwrap();
        assert!(auth.is_some());
    }

    #[tokio::test]
    async fn test_code_read_failure_propagates() {
        let (owner, smart_account) = owner_and_account();

        let mut provider = MockBundlerProvider::new();
        provider
            .expect_get_code()
            .returning(|_| Err(anyhow::anyhow!("rpc down").into()));

        assert!(
            resolve_authorization(&provider, &owner, &smart_account, 10)
                .await
                .is_err()
        );
    }
}
