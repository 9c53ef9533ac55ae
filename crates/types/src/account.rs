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

//! Owner and smart account representations.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// A disposable externally-owned account used by the benchmark.
///
/// Immutable once created. Accounts produced by the provisioner are also
/// persisted to the run's key output artifact, one line per account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Raw secp256k1 private key.
    pub private_key: B256,
    /// Address derived from the private key.
    pub address: Address,
}

impl Account {
    /// Format of the line appended to the key output artifact.
    pub fn to_output_line(&self) -> String {
        format!("{}-{}", self.private_key, self.address)
    }
}

/// A 7702-delegated smart account acting on behalf of an owner key.
///
/// Derived per flow invocation and never persisted. For simple 7702 accounts
/// the smart account address is the owner address itself, delegated to a
/// fixed implementation contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SmartAccount {
    /// Address user operations are sent from.
    pub address: Address,
    /// Implementation contract the account delegates to.
    pub delegate: Address,
}

impl SmartAccount {
    /// Derive the smart account for `owner` with the given delegate.
    pub fn for_owner(owner: Address, delegate: Address) -> Self {
        Self {
            address: owner,
            delegate,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256};

    use super::*;

    #[test]
    fn test_output_line_format() {
        let account = Account {
            private_key: b256!(
                "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
            ),
            address: address!("2c7536E3605D9C16a7a3D7b1898e529396a65c23"),
        };
        assert_eq!(
            account.to_output_line(),
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318-0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
        );
    }

    #[test]
    fn test_smart_account_address_is_owner() {
        let owner = address!("2c7536E3605D9C16a7a3D7b1898e529396a65c23");
        let delegate = address!("e6Cae83BdE06E4c305530e199D7217f42808555B");
        let sa = SmartAccount::for_owner(owner, delegate);
        assert_eq!(sa.address, owner);
        assert_eq!(sa.delegate, delegate);
    }
}
