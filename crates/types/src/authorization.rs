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

//! 7702 authorization tuples and delegation designator checks.

use alloy_eips::eip7702::SignedAuthorization;
use alloy_primitives::{fixed_bytes, Address, Bytes, FixedBytes, U256};
use serde::{Deserialize, Serialize};

/// Byte prefix marking 7702-delegated code.
pub const DELEGATION_PREFIX: FixedBytes<3> = fixed_bytes!("ef0100");

/// The 23-byte code installed at an address delegated to `delegate`.
pub fn delegation_designator(delegate: Address) -> Bytes {
    let code: FixedBytes<23> = DELEGATION_PREFIX.concat_const(delegate.into());
    code.into()
}

/// Whether on-chain `code` already delegates to `delegate`.
///
/// Compared as raw bytes, so hex casing of the source address is irrelevant.
pub fn code_matches_delegation(code: &Bytes, delegate: Address) -> bool {
    code.as_ref() == delegation_designator(delegate).as_ref()
}

/// Signed authorization tuple attached to a user operation when the sender's
/// code does not yet carry the delegation designator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Eip7702Auth {
    /// The chain ID of the authorization.
    pub chain_id: u64,
    /// The delegate address of the authorization.
    pub address: Address,
    /// The nonce for the authorization.
    pub nonce: u64,
    /// Signed authorization tuple.
    pub y_parity: u8,
    /// Signed authorization tuple.
    pub r: U256,
    /// Signed authorization tuple.
    pub s: U256,
}

impl From<Eip7702Auth> for SignedAuthorization {
    fn from(value: Eip7702Auth) -> Self {
        let authorization = alloy_eips::eip7702::Authorization {
            chain_id: U256::from(value.chain_id),
            address: value.address,
            nonce: value.nonce,
        };

        let signature = alloy_primitives::Signature::from_rs_and_parity(
            value.r,
            value.s,
            value.y_parity == 1,
        )
        .expect("parity bool conversion is infallible");
        authorization.into_signed(signature)
    }
}

impl Eip7702Auth {
    /// Validate the tuple's signature against the expected signing authority.
    pub fn validate(&self, authority: Address) -> anyhow::Result<()> {
        let signed_auth = SignedAuthorization::from(self.clone());
        match signed_auth.recover_authority() {
            Ok(address) => {
                if address == authority {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Invalid Signature"))
                }
            }
            Err(e) => Err(anyhow::anyhow!(e.to_string())),
        }
    }
}
