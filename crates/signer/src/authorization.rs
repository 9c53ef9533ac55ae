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

use alloy_eips::eip7702::Authorization;
use alloy_primitives::{Address, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use opmeter_types::{Account, Eip7702Auth};

use crate::{Error, Result};

/// Sign a 7702 authorization binding `owner` to `delegate`.
///
/// `nonce` is the owner account's transaction count at signing time.
pub fn sign_authorization(
    owner: &Account,
    chain_id: u64,
    delegate: Address,
    nonce: u64,
) -> Result<Eip7702Auth> {
    let signer = PrivateKeySigner::from_bytes(&owner.private_key)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;

    let authorization = Authorization {
        chain_id: U256::from(chain_id),
        address: delegate,
        nonce,
    };
    let signature = signer.sign_hash_sync(&authorization.signature_hash())?;
    let signed = authorization.into_signed(signature);

    Ok(Eip7702Auth {
        chain_id,
        address: delegate,
        nonce,
        y_parity: signed.signature().v().y_parity_byte(),
        r: signed.signature().r(),
        s: signed.signature().s(),
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use opmeter_types::SIMPLE_7702_DELEGATE;

    use super::*;
    use crate::generate_account;

    #[test]
    fn test_signed_authorization_recovers_owner() {
        let owner = generate_account();
        let auth = sign_authorization(&owner, 10, SIMPLE_7702_DELEGATE, 0).unwrap();

        assert_eq!(auth.chain_id, 10);
        assert_eq!(auth.address, SIMPLE_7702_DELEGATE);
        assert_eq!(auth.nonce, 0);
        auth.validate(owner.address).unwrap();
    }

    #[test]
    fn test_validation_rejects_other_authority() {
        let owner = generate_account();
        let auth = sign_authorization(&owner, 10, SIMPLE_7702_DELEGATE, 3).unwrap();

        let other = address!("0000000000000000000000000000000000000001");
        assert!(auth.validate(other).is_err());
    }
}
