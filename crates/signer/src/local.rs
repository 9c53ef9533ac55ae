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

use alloy_primitives::B256;
use alloy_signer_local::PrivateKeySigner;
use opmeter_types::Account;

use crate::{Error, Result};

/// Generate a fresh random account.
pub fn generate_account() -> Account {
    let signer = PrivateKeySigner::random();
    Account {
        private_key: signer.to_bytes(),
        address: signer.address(),
    }
}

/// Rebuild an account from a raw private key.
pub fn account_from_key(private_key: B256) -> Result<Account> {
    let signer = PrivateKeySigner::from_bytes(&private_key)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(Account {
        private_key,
        address: signer.address(),
    })
}

/// Parse an account from a `0x`-prefixed hex private key.
pub fn parse_account(key: &str) -> Result<Account> {
    let signer = key.trim().parse::<PrivateKeySigner>()?;
    Ok(Account {
        private_key: signer.to_bytes(),
        address: signer.address(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_accounts_are_distinct() {
        let a = generate_account();
        let b = generate_account();
        assert_ne!(a.private_key, b.private_key);
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_account_roundtrip() {
        let account = generate_account();
        let rebuilt = account_from_key(account.private_key).unwrap();
        assert_eq!(account, rebuilt);

        let parsed = parse_account(&account.private_key.to_string()).unwrap();
        assert_eq!(account, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_account("0xnothex").is_err());
        assert!(account_from_key(B256::ZERO).is_err());
    }
}
