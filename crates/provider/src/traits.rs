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

//! Trait for interacting with a bundler service.

use alloy_primitives::{Address, Bytes, B256};
#[cfg(feature = "test-utils")]
use mockall::automock;
use opmeter_types::{UserOperationReceipt, UserOperationRequest, UserOperationStatus};

use crate::error::ProviderResult;

/// The bundler surface the benchmark consumes.
///
/// Sending returns an opaque user operation hash used as the key for all
/// subsequent lifecycle queries. The two lookup methods are simple presence
/// checks: `None` means "not yet observed", with no intermediate states.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait BundlerProvider: Send + Sync {
    /// Send a user operation, returning its hash on acceptance.
    async fn send_user_operation(&self, op: UserOperationRequest) -> ProviderResult<B256>;

    /// Get the receipt of a mined user operation, if any.
    async fn get_user_operation_receipt(
        &self,
        hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>>;

    /// Get a user operation known to the queried node, if any.
    async fn get_user_operation(&self, hash: B256)
        -> ProviderResult<Option<UserOperationStatus>>;

    /// Get the code at an address.
    async fn get_code(&self, address: Address) -> ProviderResult<Bytes>;

    /// Get the transaction count of an address.
    async fn get_transaction_count(&self, address: Address) -> ProviderResult<u64>;
}
