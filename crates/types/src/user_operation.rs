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

//! Wire types exchanged with the bundler.
//!
//! Only the narrow surface the benchmark touches is modeled. The bundler
//! owns gas estimation, nonce management and signing of the operation
//! itself; extra fields in its responses are ignored on deserialization.

use alloy_primitives::{Address, B256, U64};
use serde::{Deserialize, Serialize};

use crate::{Call, Eip7702Auth};

/// A user operation submission request: sender, call batch and an optional
/// 7702 authorization tuple.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationRequest {
    /// Smart account the operation executes from.
    pub sender: Address,
    /// Calls executed by the operation, at most [`crate::MAX_CALLS_PER_OP`].
    pub calls: Vec<Call>,
    /// Authorization tuple, present only when the sender's code does not
    /// already carry the delegation designator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Eip7702Auth>,
}

/// Receipt of a mined user operation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    /// Hash of the user operation.
    pub user_op_hash: B256,
    /// Whether the operation's execution succeeded.
    #[serde(default)]
    pub success: bool,
    /// Receipt of the transaction that included this operation.
    pub receipt: OnchainReceipt,
}

/// The slice of the inclusion transaction's receipt the benchmark reads.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnchainReceipt {
    /// Hash of the transaction that carried the operation on-chain.
    pub transaction_hash: B256,
}

/// Descriptor returned by `eth_getUserOperationByHash`.
///
/// Presence alone marks the operation as visible to the queried node; the
/// block fields are populated only once the operation has been mined.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationStatus {
    /// Block the operation was included in, if mined.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// Transaction that carried the operation, if mined.
    #[serde(default)]
    pub transaction_hash: Option<B256>,
}
