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
use opmeter_provider::{BundlerProvider, ProviderResult};
use opmeter_types::{Call, Eip7702Auth, SmartAccount, UserOperationRequest};

/// Build and send one user operation for `smart_account`, returning its
/// hash.
///
/// No state is retained and no retry is attempted here; a rejected
/// submission propagates to the caller, who may resubmit for a fresh hash
/// if it chooses to.
pub async fn submit_operation<P: BundlerProvider>(
    provider: &P,
    smart_account: &SmartAccount,
    authorization: Option<&Eip7702Auth>,
    calls: &[Call],
) -> ProviderResult<B256> {
    let op = UserOperationRequest {
        sender: smart_account.address,
        calls: calls.to_vec(),
        authorization: authorization.cloned(),
    };
    provider.send_user_operation(op).await
}
