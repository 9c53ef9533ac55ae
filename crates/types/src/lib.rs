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

#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

//! Domain types shared across the opmeter crates.

mod account;
pub use account::{Account, SmartAccount};

mod authorization;
pub use authorization::{
    code_matches_delegation, delegation_designator, Eip7702Auth, DELEGATION_PREFIX,
};

mod call;
pub use call::Call;

mod constants;
pub use constants::{
    FUNDING_VALUE, MAX_CALLS_PER_OP, MEASUREMENT_RECIPIENT, MEASUREMENT_VALUE,
    SIMPLE_7702_DELEGATE,
};

mod user_operation;
pub use user_operation::{
    OnchainReceipt, UserOperationReceipt, UserOperationRequest, UserOperationStatus,
};
