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

//! Benchmark constants.

use alloy_primitives::{address, Address, U256};

/// Maximum number of calls batched into a single user operation.
pub const MAX_CALLS_PER_OP: usize = 5;

/// Default implementation contract installed on simple 7702 smart accounts.
pub const SIMPLE_7702_DELEGATE: Address = address!("e6Cae83BdE06E4c305530e199D7217f42808555B");

/// Fixed recipient of measurement operations.
pub const MEASUREMENT_RECIPIENT: Address = address!("09FD4F6088f2025427AB1e89257A44747081Ed59");

/// Wei transferred to each provisioned account while funding (0.0001 ether).
pub const FUNDING_VALUE: U256 = U256::from_limbs([100_000_000_000_000, 0, 0, 0]);

/// Wei transferred per measurement operation (0.00000001 ether).
pub const MEASUREMENT_VALUE: U256 = U256::from_limbs([10_000_000_000, 0, 0, 0]);
