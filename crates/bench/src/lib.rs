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

//! Core benchmark flows: provisioning disposable accounts, funding them
//! through batched user operations, and measuring submission-to-inclusion
//! and submission-to-propagation latency against a bundler.
//!
//! Everything here is strictly sequential. Batches and owners are processed
//! one at a time to avoid nonce conflicts on shared accounts and to keep
//! latency samples free of self-inflicted contention.

mod batch;
pub use batch::plan_batches;

mod fund;
pub use fund::{fund_accounts, FundSettings};

mod measure;
pub use measure::{
    measure_operation, run_measurement, MeasureMode, MeasureSettings, MeasurementOutcome,
};

mod poll;
pub use poll::{poll_until, POLL_DEADLINE, RECEIPT_POLL_INTERVAL};

mod provision;
pub use provision::{provision, RunContext};

mod resolve;
pub use resolve::resolve_authorization;

mod submit;
pub use submit::submit_operation;
