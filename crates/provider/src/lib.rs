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

//! Opmeter providers
//!
//! A provider gives access to the bundler service and the chain reads the
//! benchmark needs, behind one narrow trait so flows can run against mocks.

mod alloy;
pub use alloy::{new_bundler_provider, AlloyBundlerProvider};

mod error;
pub use error::{ProviderError, ProviderResult};

mod traits;
#[cfg(feature = "test-utils")]
pub use traits::MockBundlerProvider;
pub use traits::BundlerProvider;
