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

//! Provider error types.

use alloy_transport::TransportError;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error enumeration for the `BundlerProvider` trait.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// JSON-RPC or transport error
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Internal errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
