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

//! Signer error types.

use alloy_signer_local::LocalSignerError;

/// Result type for signer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Signer errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A private key could not be parsed
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    /// An error occurred while signing
    #[error("signing error: {0}")]
    SigningError(String),
}

impl From<LocalSignerError> for Error {
    fn from(value: LocalSignerError) -> Self {
        Error::InvalidKey(value.to_string())
    }
}

impl From<alloy_signer::Error> for Error {
    fn from(value: alloy_signer::Error) -> Self {
        Error::SigningError(value.to_string())
    }
}
