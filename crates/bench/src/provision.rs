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

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use opmeter_types::Account;

/// Run-scoped context for artifacts produced by provisioning.
///
/// Carries the timestamp that names the run's key output file, so repeated
/// runs never collide and no global mutable state is involved.
#[derive(Clone, Debug)]
pub struct RunContext {
    output_dir: PathBuf,
    started_at_millis: u128,
}

impl RunContext {
    /// Create a context for a run starting now, writing artifacts under
    /// `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let started_at_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_millis();
        Self {
            output_dir: output_dir.into(),
            started_at_millis,
        }
    }

    /// Path of the key output artifact for this run.
    pub fn output_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("output_{}.txt", self.started_at_millis))
    }

    /// Directory the run writes artifacts to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Generate `n` disposable accounts, appending each as a
/// `{privateKey}-{address}` line to the run's key output file.
///
/// The append happens before the account is returned: a persistence failure
/// aborts the whole call so callers never fund keys that were not saved.
/// Lines already written for earlier accounts are not rolled back.
pub fn provision(ctx: &RunContext, n: usize) -> anyhow::Result<Vec<Account>> {
    let path = ctx.output_file();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open key output file {}", path.display()))?;

    let mut accounts = Vec::with_capacity(n);
    for _ in 0..n {
        let account = opmeter_signer::generate_account();
        writeln!(file, "{}", account.to_output_line())
            .with_context(|| format!("failed to persist account {}", account.address))?;
        accounts.push(account);
    }

    tracing::info!(
        "provisioned {n} accounts, keys saved to {}",
        path.display()
    );
    Ok(accounts)
}
