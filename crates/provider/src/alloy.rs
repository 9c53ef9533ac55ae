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

use std::marker::PhantomData;

use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::{Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use alloy_transport::{layers::RetryBackoffService, Transport};
use alloy_transport_http::Http;
use anyhow::Context;
use opmeter_types::{UserOperationReceipt, UserOperationRequest, UserOperationStatus};
use reqwest::Client;
use url::Url;

use crate::{BundlerProvider, ProviderResult};

/// Bundler provider implementation using [alloy-provider](https://github.com/alloy-rs/alloy-rs).
///
/// Bundler-specific methods go through raw JSON-RPC requests; chain reads use
/// the typed provider methods.
pub struct AlloyBundlerProvider<AP, T> {
    inner: AP,
    _marker: PhantomData<T>,
}

impl<AP, T> AlloyBundlerProvider<AP, T> {
    /// Create a new `AlloyBundlerProvider`
    pub fn new(inner: AP) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<AP: Clone, T> Clone for AlloyBundlerProvider<AP, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<AP, T> From<AP> for AlloyBundlerProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    fn from(inner: AP) -> Self {
        Self::new(inner)
    }
}

#[async_trait::async_trait]
impl<AP, T> BundlerProvider for AlloyBundlerProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    async fn send_user_operation(&self, op: UserOperationRequest) -> ProviderResult<B256> {
        Ok(self
            .inner
            .raw_request("eth_sendUserOperation".into(), (op,))
            .await?)
    }

    async fn get_user_operation_receipt(
        &self,
        hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>> {
        Ok(self
            .inner
            .raw_request("eth_getUserOperationReceipt".into(), (hash,))
            .await?)
    }

    async fn get_user_operation(
        &self,
        hash: B256,
    ) -> ProviderResult<Option<UserOperationStatus>> {
        Ok(self
            .inner
            .raw_request("eth_getUserOperationByHash".into(), (hash,))
            .await?)
    }

    async fn get_code(&self, address: Address) -> ProviderResult<Bytes> {
        Ok(self.inner.get_code_at(address).await?)
    }

    async fn get_transaction_count(&self, address: Address) -> ProviderResult<u64> {
        Ok(self.inner.get_transaction_count(address).await?)
    }
}

/// Create a new bundler provider from a given RPC URL
pub fn new_bundler_provider(
    bundler_url: &str,
) -> anyhow::Result<impl BundlerProvider + Clone> {
    let url = Url::parse(bundler_url).context("invalid bundler url")?;
    // transient transport failures retry below the lifecycle poller
    let retry_layer = alloy_transport::layers::RetryBackoffLayer::new(10, 500, 1_000_000);
    let client = ClientBuilder::default().layer(retry_layer).http(url);
    let provider = ProviderBuilder::new().on_client(client);
    Ok(AlloyBundlerProvider::<_, RetryBackoffService<Http<Client>>>::new(provider))
}
