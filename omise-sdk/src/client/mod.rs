//! The client facade.
//!
//! A [`Client`] is cheap to clone; clones share one configuration, one
//! transport and one capability cache.

mod polling;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use polling::{ChargeStatusPoller, PollOutcome, next_step};
#[cfg(feature = "client")]
pub use transport::ReqwestTransport;
pub use transport::{RawResponse, Transport, decode_response};

pub use crate::config::ClientConfig;

use crate::config::PollingConfig;
use crate::error::{ClientError, UnexpectedError};
use crate::objects::{
    Capability, ChargeStatus, CreateSourcePayload, CreateTokenPayload, PaymentInformation, Source,
    SourceType, Token,
};
use crate::request::{Operation, build_request};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub(crate) struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    latest_capability: watch::Sender<Option<Arc<Capability>>>,
}

impl ClientInner {
    /// Build, send and classify one request.
    ///
    /// The exchange runs as its own task; the caller's task receives the
    /// outcome exactly once.
    pub(crate) async fn perform<T: DeserializeOwned>(
        &self,
        operation: Operation<'_>,
    ) -> Result<T, ClientError> {
        let request = build_request(&operation, &self.config)?;
        debug!(
            operation = %operation,
            method = %request.method,
            url = %request.url,
            "Starting request"
        );

        let transport = Arc::clone(&self.transport);
        let sent = tokio::spawn(async move { transport.send(request).await })
            .await
            .map_err(|error| {
                warn!(operation = %operation, error = %error, "Request task did not complete");
                ClientError::unexpected(UnexpectedError::NoErrorNorResponse)
            })?;

        let result = match sent {
            Ok(response) => {
                debug!(operation = %operation, status = response.status, "Received response");
                decode_response(response)
            }
            Err(error) => Err(ClientError::Transport(error)),
        };
        if let Err(error) = &result {
            info!(operation = %operation, error = %error, "Request failed");
        }
        result
    }
}

/// Entry point for every call to the Omise servers.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client that talks HTTP through `reqwest`.
    #[cfg(feature = "client")]
    pub fn new(config: ClientConfig) -> Self {
        let transport = ReqwestTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }

    /// Shorthand for a client with default settings.
    #[cfg(feature = "client")]
    pub fn from_public_key(public_key: impl Into<String>) -> Result<Self, ClientError> {
        let public_key = crate::config::PublicKey::new(public_key)?;
        Ok(Self::new(ClientConfig::new(public_key)))
    }

    /// Create a client over a custom [`Transport`].
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let (latest_capability, _) = watch::channel(None);
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport: Arc::new(transport),
                latest_capability,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The most recently fetched capability, if any. Advisory only.
    pub fn latest_capability(&self) -> Option<Arc<Capability>> {
        self.inner.latest_capability.borrow().clone()
    }

    /// Get notified whenever a new capability is cached.
    pub fn subscribe_capability(&self) -> watch::Receiver<Option<Arc<Capability>>> {
        self.inner.latest_capability.subscribe()
    }

    /// `GET /capability` on the API server. Refreshes the cached capability.
    pub async fn capability(&self) -> Result<Capability, ClientError> {
        let capability: Capability = self.inner.perform(Operation::Capability).await?;
        self.inner
            .latest_capability
            .send_replace(Some(Arc::new(capability.clone())));
        Ok(capability)
    }

    /// `GET /tokens/{id}` on the vault server.
    pub async fn token(&self, token_id: &str) -> Result<Token, ClientError> {
        self.inner.perform(Operation::Token { id: token_id }).await
    }

    /// `POST /tokens` on the vault server.
    pub async fn create_token(
        &self,
        payload: impl Into<CreateTokenPayload>,
    ) -> Result<Token, ClientError> {
        let payload = payload.into();
        self.inner.perform(Operation::CreateToken(&payload)).await
    }

    /// `POST /sources` on the API server.
    pub async fn create_source(
        &self,
        payload: &CreateSourcePayload,
    ) -> Result<Source, ClientError> {
        self.inner.perform(Operation::CreateSource(payload)).await
    }

    /// Build the payload from its parts and create the source.
    pub async fn create_source_with(
        &self,
        details: PaymentInformation,
        amount: i64,
        currency: &str,
    ) -> Result<Source, ClientError> {
        let payload = CreateSourcePayload::new(amount, currency, details);
        self.create_source(&payload).await
    }

    /// Poll the token until its charge status is final or the configured
    /// attempts run out, returning the last status seen.
    pub async fn observe_charge_status(&self, token_id: &str) -> Result<ChargeStatus, ClientError> {
        self.observe_charge_status_with(token_id, self.inner.config.polling)
            .await
    }

    pub async fn observe_charge_status_with(
        &self,
        token_id: &str,
        polling: PollingConfig,
    ) -> Result<ChargeStatus, ClientError> {
        self.charge_status_poller(token_id, polling)
            .run()
            .await
            .into_result()
    }

    /// A poller bound to this client that can be run or spawned separately.
    pub fn charge_status_poller(
        &self,
        token_id: impl Into<String>,
        polling: PollingConfig,
    ) -> ChargeStatusPoller {
        ChargeStatusPoller::new(Arc::downgrade(&self.inner), token_id.into(), polling)
    }

    /// Allowed installment terms for a source type, preferring what the
    /// cached capability advertises over the configured table.
    pub fn installment_terms(&self, source_type: &SourceType) -> Vec<u32> {
        let advertised = self.latest_capability().and_then(|capability| {
            capability
                .payment_method(source_type)
                .and_then(|method| method.installment_terms.clone())
        });
        match advertised {
            Some(terms) => terms.into_iter().collect(),
            None => self
                .inner
                .config
                .installment_terms
                .terms(source_type)
                .to_vec(),
        }
    }
}
