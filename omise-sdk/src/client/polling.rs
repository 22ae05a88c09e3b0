//! Repeatedly fetching a token until its charge status settles.
//!
//! Attempts run strictly one after another: the next fetch is scheduled only
//! after the previous one has been classified, and it is skipped entirely if
//! the owning client has been dropped in the meantime.

use super::ClientInner;
use crate::config::PollingConfig;
use crate::error::{ClientError, UnexpectedError};
use crate::objects::{ChargeStatus, Token};
use crate::request::Operation;
use std::ops::ControlFlow;
use std::sync::Weak;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How an observation ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The charge reached a status that never changes again.
    Final(ChargeStatus),
    /// Attempts ran out; carries the last status seen.
    Exhausted(ChargeStatus),
    /// A fetch failed. No further attempts were made.
    Failed(ClientError),
    /// The client was dropped before the next attempt fired.
    Abandoned,
}

impl PollOutcome {
    pub fn status(&self) -> Option<ChargeStatus> {
        match self {
            PollOutcome::Final(status) | PollOutcome::Exhausted(status) => Some(*status),
            PollOutcome::Failed(_) | PollOutcome::Abandoned => None,
        }
    }

    pub fn into_result(self) -> Result<ChargeStatus, ClientError> {
        match self {
            PollOutcome::Final(status) | PollOutcome::Exhausted(status) => Ok(status),
            PollOutcome::Failed(error) => Err(error),
            PollOutcome::Abandoned => Err(ClientError::unexpected(UnexpectedError::Other(
                "client released before charge status became final".to_string(),
            ))),
        }
    }
}

/// Decide what follows the fetch made on `attempt` (zero based).
///
/// `Continue` carries the index of the next attempt.
pub fn next_step(
    fetched: Result<ChargeStatus, ClientError>,
    attempt: u32,
    max_attempts: u32,
) -> ControlFlow<PollOutcome, u32> {
    match fetched {
        Err(error) => ControlFlow::Break(PollOutcome::Failed(error)),
        Ok(status) if status.is_final() => ControlFlow::Break(PollOutcome::Final(status)),
        Ok(status) if attempt + 1 >= max_attempts => {
            ControlFlow::Break(PollOutcome::Exhausted(status))
        }
        Ok(_) => ControlFlow::Continue(attempt + 1),
    }
}

/// Observes one token. Holds only a weak reference to its client.
///
/// Dropping the future returned by [`run`](Self::run) cancels the observation.
#[derive(Debug)]
pub struct ChargeStatusPoller {
    client: Weak<ClientInner>,
    token_id: String,
    config: PollingConfig,
}

impl ChargeStatusPoller {
    pub(crate) fn new(client: Weak<ClientInner>, token_id: String, config: PollingConfig) -> Self {
        Self {
            client,
            token_id,
            config,
        }
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub async fn run(self) -> PollOutcome {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0;

        loop {
            let Some(client) = self.client.upgrade() else {
                info!(
                    token_id = %self.token_id,
                    attempt,
                    "Client released, abandoning charge status polling"
                );
                return PollOutcome::Abandoned;
            };

            debug!(
                token_id = %self.token_id,
                attempt = attempt + 1,
                max_attempts,
                "Fetching charge status"
            );
            let fetched = client
                .perform::<Token>(Operation::Token { id: &self.token_id })
                .await
                .map(|token| token.charge_status);
            drop(client);

            match next_step(fetched, attempt, max_attempts) {
                ControlFlow::Break(outcome) => {
                    info!(
                        token_id = %self.token_id,
                        attempts = attempt + 1,
                        status = ?outcome.status(),
                        "Charge status polling finished"
                    );
                    return outcome;
                }
                ControlFlow::Continue(next) => {
                    attempt = next;
                    tokio::time::sleep(self.config.interval).await;
                }
            }
        }
    }

    /// Run the observation on the runtime's worker pool.
    pub fn spawn(self) -> JoinHandle<PollOutcome> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{ScriptedTransport, token_json};
    use crate::client::{Client, ClientConfig};
    use crate::config::PublicKey;
    use crate::error::TransportError;
    use std::time::Duration;

    fn client(transport: &ScriptedTransport) -> Client {
        let config = ClientConfig::new(PublicKey::new("pkey_test_123").unwrap());
        Client::with_transport(config, transport.clone())
    }

    fn fast(max_attempts: u32) -> PollingConfig {
        PollingConfig::new(max_attempts, Duration::from_millis(1))
    }

    #[test]
    fn test_next_step() {
        assert!(matches!(
            next_step(Ok(ChargeStatus::Pending), 0, 10),
            ControlFlow::Continue(1)
        ));
        assert!(matches!(
            next_step(Ok(ChargeStatus::Successful), 0, 10),
            ControlFlow::Break(PollOutcome::Final(ChargeStatus::Successful))
        ));
        assert!(matches!(
            next_step(Ok(ChargeStatus::Pending), 9, 10),
            ControlFlow::Break(PollOutcome::Exhausted(ChargeStatus::Pending))
        ));
        assert!(matches!(
            next_step(Ok(ChargeStatus::Unknown), 0, 1),
            ControlFlow::Break(PollOutcome::Exhausted(ChargeStatus::Unknown))
        ));
        assert!(matches!(
            next_step(Err(TransportError::Timeout.into()), 0, 10),
            ControlFlow::Break(PollOutcome::Failed(ClientError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_final_status_on_third_attempt() {
        let transport = ScriptedTransport::new()
            .respond(200, token_json("pending"))
            .respond(200, token_json("pending"))
            .respond(200, token_json("successful"));
        let client = client(&transport);

        let outcome = client.charge_status_poller("tokn_test_1", fast(10)).run().await;

        assert!(matches!(outcome, PollOutcome::Final(ChargeStatus::Successful)));
        assert_eq!(transport.calls(), 3);
        assert!(
            transport
                .requests()
                .iter()
                .all(|request| request.url.as_str() == "https://vault.omise.co/tokens/tokn_test_1")
        );
    }

    #[tokio::test]
    async fn test_token_without_card_is_observed() {
        let transport = ScriptedTransport::new()
            .respond(
                200,
                r#"{"id":"tokn_test_1","livemode":false,"used":false,"charge_status":"pending"}"#,
            )
            .respond(
                200,
                r#"{"id":"tokn_test_1","livemode":false,"used":true,"card":null,"charge_status":"failed"}"#,
            );
        let client = client(&transport);

        let outcome = client.charge_status_poller("tokn_test_1", fast(10)).run().await;

        assert!(matches!(outcome, PollOutcome::Final(ChargeStatus::Failed)));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_never_final_stops_after_max_attempts() {
        let transport = ScriptedTransport::new().respond_always(200, token_json("pending"));
        let client = client(&transport);

        let outcome = client.charge_status_poller("tokn_test_1", fast(4)).run().await;

        assert!(matches!(outcome, PollOutcome::Exhausted(ChargeStatus::Pending)));
        assert_eq!(transport.calls(), 4);
    }

    #[tokio::test]
    async fn test_single_attempt() {
        let transport = ScriptedTransport::new().respond_always(200, token_json("pending"));
        let client = client(&transport);

        let outcome = client.charge_status_poller("tokn_test_1", fast(0)).run().await;

        assert_eq!(outcome.status(), Some(ChargeStatus::Pending));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_stops_polling() {
        let transport = ScriptedTransport::new()
            .respond(200, token_json("pending"))
            .respond(
                404,
                r#"{"object":"error","code":"not_found","message":"token was not found","location":""}"#,
            )
            .respond_always(200, token_json("successful"));
        let client = client(&transport);

        let outcome = client.charge_status_poller("tokn_test_1", fast(10)).run().await;

        let PollOutcome::Failed(error) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(error.is_expected());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_dropped_client_is_never_polled() {
        let transport = ScriptedTransport::new().respond_always(200, token_json("pending"));
        let client = client(&transport);
        let poller = client.charge_status_poller("tokn_test_1", fast(10));
        drop(client);

        assert!(matches!(poller.run().await, PollOutcome::Abandoned));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_client_dropped_while_waiting() {
        let transport = ScriptedTransport::new().respond_always(200, token_json("pending"));
        let client = client(&transport);
        let handle = client
            .charge_status_poller("tokn_test_1", PollingConfig::new(10, Duration::from_millis(300)))
            .spawn();

        for _ in 0..100 {
            if transport.calls() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        drop(client);

        assert!(matches!(handle.await.unwrap(), PollOutcome::Abandoned));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_abandoned_into_result() {
        let error = PollOutcome::Abandoned.into_result().unwrap_err();
        assert!(matches!(
            error,
            ClientError::Unexpected { kind: UnexpectedError::Other(_), .. }
        ));
    }
}
