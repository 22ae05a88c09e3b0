//! In-memory transport for exercising the client without a network.

use super::transport::{RawResponse, Transport};
use crate::error::TransportError;
use crate::request::ApiRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<RawResponse, TransportError>>,
    fallback: Option<RawResponse>,
    requests: Vec<ApiRequest>,
}

/// Replays queued responses in order, then the fallback if one is set.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: impl Into<String>) -> Self {
        let response = RawResponse::new(status, body.into());
        self.script.lock().unwrap().responses.push_back(Ok(response));
        self
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.script.lock().unwrap().responses.push_back(Err(error));
        self
    }

    pub(crate) fn respond_always(self, status: u16, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().fallback = Some(RawResponse::new(status, body.into()));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request);
        match script.responses.pop_front() {
            Some(response) => response,
            None => script
                .fallback
                .clone()
                .ok_or_else(|| TransportError::Connection("script exhausted".to_string())),
        }
    }
}

pub(crate) fn token_json(charge_status: &str) -> String {
    format!(
        r#"{{
            "object": "token",
            "id": "tokn_test_1",
            "livemode": false,
            "used": false,
            "charge_status": "{charge_status}",
            "card": {{"id": "card_test_1", "livemode": false, "last_digits": "4242", "security_code_check": true}},
            "created_at": "2019-05-29T08:01:28Z"
        }}"#
    )
}
