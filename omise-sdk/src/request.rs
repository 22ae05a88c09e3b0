//! Turning an [`Operation`] into a fully described HTTP request.
//!
//! Building is pure: no I/O, no clock, no globals.

use crate::config::{ClientConfig, ServerTarget};
use crate::error::ClientError;
use crate::objects::{CreateSourcePayload, CreateTokenPayload};
use bytes::Bytes;
use std::fmt;
use url::Url;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const USER_AGENT_HEADER: &str = "User-Agent";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const API_VERSION_HEADER: &str = "Omise-Version";

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every call the client can make.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    Capability,
    Token { id: &'a str },
    CreateToken(&'a CreateTokenPayload),
    CreateSource(&'a CreateSourcePayload),
}

impl Operation<'_> {
    pub fn server(&self) -> ServerTarget {
        match self {
            Operation::Capability | Operation::CreateSource(_) => ServerTarget::Api,
            Operation::Token { .. } | Operation::CreateToken(_) => ServerTarget::Vault,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::Capability | Operation::Token { .. } => HttpMethod::Get,
            Operation::CreateToken(_) | Operation::CreateSource(_) => HttpMethod::Post,
        }
    }

    /// Path relative to the server's base URL. Identifiers are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Operation::Capability => "capability".to_string(),
            Operation::Token { id } => format!("tokens/{}", urlencoding::encode(id)),
            Operation::CreateToken(_) => "tokens".to_string(),
            Operation::CreateSource(_) => "sources".to_string(),
        }
    }

    fn body(&self) -> Result<Option<Bytes>, serde_json::Error> {
        let body = match self {
            Operation::Capability | Operation::Token { .. } => return Ok(None),
            Operation::CreateToken(payload) => serde_json::to_vec(payload)?,
            Operation::CreateSource(payload) => serde_json::to_vec(payload)?,
        };
        Ok(Some(Bytes::from(body)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Capability => "capability",
            Operation::Token { .. } => "token",
            Operation::CreateToken(_) => "create_token",
            Operation::CreateSource(_) => "create_source",
        }
    }
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request ready to be handed to a [`Transport`](crate::client::Transport).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Bytes>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<_> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if *name == AUTHORIZATION_HEADER {
                    (*name, "<redacted>")
                } else {
                    (*name, value.as_str())
                }
            })
            .collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

pub fn build_request(
    operation: &Operation<'_>,
    config: &ClientConfig,
) -> Result<ApiRequest, ClientError> {
    let url = config.servers.endpoint(operation.server(), &operation.path())?;
    let headers = vec![
        (AUTHORIZATION_HEADER, config.public_key.authorization_header()),
        (USER_AGENT_HEADER, config.user_agent.to_string()),
        (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string()),
        (API_VERSION_HEADER, config.api_version.clone()),
    ];
    Ok(ApiRequest {
        method: operation.method(),
        url,
        headers,
        body: operation.body()?,
    })
}
