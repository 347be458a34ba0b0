//! Upload client for the remote plugin repository.
//!
//! The repository exposes a `plugin.upload` XML-RPC method taking the
//! archive bytes and answering with a `(plugin_id, version_id)` pair.
//! Protocol encoding uses the `xmlrpc` crate over a blocking `reqwest`
//! transport with HTTP basic auth.

use crate::config::ServerConfig;
use crate::error::BuildError;
use crate::error::Result;
use std::fs;
use std::path::Path;
use xmlrpc::Request;
use xmlrpc::Transport;
use xmlrpc::Value;

/// Credentials for the plugin repository.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Repository user name.
    pub username: String,
    /// Repository password.
    pub password: String,
}

impl Credentials {
    /// Validates that both parts are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when either part is empty; uploads
    /// without credentials are never attempted.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() || password.is_empty() {
            return Err(BuildError::Config {
                reason: "provide user and passwd options to upload".to_string(),
            });
        }
        Ok(Self { username, password })
    }
}

/// Identifier pair assigned by the repository on a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Repository-assigned plugin identifier.
    pub plugin_id: i64,
    /// Repository-assigned version identifier.
    pub version_id: i64,
}

/// Client for one plugin repository endpoint.
pub struct RepositoryClient {
    client: reqwest::blocking::Client,
    url: String,
    credentials: Credentials,
}

impl RepositoryClient {
    /// Creates a client for the given server parameters.
    #[must_use]
    pub fn new(server: &ServerConfig, credentials: Credentials) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: server.url(),
            credentials,
        }
    }

    /// The endpoint URL this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Uploads the archive at `path`.
    ///
    /// The archive file itself is left in place; deleting it after a
    /// successful upload is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns `UploadFault` when the server answers with an XML-RPC
    /// fault, `Transport` for HTTP or connection failures (the message
    /// carries the HTTP status when there is one), and `InvalidReceipt`
    /// when the response is not a two-integer array.
    pub fn upload_archive(&self, path: &Path) -> Result<UploadReceipt> {
        let bytes = fs::read(path)?;
        self.upload_bytes(bytes)
    }

    /// Uploads raw archive bytes.
    pub fn upload_bytes(&self, bytes: Vec<u8>) -> Result<UploadReceipt> {
        let request = Request::new("plugin.upload").arg(Value::Base64(bytes));
        let transport = BasicAuthTransport {
            client: &self.client,
            url: &self.url,
            credentials: &self.credentials,
        };
        let value = request.call(transport).map_err(|e| {
            e.fault().map_or_else(
                || BuildError::Transport {
                    message: e.to_string(),
                },
                |fault| BuildError::UploadFault {
                    code: fault.fault_code,
                    message: fault.fault_string.clone(),
                },
            )
        })?;
        parse_receipt(&value)
    }
}

/// Blocking HTTP transport with basic auth for the XML-RPC call.
struct BasicAuthTransport<'a> {
    client: &'a reqwest::blocking::Client,
    url: &'a str,
    credentials: &'a Credentials,
}

impl Transport for BasicAuthTransport<'_> {
    type Stream = reqwest::blocking::Response;

    fn transmit(
        self,
        request: &Request<'_>,
    ) -> std::result::Result<Self::Stream, Box<dyn std::error::Error + Send + Sync>> {
        let mut body = Vec::new();
        request.write_as_xml(&mut body)?;

        let response = self
            .client
            .post(self.url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}").into());
        }
        Ok(response)
    }
}

/// Decodes the `(plugin_id, version_id)` response pair.
fn parse_receipt(value: &Value) -> Result<UploadReceipt> {
    let items = value.as_array().ok_or_else(|| BuildError::InvalidReceipt {
        reason: format!("expected an array, got {value:?}"),
    })?;

    match items {
        [plugin, version] => Ok(UploadReceipt {
            plugin_id: receipt_id(plugin)?,
            version_id: receipt_id(version)?,
        }),
        _ => Err(BuildError::InvalidReceipt {
            reason: format!("expected two elements, got {}", items.len()),
        }),
    }
}

fn receipt_id(value: &Value) -> Result<i64> {
    value
        .as_i64()
        .or_else(|| value.as_i32().map(i64::from))
        .ok_or_else(|| BuildError::InvalidReceipt {
            reason: format!("identifier is not an integer: {value:?}"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_required() {
        assert!(Credentials::new("user", "").is_err());
        assert!(Credentials::new("", "passwd").is_err());
        assert!(Credentials::new("user", "passwd").is_ok());
    }

    #[test]
    fn test_parse_receipt_int_pair() {
        let value = Value::Array(vec![Value::Int(17), Value::Int(42)]);
        let receipt = parse_receipt(&value).unwrap();
        assert_eq!(receipt.plugin_id, 17);
        assert_eq!(receipt.version_id, 42);
    }

    #[test]
    fn test_parse_receipt_int64_pair() {
        let value = Value::Array(vec![Value::Int64(5_000_000_000), Value::Int(1)]);
        let receipt = parse_receipt(&value).unwrap();
        assert_eq!(receipt.plugin_id, 5_000_000_000);
        assert_eq!(receipt.version_id, 1);
    }

    #[test]
    fn test_parse_receipt_rejects_wrong_shape() {
        assert!(parse_receipt(&Value::Int(1)).is_err());
        assert!(parse_receipt(&Value::Array(vec![Value::Int(1)])).is_err());
        assert!(
            parse_receipt(&Value::Array(vec![
                Value::String("x".to_string()),
                Value::Int(1),
            ]))
            .is_err()
        );
    }

    #[test]
    fn test_client_url_from_server_config() {
        let server = ServerConfig::default()
            .with_host("repo.example.org")
            .with_port(8080);
        let credentials = Credentials::new("u", "p").unwrap();
        let client = RepositoryClient::new(&server, credentials);
        assert_eq!(client.url(), "http://repo.example.org:8080/RPC2/");
    }

    #[test]
    fn test_upload_to_unreachable_host_is_transport_error() {
        // Nothing listens on port 1; the connection is refused
        let server = ServerConfig::default()
            .with_host("127.0.0.1")
            .with_port(1);
        let credentials = Credentials::new("u", "p").unwrap();
        let client = RepositoryClient::new(&server, credentials);

        let err = client.upload_bytes(vec![1, 2, 3]).unwrap_err();
        assert!(err.is_upload_failure());
    }
}
