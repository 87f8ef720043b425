// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the JMRI JSON servlet.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use crate::batch::{DeviceRegistry, ProvisioningContext};
use crate::error::{DeviceError, ProtocolError, Result};
use crate::naming::NamingPolicy;
use crate::response::{ConnectionSettings, SystemConnection, unwrap_records};
use crate::state::{DeviceFields, DeviceRecord};
use crate::types::DeviceKind;

// ============================================================================
// JmriConfig
// ============================================================================

/// Connection parameters for a JMRI web server.
///
/// # Examples
///
/// ```
/// use jmri_panel::protocol::JmriConfig;
/// use std::time::Duration;
///
/// let config = JmriConfig::new("layout.local");
/// assert_eq!(config.base_url(), "http://layout.local:12080");
///
/// let config = JmriConfig::new("layout.local")
///     .with_port(80)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://layout.local");
/// ```
#[derive(Debug, Clone)]
pub struct JmriConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl JmriConfig {
    /// Default port of the JMRI web server.
    pub const DEFAULT_PORT: u16 = 12080;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates a [`JmriClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> std::result::Result<JmriClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(JmriClient {
            base_url: self.base_url(),
            client,
        })
    }
}

// ============================================================================
// JmriClient
// ============================================================================

/// HTTP client for a JMRI server.
///
/// # Examples
///
/// ```no_run
/// use jmri_panel::protocol::JmriClient;
/// use jmri_panel::types::DeviceKind;
///
/// # async fn example() -> jmri_panel::Result<()> {
/// let client = JmriClient::new("http://layout.local:12080")?;
/// for turnout in client.list_devices(DeviceKind::Turnout).await? {
///     println!("{} is {}", turnout.identifier(), turnout.state_label());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JmriClient {
    base_url: String,
    client: Client,
}

/// Body of a create request.
#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    user_name: Option<&'a str>,
    #[serde(flatten)]
    fields: &'a DeviceFields,
}

impl JmriClient {
    /// Creates a client for `host`, which may include a scheme and port.
    ///
    /// A bare host gets `http://` and the default JMRI port.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn new(host: impl Into<String>) -> std::result::Result<Self, ProtocolError> {
        let host = host.into();
        if host.starts_with("http://") || host.starts_with("https://") {
            let client = Client::builder()
                .timeout(JmriConfig::DEFAULT_TIMEOUT)
                .build()
                .map_err(ProtocolError::Http)?;
            Ok(Self {
                base_url: host.trim_end_matches('/').to_string(),
                client,
            })
        } else {
            JmriConfig::new(host).into_client()
        }
    }

    /// Returns the base URL of the server.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn device_url(&self, kind: DeviceKind, identifier: &str) -> String {
        format!(
            "{}/json/{}/{}",
            self.base_url,
            kind.json_type(),
            urlencoding::encode(identifier)
        )
    }

    fn list_url(&self, list_type: &str) -> String {
        format!("{}/json/{list_type}", self.base_url)
    }

    /// Lists every device of `kind`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload cannot be parsed.
    pub async fn list_devices(&self, kind: DeviceKind) -> Result<Vec<DeviceRecord>> {
        let payload = self
            .request(Method::GET, &self.list_url(kind.json_list_type()), None)
            .await?;
        Ok(unwrap_records(kind, &payload)?)
    }

    /// Lists the hardware connections configured on the server.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload cannot be parsed.
    pub async fn system_connections(&self) -> Result<Vec<SystemConnection>> {
        let payload = self
            .request(Method::GET, &self.list_url("systemConnections"), None)
            .await?;
        Ok(SystemConnection::parse_list(&payload)?)
    }

    /// Fetches the connections and wraps them in [`ConnectionSettings`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload cannot be parsed.
    pub async fn connection_settings(&self) -> Result<ConnectionSettings> {
        Ok(ConnectionSettings::new(self.system_connections().await?))
    }

    /// Takes the snapshot a batch of `kind` runs against.
    ///
    /// Existing names are collected according to the kind's
    /// [`NamingPolicy`]; known prefixes come from the system connections.
    ///
    /// # Errors
    ///
    /// Returns error if either request fails or a payload cannot be parsed.
    pub async fn load_context(&self, kind: DeviceKind) -> Result<ProvisioningContext> {
        let records = self.list_devices(kind).await?;
        let settings = self.connection_settings().await?;
        let scope = NamingPolicy::for_kind(kind).scope();

        tracing::debug!(
            %kind,
            records = records.len(),
            connections = settings.connections().len(),
            "Loaded provisioning context"
        );

        Ok(ProvisioningContext::from_records(&records, scope)
            .with_known_prefixes(settings.known_prefixes(kind)))
    }

    /// Sends a request and returns the decoded JSON body.
    ///
    /// An empty body decodes to `Value::Null`.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> std::result::Result<Value, ProtocolError> {
        tracing::debug!(%method, url, "Sending HTTP request");

        let mut request = self.client.request(method, url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status = status.as_u16(), body = %text, "Received HTTP response");

        let payload = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                message: error_message(&payload)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "Unknown".to_string()),
            });
        }
        Ok(payload)
    }
}

/// Extracts the message of a JMRI error payload (`{"type":"error","data":{...}}`).
fn error_message(payload: &Value) -> Option<String> {
    match payload {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Object(_) => payload
            .pointer("/data/message")
            .or_else(|| payload.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

impl DeviceRegistry for JmriClient {
    async fn create_device(
        &self,
        kind: DeviceKind,
        identifier: &str,
        display_name: Option<&str>,
        fields: &DeviceFields,
    ) -> std::result::Result<DeviceRecord, DeviceError> {
        let body = CreateBody {
            name: identifier,
            user_name: display_name.filter(|name| !name.is_empty()),
            fields,
        };
        let creation_error = |message: String| DeviceError::Creation {
            identifier: identifier.to_string(),
            message,
        };
        let body = serde_json::to_value(&body).map_err(|e| creation_error(e.to_string()))?;

        let payload = self
            .request(Method::PUT, &self.device_url(kind, identifier), Some(body))
            .await
            .map_err(|e| creation_error(e.to_string()))?;

        // Older servers answer with an empty body.
        let echoed = match unwrap_records(kind, &payload) {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                tracing::debug!(identifier, error = %e, "Ignoring unparseable create response");
                None
            }
        };
        Ok(echoed.unwrap_or_else(|| {
            DeviceRecord::new(kind, identifier)
                .with_display_name(display_name.unwrap_or_default())
                .with_comment(fields.comment.clone().unwrap_or_default())
                .with_inverted(fields.inverted.unwrap_or(false))
                .with_address(fields.address)
        }))
    }

    async fn set_state(
        &self,
        kind: DeviceKind,
        identifier: &str,
        raw_state: i32,
    ) -> std::result::Result<(), DeviceError> {
        let body = serde_json::json!({ "state": raw_state });
        self.request(Method::POST, &self.device_url(kind, identifier), Some(body))
            .await
            .map(|_| ())
            .map_err(|e| DeviceError::Update {
                identifier: identifier.to_string(),
                message: e.to_string(),
            })
    }
}
