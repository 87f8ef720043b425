// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware connections and the active-connection setting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeviceError, ParseError};
use crate::types::DeviceKind;

use super::payload::{entries, record_body};

/// A hardware connection configured on the JMRI server.
///
/// # Examples
///
/// ```
/// use jmri_panel::response::SystemConnection;
/// use jmri_panel::types::DeviceKind;
///
/// let dcc = SystemConnection::new("DCC++", "D");
/// assert_eq!(dcc.device_prefix(DeviceKind::Turnout).as_deref(), Some("DT"));
/// assert_eq!(dcc.device_prefix(DeviceKind::Locomotive), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConnection {
    /// Connection name shown to the operator.
    pub name: String,
    /// System prefix, for example `I` for internal or `L` for `LocoNet`.
    pub prefix: String,
    /// Hardware manufacturer, if reported.
    #[serde(rename = "mfg", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl SystemConnection {
    /// Creates a connection without a manufacturer.
    #[must_use]
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            manufacturer: None,
        }
    }

    /// Returns the identifier prefix for devices of `kind` on this
    /// connection, if the kind uses system names.
    #[must_use]
    pub fn device_prefix(&self, kind: DeviceKind) -> Option<String> {
        kind.type_letter()
            .map(|letter| format!("{}{letter}", self.prefix))
    }

    /// Parses the `/json/systemConnections` payload.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the payload shape is unexpected or an entry
    /// lacks a name or prefix.
    pub fn parse_list(payload: &Value) -> Result<Vec<Self>, ParseError> {
        entries(payload)?
            .into_iter()
            .map(|(_, value)| Self::deserialize(record_body(value)).map_err(ParseError::from))
            .collect()
    }
}

/// The settings panel's choice of active connection.
///
/// Built once from the server's connection list. The first connection is
/// active until another one is selected.
///
/// # Examples
///
/// ```
/// use jmri_panel::response::{ConnectionSettings, SystemConnection};
/// use jmri_panel::types::DeviceKind;
///
/// let mut settings = ConnectionSettings::new(vec![
///     SystemConnection::new("Internal", "I"),
///     SystemConnection::new("LocoNet", "L"),
/// ]);
/// settings.select("loconet").unwrap();
/// assert_eq!(settings.default_prefix(DeviceKind::Light).as_deref(), Some("LL"));
/// assert_eq!(settings.known_prefixes(DeviceKind::Turnout), vec!["IT", "LT"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    connections: Vec<SystemConnection>,
    active: Option<usize>,
}

impl ConnectionSettings {
    /// Creates settings from the server's connections.
    #[must_use]
    pub fn new(connections: Vec<SystemConnection>) -> Self {
        let active = (!connections.is_empty()).then_some(0);
        Self {
            connections,
            active,
        }
    }

    /// Returns every connection.
    #[must_use]
    pub fn connections(&self) -> &[SystemConnection] {
        &self.connections
    }

    /// Returns the active connection.
    #[must_use]
    pub fn active(&self) -> Option<&SystemConnection> {
        self.active.and_then(|index| self.connections.get(index))
    }

    /// Makes the connection called `name` active. Names match ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownConnection` if no connection has that
    /// name; the previous selection is kept.
    pub fn select(&mut self, name: &str) -> Result<&SystemConnection, DeviceError> {
        let index = self
            .connections
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DeviceError::UnknownConnection(name.to_string()))?;
        self.active = Some(index);
        tracing::debug!(connection = %self.connections[index].name, "Selected connection");
        Ok(&self.connections[index])
    }

    /// Returns the prefix new devices of `kind` get on the active connection.
    #[must_use]
    pub fn default_prefix(&self, kind: DeviceKind) -> Option<String> {
        self.active()?.device_prefix(kind)
    }

    /// Returns the device prefixes of every connection for `kind`.
    #[must_use]
    pub fn known_prefixes(&self, kind: DeviceKind) -> Vec<String> {
        self.connections
            .iter()
            .filter_map(|c| c.device_prefix(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_jmri_connection_list() {
        let payload = json!([
            {"type": "systemConnection", "data": {"name": "Internal", "prefix": "I", "mfg": "JMRI"}},
            {"type": "systemConnection", "data": {"name": "NCE", "prefix": "N"}}
        ]);
        let connections = SystemConnection::parse_list(&payload).unwrap();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].manufacturer.as_deref(), Some("JMRI"));
        assert_eq!(connections[1].manufacturer, None);
    }

    #[test]
    fn parse_rejects_entry_without_prefix() {
        let payload = json!([{"name": "Broken"}]);
        assert!(matches!(
            SystemConnection::parse_list(&payload),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn first_connection_is_active_by_default() {
        let settings = ConnectionSettings::new(vec![SystemConnection::new("Internal", "I")]);
        assert_eq!(settings.active().unwrap().name, "Internal");
        assert_eq!(
            settings.default_prefix(DeviceKind::Turnout).as_deref(),
            Some("IT")
        );
    }

    #[test]
    fn unknown_selection_keeps_previous() {
        let mut settings = ConnectionSettings::new(vec![
            SystemConnection::new("Internal", "I"),
            SystemConnection::new("LocoNet", "L"),
        ]);
        let err = settings.select("XpressNet").unwrap_err();
        assert_eq!(err, DeviceError::UnknownConnection("XpressNet".to_string()));
        assert_eq!(settings.active().unwrap().prefix, "I");
    }

    #[test]
    fn empty_settings() {
        let settings = ConnectionSettings::default();
        assert!(settings.active().is_none());
        assert!(settings.known_prefixes(DeviceKind::Light).is_empty());
        assert_eq!(settings.default_prefix(DeviceKind::Light), None);
    }
}
