// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account credentials and session token.

use serde::Deserialize;

/// Username and password of the provider account.
///
/// Can be deserialized from a configuration entry. Both the plain keys and
/// the `config_`-prefixed keys used by existing configuration entries are
/// accepted.
///
/// # Examples
///
/// ```
/// use onthemove_lib::protocol::Credentials;
///
/// let creds: Credentials =
///     serde_json::from_str(r#"{"username": "bob", "password": "hunter2"}"#).unwrap();
/// assert_eq!(creds.username(), "bob");
///
/// // The password never shows up in debug output
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(alias = "config_username")]
    username: String,
    #[serde(alias = "config_password")]
    password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque session token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token, as sent in the `x-auth-token` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_plain_keys() {
        let creds: Credentials =
            serde_json::from_str(r#"{"username":"bob","password":"secret"}"#).unwrap();
        assert_eq!(creds, Credentials::new("bob", "secret"));
    }

    #[test]
    fn deserialize_prefixed_keys() {
        let creds: Credentials = serde_json::from_str(
            r#"{"config_username":"bob","config_password":"secret"}"#,
        )
        .unwrap();
        assert_eq!(creds.username(), "bob");
        assert_eq!(creds.password(), "secret");
    }

    #[test]
    fn deserialize_missing_password_fails() {
        assert!(serde_json::from_str::<Credentials>(r#"{"username":"bob"}"#).is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("bob", "secret"));
        assert!(debug.contains("bob"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn token_debug_redacts_value() {
        let token = AuthToken::new("T1");
        assert_eq!(token.as_str(), "T1");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
    }
}
