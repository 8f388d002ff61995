//! Request authentication
//!
//! The table store authenticates every request with static credentials,
//! so applying auth is a pure transformation of the outgoing request.

use reqwest::RequestBuilder;

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        location: Location,
        /// Header or query parameter name
        name: String,
        /// The API key value
        value: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Create an API key config placed in a header
    pub fn api_key_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            location: Location::Header,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an API key config placed in a query parameter
    pub fn api_key_query(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            location: Location::Query,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthConfig::None => req,

            AuthConfig::ApiKey {
                location,
                name,
                value,
            } => match location {
                Location::Header => req.header(name.as_str(), value.as_str()),
                Location::Query => req.query(&[(name.as_str(), value.as_str())]),
            },

            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),

            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }
}
