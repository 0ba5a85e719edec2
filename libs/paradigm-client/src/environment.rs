//! Paradigm operating environments

use std::fmt;
use std::str::FromStr;

/// Venue environment the taker runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Prod,
}

impl Environment {
    /// Lowercase name used in venue hostnames
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// RESToverHTTP base URL
    pub fn http_url(&self) -> String {
        format!("https://api.fs.{}.paradigm.co", self.name())
    }

    /// JSONRPCoverWebSocket URL (without the api-key query)
    pub fn ws_url(&self) -> String {
        format!("wss://ws.api.fs.{}.paradigm.co/v1/fs", self.name())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TEST" => Ok(Environment::Test),
            "PROD" => Ok(Environment::Prod),
            other => Err(format!(
                "unknown environment '{}', expected TEST or PROD",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}
