//! Settings sent by the client in `initializationOptions`.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Maximum number of completion items returned per request.
    pub completion_limit: usize,
    /// Index every `.c3`/`.c3i` file under the workspace root on startup.
    pub index_workspace: bool,
    pub signature_help: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            completion_limit: 256,
            index_workspace: true,
            signature_help: true,
        }
    }
}

impl ServerConfig {
    /// Options the client did not send keep their defaults. Options that
    /// do not deserialize are ignored as a whole.
    pub fn from_options(options: Option<Value>) -> Self {
        match options {
            None | Some(Value::Null) => ServerConfig::default(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(%err, "invalid initializationOptions, using defaults");
                ServerConfig::default()
            }),
        }
    }
}
