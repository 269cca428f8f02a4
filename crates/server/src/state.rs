use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use matcher::SelectorConfig;
use pincode::{HttpPincodeClient, PincodeLookup};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Post-office source (shared across requests)
    pub lookup: Arc<dyn PincodeLookup>,

    /// Best-match selection settings derived from the configuration
    pub selector: SelectorConfig,
}

impl ServerState {
    /// Create new server state backed by the HTTP postal lookup
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let client = HttpPincodeClient::new(config.pincode.clone())
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(Self::with_lookup(config, Arc::new(client)))
    }

    /// Create server state around an existing lookup
    pub fn with_lookup(config: ServerConfig, lookup: Arc<dyn PincodeLookup>) -> Self {
        let selector = config.selector();
        Self {
            config: Arc::new(config),
            lookup,
            selector,
        }
    }
}
