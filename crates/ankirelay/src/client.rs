//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::actions::{
    CardActions, DeckActions, GuiActions, MiscActions, ModelActions, NoteActions,
    StatisticsActions,
};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse, Envelope};

/// Default URL for AnkiConnect.
pub const DEFAULT_URL: &str = "http://localhost:8765";

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The client for issuing AnkiConnect calls.
///
/// Every call is a single `POST` of `{action, version, params}` with no
/// retries. Clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use ankirelay::AnkiClient;
///
/// # async fn example() -> ankirelay::Result<()> {
/// let client = AnkiClient::builder().url("http://localhost:8765").build()?;
///
/// let decks = client.decks().names_and_ids().await?;
/// println!("{}", decks);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl AnkiClient {
    /// Create a client with default settings.
    ///
    /// Connects to `http://localhost:8765` with a 30 second timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The AnkiConnect endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Return a clone whose calls are abandoned once `token` is cancelled.
    ///
    /// A call made after the token fired fails with [`Error::Cancelled`]
    /// without touching the network. A call in flight when it fires is
    /// dropped, which aborts the HTTP exchange.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Access card operations.
    pub fn cards(&self) -> CardActions<'_> {
        CardActions { client: self }
    }

    /// Access note and tag operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access model (note type) operations.
    pub fn models(&self) -> ModelActions<'_> {
        ModelActions { client: self }
    }

    /// Access GUI operations.
    pub fn gui(&self) -> GuiActions<'_> {
        GuiActions { client: self }
    }

    /// Access statistics operations.
    pub fn statistics(&self) -> StatisticsActions<'_> {
        StatisticsActions { client: self }
    }

    /// Access miscellaneous operations.
    pub fn misc(&self) -> MiscActions<'_> {
        MiscActions { client: self }
    }

    /// Call an action and return its raw result.
    ///
    /// `params` must serialize to a JSON object; `null` (e.g. `()` or `None`)
    /// is sent as `{}`. The result is returned unchanged and may be
    /// [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParams`] if `params` is not an object
    /// - [`Error::ConnectionRefused`] / [`Error::Http`] / [`Error::Json`] on transport failure
    /// - [`Error::Cancelled`] / [`Error::TimedOut`] if the call was abandoned
    /// - [`Error::AnkiConnect`] if the envelope carries an error message
    pub async fn call<P>(&self, action: &str, params: P) -> Result<Value>
    where
        P: Serialize,
    {
        let params = object_params(action, serde_json::to_value(params)?)?;
        let request = AnkiRequest::new(action, params, self.api_key.as_deref());
        debug!(action, "Calling AnkiConnect");

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(action, "AnkiConnect call cancelled");
                        Err(Error::Cancelled)
                    }
                    result = self.send_request(&request) => result,
                }
            }
            None => self.send_request(&request).await,
        }
    }

    /// Call an action that takes no parameters.
    pub async fn call_without_params(&self, action: &str) -> Result<Value> {
        self.call(action, Map::new()).await
    }

    /// Send a request to AnkiConnect and unwrap the envelope.
    async fn send_request(&self, request: &AnkiRequest<'_>) -> Result<Value> {
        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.transport_error(e))?;

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let envelope: Envelope = serde_json::from_slice::<AnkiResponse>(&body)?.into();

        match envelope {
            Envelope::Success(result) => {
                trace!(action = request.action, "AnkiConnect call succeeded");
                Ok(result)
            }
            Envelope::Failure(message) => {
                debug!(action = request.action, error = %message, "AnkiConnect reported an error");
                Err(Error::AnkiConnect(message))
            }
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::TimedOut(self.timeout)
        } else if e.is_connect() {
            Error::ConnectionRefused
        } else {
            Error::Http(e)
        }
    }
}

fn object_params(action: &str, params: Value) -> Result<Value> {
    let found = match params {
        Value::Null => return Ok(Value::Object(Map::new())),
        Value::Object(_) => return Ok(params),
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
    };
    Err(Error::InvalidParams {
        action: action.to_string(),
        found,
    })
}

/// Builder for creating a customized [`AnkiClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ankirelay::AnkiClient;
///
/// # fn example() -> ankirelay::Result<()> {
/// let client = AnkiClient::builder()
///     .url("http://localhost:8765")
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://localhost:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    ///
    /// Only required if AnkiConnect is configured to require an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AnkiClient> {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(AnkiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            timeout: self.timeout,
            cancel: None,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
