use crate::config::SubgraphConfig;
use crate::error::DataError;
use crate::retry::RetryPolicy;
use crate::subgraph::query::GraphQlQuery;
use crate::subgraph::transport::{HttpTransport, Transport};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Executes queries against the subgraph, retrying failed attempts according
/// to a [`RetryPolicy`].
#[derive(Debug)]
pub struct SubgraphClient<T = HttpTransport> {
    transport: T,
    retry: RetryPolicy,
}

impl SubgraphClient<HttpTransport> {
    /// Creates a client talking HTTPS to the configured endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SubgraphConfig, retry: RetryPolicy) -> Result<Self, DataError> {
        Ok(Self::new(HttpTransport::new(config)?, retry))
    }
}

impl<T: Transport> SubgraphClient<T> {
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs the query and decodes its `data` object into `D`.
    ///
    /// # Errors
    /// - [`DataError::QueryExhausted`] once every attempt has failed.
    /// - [`DataError::GraphQl`] if the server reports query errors.
    /// - [`DataError::MalformedResponse`] if `data` is missing or does not
    ///   match `D`. Neither of the last two is retried.
    pub async fn execute<D>(&self, query: &GraphQlQuery) -> Result<D, DataError>
    where
        D: DeserializeOwned,
    {
        let body = self.execute_raw(query).await?;
        into_data(body)
    }

    /// Runs the query with retries and returns the raw response body.
    pub async fn execute_raw(&self, query: &GraphQlQuery) -> Result<Value, DataError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.transport.send(query).await {
                Ok(body) => {
                    debug!(attempt, "subgraph query succeeded");
                    return Ok(body);
                }
                Err(err) => {
                    warn!(attempt, max_attempts, error = %err, "subgraph query attempt failed");
                    if attempt >= max_attempts {
                        return Err(DataError::QueryExhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }
                    let delay = self.retry.delay();
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: String,
}

/// Extracts `data` from a GraphQL response body.
fn into_data<D>(body: Value) -> Result<D, DataError>
where
    D: DeserializeOwned,
{
    let Value::Object(mut body) = body else {
        return Err(DataError::MalformedResponse(
            "response body is not a JSON object".to_string(),
        ));
    };

    if let Some(errors) = body.remove("errors").filter(|errors| !errors.is_null()) {
        let errors: Vec<QueryError> = serde_json::from_value(errors)
            .map_err(|err| DataError::MalformedResponse(format!("invalid `errors`: {err}")))?;
        if let Some((first, rest)) = errors.split_first() {
            // Bubble up the first error, log the others.
            for error in rest {
                warn!("additional GraphQL error: {}", error.message);
            }
            return Err(DataError::GraphQl(first.message.clone()));
        }
    }

    match body.remove("data") {
        None | Some(Value::Null) => Err(DataError::MalformedResponse(
            "missing `data`".to_string(),
        )),
        Some(data) => {
            serde_json::from_value(data).map_err(|err| DataError::MalformedResponse(err.to_string()))
        }
    }
}
