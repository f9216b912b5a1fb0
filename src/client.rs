use std::{fmt, future::Future, sync::Arc};

use crate::{
    api::{FakeApi, InstaproApi},
    decode,
    error::Error,
    notify::Notifier,
    result::Result,
    retry::{LogFacade, LogSink, RetryPolicy},
};
use log::Level;
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Shared HTTP plumbing behind both API clients.
///
/// Owns the pooled [`reqwest::Client`], the connection ceiling, the retry policy
/// and the log sink. Built through [`ClientBuilder`].
pub struct Connection {
    http: ReqwestClient,
    host: String,
    port: u16,
    limiter: ConnectionLimit,
    policy: RetryPolicy,
    sink: Arc<dyn LogSink>,
}

#[derive(Debug)]
pub(crate) struct ConnectionLimit {
    pub(crate) permit: Arc<Semaphore>,
}

impl ConnectionLimit {
    pub async fn acquire(&self) -> Result<SemaphorePermit> {
        self.permit.acquire().await.map_err(Into::into)
    }
}

/// What to put on the wire for an optional query value that is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unset {
    /// Leave the key out of the query string.
    Omit,
    /// Send the key with an empty value.
    Empty,
}

/// One outgoing POST request: a path, query pairs and an optional JSON body.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    path: &'static str,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl Call {
    pub(crate) fn new(path: &'static str) -> Self {
        Self {
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub(crate) fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Adds an optional query value. An empty string counts as unset.
    pub(crate) fn param_opt(mut self, key: &'static str, value: Option<&str>, unset: Unset) -> Self {
        match (value.filter(|v| !v.is_empty()), unset) {
            (Some(v), _) => self.query.push((key, v.to_string())),
            (None, Unset::Empty) => self.query.push((key, String::new())),
            (None, Unset::Omit) => {}
        }
        self
    }

    pub(crate) fn path(&self) -> &'static str {
        self.path
    }

    pub(crate) fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub(crate) fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl Connection {
    /// Formats `http://{host}:{port}{method}`.
    pub fn base_url(&self, method: &str) -> String {
        format!("http://{}:{}{}", self.host, self.port, method)
    }

    /// Host the client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port the client talks to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Retry policy applied to every call.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Requests currently allowed to start before the ceiling is hit.
    pub fn available_connections(&self) -> usize {
        self.limiter.permit.available_permits()
    }

    /// Closes the connection ceiling and drops the pool.
    ///
    /// Consuming `self` means no call can still be running, so this is an
    /// explicit drop that also logs the shutdown.
    pub(crate) fn stop(self) {
        self.limiter.permit.close();
        log::debug!("connection to {}:{} stopped", self.host, self.port);
    }

    pub(crate) fn note(&self, method: &str, message: &str) {
        self.sink.log(Level::Info, method, message);
    }

    async fn send(&self, call: &Call) -> Result<Response> {
        let url = self.base_url(call.path());
        let mut builder = self.http.post(&url);
        if !call.query().is_empty() {
            builder = builder.query(call.query());
        }
        if let Some(body) = call.body() {
            builder = builder.json(body);
        }
        log::debug!("request for {} dispatched", url);
        let response = builder.send().await?;
        log::debug!("response status: {}", response.status());
        Ok(response)
    }

    /// Sends `call` and decodes the reply with `decode`, both inside the retry loop.
    ///
    /// Each attempt holds one slot of the ceiling until its body is decoded.
    pub(crate) async fn dispatch<T, D, Fut>(&self, method: &str, call: &Call, decode: D) -> Result<T>
    where
        D: Fn(Response) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let decode = &decode;
        self.policy
            .run(self.sink.as_ref(), method, move || async move {
                let _permit = self.limiter.acquire().await?;
                let response = self.send(call).await?;
                decode(response).await
            })
            .await
    }

    pub(crate) async fn strict<T: DeserializeOwned>(&self, method: &str, call: &Call) -> Result<T> {
        self.dispatch(method, call, decode::strict::<T>).await
    }

    pub(crate) async fn nullable<T: DeserializeOwned>(
        &self,
        method: &str,
        call: &Call,
    ) -> Result<Option<T>> {
        self.dispatch(method, call, decode::nullable::<T>).await
    }

    pub(crate) async fn tolerant<T: DeserializeOwned>(
        &self,
        method: &str,
        call: &Call,
    ) -> Result<Option<T>> {
        self.dispatch(method, call, decode::tolerant::<T>).await
    }

    pub(crate) async fn text(&self, method: &str, call: &Call) -> Result<Option<String>> {
        self.dispatch(method, call, decode::text).await
    }

    pub(crate) async fn discard(&self, method: &str, call: &Call) -> Result<()> {
        self.dispatch(method, call, decode::discard).await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("limiter", &self.limiter)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Configures and starts an [`InstaproApi`] or [`FakeApi`].
///
/// ```no_run
/// # async fn run() -> instapro::Result<()> {
/// use instapro::{ClientBuilder, RetryPolicy};
///
/// let api = ClientBuilder::new("127.0.0.1", 8000)
///     .retry_policy(RetryPolicy::new(5))
///     .start()?;
/// let user = api.get_user("64b7f0").await?;
/// println!("{}", user.telegram_id());
/// api.stop();
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: String,
    port: u16,
    max_connections: usize,
    policy: RetryPolicy,
    sink: Arc<dyn LogSink>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ClientBuilder {
    /// Ceiling on concurrent requests unless configured otherwise.
    pub const DEFAULT_MAX_CONNECTIONS: usize = 50;

    /// Starts a configuration for the service at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            policy: RetryPolicy::default(),
            sink: Arc::new(LogFacade),
            notifier: None,
        }
    }

    /// Sets the ceiling on concurrent requests.
    #[must_use]
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// When `false`, only transport failures are retried.
    #[must_use]
    pub fn retry_decode_errors(mut self, retry: bool) -> Self {
        self.policy = if retry {
            self.policy.with_classifier(|_| true)
        } else {
            self.policy.with_classifier(Error::is_transient)
        };
        self
    }

    /// Replaces the sink receiving retry and creation log lines.
    #[must_use]
    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the channel used by the notification helpers.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn connect(self) -> Result<(Connection, Option<Arc<dyn Notifier>>)> {
        let http = ReqwestClient::builder()
            .pool_max_idle_per_host(self.max_connections)
            .build()?;
        let limiter = ConnectionLimit {
            permit: Arc::new(Semaphore::new(self.max_connections)),
        };
        log::debug!(
            "connection to {}:{} started with {} slots",
            self.host,
            self.port,
            self.max_connections
        );
        let conn = Connection {
            http,
            host: self.host,
            port: self.port,
            limiter,
            policy: self.policy,
            sink: self.sink,
        };
        Ok((conn, self.notifier))
    }

    /// Starts an [`InstaproApi`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn start(self) -> Result<InstaproApi> {
        let (conn, notifier) = self.connect()?;
        Ok(InstaproApi::from_parts(conn, notifier))
    }

    /// Starts a [`FakeApi`]. A configured notifier is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn start_fake(self) -> Result<FakeApi> {
        let (conn, _) = self.connect()?;
        Ok(FakeApi::from_connection(conn))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("policy", &self.policy)
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        ClientBuilder::new("10.0.0.7", 8081).connect().unwrap().0
    }

    #[test]
    fn base_url_formats_host_port_and_path() {
        let conn = connection();
        assert_eq!(
            conn.base_url("/api/fakes/create"),
            "http://10.0.0.7:8081/api/fakes/create"
        );
        assert_eq!(
            conn.base_url("/api/users/get?instance_id=42"),
            "http://10.0.0.7:8081/api/users/get?instance_id=42"
        );
    }

    #[test]
    fn default_ceiling_is_fifty() {
        let conn = connection();
        assert_eq!(conn.available_connections(), 50);
        assert_eq!(conn.policy().max_attempts(), 3);
    }

    #[test]
    fn optional_params_follow_unset_policy() {
        let call = Call::new("/api/story_like/like")
            .param("instance", "nasa")
            .param_opt("last_max_id", None, Unset::Omit)
            .param_opt("bio", Some(""), Unset::Empty)
            .param_opt("cursor", Some("17"), Unset::Omit);
        let keys: Vec<_> = call.query().iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(
            keys,
            vec![("instance", "nasa"), ("bio", ""), ("cursor", "17")]
        );
        assert!(call.body().is_none());
    }

    #[tokio::test]
    async fn stopped_limit_rejects_waiters() {
        let limit = ConnectionLimit {
            permit: Arc::new(Semaphore::new(1)),
        };
        limit.permit.close();
        assert!(matches!(limit.acquire().await, Err(Error::Closed(_))));
    }
}
