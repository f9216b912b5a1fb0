#![warn(clippy::all, clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::missing_panics_doc)]
//! # instapro
//!
//! instapro is an async client library for the Instapro automation service.
//!
//! It wraps the service's POST endpoints for:
//! - [`Account`]s and their decoy [`Fake`] profiles
//! - queued [`Action`]s and their results
//! - [`Analyze`] jobs
//! - [`Proxy`]s and [`SubServer`] worker nodes
//! - [`User`]s and their subscriptions
//!
//! Every call is retried by a [`RetryPolicy`]: 3 attempts, 20 ms apart, by default.
//! Failed attempts are reported to a [`LogSink`], which forwards to the `log`
//! crate unless replaced.
//!
//! ## Example: Taking the next action from the queue.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use instapro::{ActionStatus, InstaproApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = InstaproApi::start("127.0.0.1", 8000)?;
//!
//!     if let Some(action) = api.get_action_queue("worker-1").await? {
//!         println!("running {} on {}", action.action_type(), action.account_id());
//!         api.set_status(action.id(), ActionStatus::Completed).await?;
//!     }
//!
//!     api.stop();
//!     Ok(())
//! }
//! ```
//!
//! [`Account`]:   crate::account::Account
//! [`Fake`]:      crate::fake::Fake
//! [`Action`]:    crate::action::Action
//! [`Analyze`]:   crate::analyze::Analyze
//! [`Proxy`]:     crate::proxy::Proxy
//! [`SubServer`]: crate::sub_server::SubServer
//! [`User`]:      crate::user::User

/// [`InstaproApi`] and [`FakeApi`], the two service clients.
pub mod api;

/// Client module contains [`Connection`] and [`ClientBuilder`].
pub mod client;

pub(crate) mod decode;

/// Contains the [`Error`]s that can be returned by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub(crate) mod models;

/// The [`Notifier`] channel and the helpers that use it.
pub mod notify;

pub(crate) mod result;

/// [`RetryPolicy`] and the [`LogSink`] it reports to.
pub mod retry;

pub use api::{FakeApi, InstaproApi, WorkerReply};
pub use client::{ClientBuilder, Connection};
pub use error::Error;
pub use models::*;
pub use models::types::{ActionStatus, ActionType, UsersGetterType, UsersType};
pub use notify::Notifier;
pub use result::Result;
pub use retry::{LogFacade, LogSink, RetryPolicy};
