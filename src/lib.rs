//! beephook - push-to-chat webhook gateway
//!
//! beephook bridges repository push events to the beep chat API and
//! supports remote self-update via a signed webhook. One process, one
//! HTTP listener:
//!
//! ```text
//!   forge ── POST /webhook ──► signature check ──► beep /api/post/new_post
//!   forge ── POST /update  ──► signature check ──► git pull --ff-only origin
//!   anyone ── GET /        ──► status + HEAD revision
//! ```
//!
//! Both POST routes are authenticated with an `X-Hub-Signature` HMAC
//! header, each against its own shared secret. The chat session is
//! logged in once at startup and reused, read-only, for every relayed
//! post; it is logged out best-effort at exit.
//!
//! ## Modules
//!
//! - [`server`]: HTTP routes and handlers
//! - [`signature`]: webhook signature verification
//! - [`beep`]: beep chat API client
//! - [`repo`]: local git working copy operations
//! - [`push`]: push event payload and message formatting
//! - [`config`]: environment configuration

pub mod beep;
pub mod config;
pub mod error;
pub mod push;
pub mod repo;
pub mod server;
pub mod signature;

pub use config::Config;
pub use error::{Error, Result};
