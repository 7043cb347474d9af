//! # foopoc
//!
//! Foo CRUD service on PostgreSQL with an OpenID Connect login flow and a
//! bearer-token access guard.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod service;
pub mod store;
