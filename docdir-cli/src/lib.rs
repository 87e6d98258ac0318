//! Command line and HTTP front end for `docdir`.
//!
//! The server maps `GET /{upper}/getcontent` plus a `content` header onto a
//! document collection, resolves its current documents and hands each one to
//! the handler for its type.

pub mod cli;
pub mod handlers;
pub mod logging;
pub mod server;
