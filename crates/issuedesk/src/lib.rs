//! Issuedesk: a small issue tracker.
//!
//! The crate holds the issue domain model, an in-memory record store
//! persisted as JSONL, the query engine (search, filter, sort, paginate),
//! workspace configuration, and the `issuedesk` CLI built on top of them.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod id_generation;
pub mod output;
pub mod query;
pub mod storage;
