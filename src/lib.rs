//! AirDraw vision backend: captions drawings, builds illustration URLs and
//! proxies short chat replies.

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![deny(warnings)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chat;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod illustration;
pub mod imaging;
pub mod pipeline;
pub mod provider;
pub mod storage;
pub mod vision;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
