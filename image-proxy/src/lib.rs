//! On-demand image proxy
//!
//! Serves `GET /{bucket}/{file}` by fetching the object from storage and, when
//! `width` or `height` is requested, resizing it before returning it in its
//! original format.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod object_storage;
pub mod processor;
pub mod routes;
pub mod server;
pub mod types;
