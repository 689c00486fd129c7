// app/src/lib.rs

//! Multi-tenant co-op group-buy backend: signup with HQ approval, store
//! products, time-boxed co-ops and orders against them.
//!
//! Every multi-write operation is a `hookline` workflow (see `workflows`)
//! driven by a service (see `services`) that compensates on failure.

pub mod config;
pub mod errors;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
pub mod workflows;
