//! HTTP API: server wiring, routing, and request/response mapping for the
//! EAN payment method.

pub mod app;
pub mod config;
