//! Application layer orchestrating gateways, stored gateway records and the
//! transaction ledger.
//!
//! `GatewayManager` is the entry point the checkout talks to: it turns a
//! stored record into a configured gateway, runs purchases through it and
//! records each attempt.

pub mod manager;
