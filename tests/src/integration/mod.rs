//! Cross-service flows.

pub mod harness;

mod gateway_flows;
