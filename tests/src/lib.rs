//! # Storefront Test Suite
//!
//! End-to-end tests that run the real gateway, catalog and auth servers
//! in-process on ephemeral ports.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs        # Starts and stops the three servers
//!     └── gateway_flows.rs  # HTTP and gRPC flows through the gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sf-tests
//! ```

pub mod integration;
