//! # Quantum-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Flows across codec, fork registry and extra data
//! └── benches/           # Criterion benchmarks for the codec hot paths
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::
//! cargo bench -p qc-tests
//! ```

pub mod fixtures;
pub mod integration;
