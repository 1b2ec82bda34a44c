//! # qc-fork-manager
//!
//! Height-indexed registry of named forks and the handlers that are active
//! under each of them.
//!
//! ## Role in System
//!
//! - **Startup** registers forks at their activation heights, then registers
//!   one handler per (fork, capability).
//! - **Hot path** asks for the handler of a capability at a block height and
//!   gets the one attached to the latest fork activated at or below it.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `ForkName`, `HandlerName`, `Fork`,
//!   `ForkHandler`, `ForkError`
//! - **Ports Layer** (`ports/`): `ForkLookup` for height-only consumers
//! - **Service Layer** (`service`): `ForkManager`
//!
//! The manager is built explicitly and shared through `Arc`; there is no
//! process-wide instance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let forks = Arc::new(ForkManager::new());
//! forks.register_fork(ForkName::LONDON, 100);
//! forks.register_handler(&ForkName::BASE, HandlerName::new("extra"), Codec::V1)?;
//! forks.register_handler(&ForkName::LONDON, HandlerName::new("extra"), Codec::V2)?;
//!
//! assert_eq!(forks.handler(&HandlerName::new("extra"), 150), Codec::V2);
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::ForkManager;
