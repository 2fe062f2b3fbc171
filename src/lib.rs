//! VTT Parser Library
//!
//! A Rust library for decoding vehicle tracking terminal messages: textual
//! full position records and the binary delta frames that patch them.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line replay binary
//! - **`json`**: Enable position export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Decode one full record:
//! ```rust
//! use vtt_parser::{MemoryBaselines, MemoryRegistry, TransportContext, VttDecoder};
//!
//! let registry = MemoryRegistry::with_auto_register();
//! let baselines = MemoryBaselines::new();
//! let ctx = TransportContext::default();
//! let mut decoder = VttDecoder::new();
//!
//! let line = b"$POS,123456789,103000.000,A,3723.4567,N,12202.3456,W,10.5,90.0,150324,,,A/00000,00000/0/23895000//";
//! let outcome = decoder
//!     .decode(&ctx, line, &registry, &baselines, false)
//!     .unwrap();
//! let position = outcome.position.unwrap();
//! assert!(position.valid);
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`VttDecoder`] - Per-connection decoder with message dispatch
//! - [`DecodeOutcome`] - Decoded position plus any reply to the device
//!
//! ## Data Types
//! - [`PositionRecord`] - One decoded position with typed attributes
//! - [`DeviceId`] - Opaque device handle
//! - [`Alarm`] - Alarm vocabulary carried by message type tokens
//! - [`StatusWord`] - Unpacked battery/rssi/satellite status
//!
//! ## Session Abstractions
//! - [`IdentityProvider`] / [`BaselineProvider`] - Capabilities the decoder
//!   consumes; implement these against a real device store
//! - [`MemoryRegistry`] / [`MemoryBaselines`] - In-memory implementations
//!   used by the replay tool and tests

pub mod coordinate;
pub mod error;
pub mod export;
pub mod parser;
pub mod session;
pub mod types;

#[allow(ambiguous_glob_reexports)]
pub use coordinate::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use session::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
