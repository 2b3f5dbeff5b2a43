//! # TinyRF Core
//!
//! Pulse-width RF link between two single-pin transceivers, timed by one
//! hardware timer and decoded from edge interrupts.
//!
//! ## Modules
//!
//! - `constants`: Protocol defaults and limits
//! - `types`: Symbols, pulses, edges and receiver state
//! - `symbols`: Symbol table shared by both ends
//! - `tolerance`: ±70% receive windows
//! - `timing`: Timer prescaler selection and the pulse counter
//! - `hal`: Hardware traits and the interrupt-masking guard
//! - `encoder`: Frame to symbol/pulse/edge iterators
//! - `transmitter`: Blocking bit-banging transmitter
//! - `decoder`: Edge-driven decoding state machine
//! - `receiver`: Interrupt/main-loop receiver context
//! - `link`: Role-gated public contract
//! - `config`: Link configuration and build-time validation
//! - `scanner`: Whole-trace decoding (std)
//! - `sim`: Host simulation of timer and pins (std)

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hal;
pub mod link;
pub mod receiver;
#[cfg(feature = "std")]
pub mod scanner;
#[cfg(feature = "std")]
pub mod sim;
pub mod symbols;
pub mod timing;
pub mod tolerance;
pub mod transmitter;
pub mod types;

// Re-export commonly used types
pub use config::LinkConfig;
pub use error::ConfigError;
pub use link::Link;
pub use receiver::{EdgeDecoder, FrameSlot, Receiver};
pub use symbols::SymbolTable;
pub use transmitter::Transmitter;
pub use types::{Edge, EdgeEvent, Pulse, PulseSymbol, ReceiverState};

/// Result type alias for TinyRF configuration
pub type Result<T> = core::result::Result<T, ConfigError>;
