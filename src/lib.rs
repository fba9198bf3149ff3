#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PushButton`**: Debounced event engine for a single button
//! - **`EdgeLatch`**: Interrupt-context edge capture and flag handoff to the engine
//! - **`InputLine`**: Trait to implement for your GPIO line
//! - **`Timer`**: Trait to implement for your one-shot / periodic timer
//! - **`Notifier`**: Handle a timer calls on expiry to wake the engine
//! - **`ButtonConfig`**: Polarity, pull, glitch filter window and debug traces
//! - **`Outcome`**: What the engine did with a batch of flags
//!
//! Edges are captured in interrupt context, classified in task context after
//! the glitch filter window, and delivered as Press, Hold and Release
//! callbacks. Line triggers stay disarmed from the moment an edge fires until
//! the engine has classified it.

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod filter;
pub mod hold;
pub mod latch;
pub mod line;
pub mod registry;
pub mod signal;
pub mod timer;

pub use button::{Outcome, PushButton, Serviced};
pub use config::{ButtonConfig, ConfigError, DEFAULT_FILTER_TIMEOUT_US, Polarity};
pub use filter::{Decision, classify};
pub use hold::HoldScheduler;
pub use latch::EdgeLatch;
pub use line::{Edge, InputLine, Level, NoLine, Pull};
pub use registry::{CallbackSlot, Callbacks, EventKind, IdHandler, PlainHandler};
pub use signal::{Flag, FlagSet};
pub use timer::{Notifier, Timer};
