//! Consolidated type definitions for the risk simulator SDK.
//!
//! Request and response bodies for the backend endpoints, plus the
//! client-side models built from them.

mod account;
mod error_body;
mod risk;
mod simulation;

pub use account::*;
pub use error_body::*;
pub use risk::*;
pub use simulation::*;
