//! Markers for compile time tracking of secrecy and zero-ness.
mod secrecy;
mod zero_choice;
pub use secrecy::*;
pub use zero_choice::*;
