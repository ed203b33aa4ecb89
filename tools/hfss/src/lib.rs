//! HFSS automation script generation.
//!
//! Generates VBScript commands that configure HFSS designs. Commands are
//! appended to a caller-supplied [`std::io::Write`]; opening, ordering, and
//! running the resulting script is left to the caller.
#![warn(missing_docs)]

pub mod error;
pub mod optimetrics;
