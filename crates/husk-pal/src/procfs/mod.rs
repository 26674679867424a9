//! Parsing helpers for the `/proc` files the PAL reads.
//!
//! Keeping these as pure string/byte parsers lets the native adapter stay a
//! thin read-then-parse layer and keeps the format knowledge testable without
//! a live `/proc`.

pub mod cmdline;
pub mod mountinfo;
pub mod status;
pub mod uptime;
