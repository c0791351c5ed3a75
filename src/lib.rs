//! Bridge between an interactive terminal program and a host that can only
//! make short, non-blocking calls.
//!
//! The host pushes input bytes and pulls rendered output through
//! [`bridge::HostOps`]; resize and pointer events skip the byte stream and
//! land on the program's message channel as typed [`events::HostMessage`]s.
//! The program itself implements [`program::Program`] and runs on its own
//! thread, reading input through a blocking reader.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod echo;
pub mod events;
pub mod host;
pub mod logging;
pub mod program;
