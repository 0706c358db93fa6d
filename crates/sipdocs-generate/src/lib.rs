//! API reference generation for the SIP Protocol docs site.
//!
//! Refreshes the installed SDK, runs TypeDoc over it, prepares the
//! generated markdown for the site and writes the reference landing page.

pub mod generator;
pub mod package;
pub mod process;
pub mod templates;

pub use generator::{ApiDocGenerator, GenerateError, GenerateReport, GeneratorConfig};
pub use process::{CommandSpec, ProcessError, ProcessRunner, SystemRunner};
