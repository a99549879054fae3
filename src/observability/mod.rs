//! Structured logging with optional file output.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer ─┬→ JSON lines → FileWriter (rotating)
//!                                         └→ plain text → stderr
//! ```
//!
//! # Features
//!
//! - **File Output**: JSON lines written to `log_file` when configured
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Span Context**: Each line carries the current span (`dispatch`, `model_event`)
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup ([`init_tracing`])
//! - [`FileWriter`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{FileWriter, FileWriterHandle};
pub use init::init_tracing;
