/* 📖 # Why have decomment_base as a core library?
decomment_base provides the error type, tracing setup and platform abstraction used by
the engine and the CLI. Keeping them here prevents circular dependencies between crates.
*/

pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{DecommentError, DecommentResult, ErrorKind, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
