/* 📖 # What is the Platform Abstraction Layer?

Every side effect decomment performs goes through the `Pal` trait: reading the source file,
writing the stripped copy, replacing the original, printing to stdout and reading the
confirmation answer from stdin. MockPal implements all of it in memory, so the greeter and
the strip workflow are tested without a terminal or a filesystem.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle};
