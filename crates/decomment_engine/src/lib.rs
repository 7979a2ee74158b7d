pub mod config;
pub mod diff;
pub mod greeter;
pub mod language;
pub mod session;
pub mod stripper;

pub use config::{Config, load_config, resolve_config};
pub use diff::{ColorMode, colorize_diff, unified_diff};
pub use greeter::{Greeter, GreetingMessage, greet, greeting_message};
pub use language::{LanguageRegistry, LanguageRules, builtin_languages};
pub use session::{StripOptions, StripReport, strip_file, stripped_path};
pub use stripper::{StripOutcome, strip_comments};
