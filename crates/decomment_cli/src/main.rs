/* 📖 # How is the CLI organised?

Three subcommands, each a thin shell over the engine:

- `decomment greet [NAME]` prints `Hello, NAME!` (NAME defaults to `World`)
- `decomment strip FILE` removes comments from FILE, shows the diff and asks before
  replacing it
- `decomment languages` lists the comment rules that `strip` knows

All paths are resolved against the current directory through a RealPal.

Exit codes:
- 0: Success (including "no comments found" and a declined replacement)
- 1: Error (unsupported file type, unreadable file, invalid config, failed replace)
- 2: Invalid command line
*/

use std::env;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use decomment_base::tracing::init_tracing;
use decomment_base::{DecommentResult, FilePath, PalHandle, RealPal};
use decomment_engine::{ColorMode, Greeter, StripOptions, resolve_config, strip_file};

#[derive(Debug, Parser)]
#[command(name = "decomment", version, about = "Remove comments from source files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a greeting
    Greet {
        /// Who to greet
        #[arg(default_value = "World")]
        name: String,
    },
    /// Strip comments from a source file
    Strip {
        /// File to strip
        file: PathBuf,
        /// Replace the original without asking
        #[arg(short, long)]
        yes: bool,
        /// Configuration file (defaults to ./decomment.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// When to color the diff
        #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
        color: ColorArg,
    },
    /// List supported languages and their extensions
    Languages {
        /// Configuration file (defaults to ./decomment.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

fn run(command: Command, pal: &PalHandle) -> DecommentResult<()> {
    match command {
        Command::Greet { name } => {
            Greeter::new(pal.clone()).greet(&name);
        }
        Command::Strip {
            file,
            yes,
            config,
            color,
        } => {
            let config_path = config.as_deref().map(FilePath::try_from).transpose()?;
            let config = resolve_config(pal, config_path.as_ref())?;
            let options = StripOptions {
                assume_yes: yes,
                color: color.into(),
            };
            let file = FilePath::try_from(file.as_path())?;
            let report = strip_file(pal, &config, &file, &options)?;
            debug!(?report, "strip finished");
        }
        Command::Languages { config } => {
            let config_path = config.as_deref().map(FilePath::try_from).transpose()?;
            let config = resolve_config(pal, config_path.as_ref())?;
            let mut listing = String::new();
            for rules in config.registry().languages() {
                listing.push_str(&format!("{}: {}\n", rules.name, rules.extensions.join(" ")));
            }
            pal.write_stdout(&listing)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: {}", e);
    }

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });
    let pal = PalHandle::new(RealPal::new(current_dir));

    if let Err(e) = run(cli.command, &pal) {
        debug!("{:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
