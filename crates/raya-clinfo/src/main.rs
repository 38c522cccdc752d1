//! raya-clinfo
//!
//! Dumps OpenCL platforms, devices and the binding's catalogs.

use clap::{Parser, Subcommand};
use log::debug;

use raya_clinfo::commands;
use raya_clinfo::output::{resolve_color_choice, StyledOutput};
use raya_clinfo::{Backend, Session};

/// Environment variable with an `env_logger` filter that overrides `-v`
const LOG_ENV: &str = "RAYA_CL_LOG";

#[derive(Parser)]
#[command(name = "raya-clinfo")]
#[command(about = "Inspect OpenCL through the Raya bindings", long_about = None)]
#[command(version)]
struct Cli {
    /// Use the in-memory driver instead of the system OpenCL loader
    #[arg(long, global = true)]
    fake: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    color: Option<String>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List platforms and their devices with every info property
    Platforms {
        /// Device type filter, `|`-separated (e.g. "cpu|gpu")
        #[arg(short = 't', long = "type", default_value = "all")]
        device_type: String,
    },

    /// Show the API revision and optional features compiled in
    Features,

    /// List enumeration names and values
    Enums {
        /// Only this enumeration type (e.g. device_type)
        name: Option<String>,
    },

    /// List error codes, or translate one
    Errors {
        /// Status code to translate
        #[arg(allow_hyphen_values = true)]
        code: Option<i64>,
    },

    /// Completion candidates for the word at LINE[START..END]
    Complete {
        /// Whole console line
        line: String,
        /// Byte offset where the word starts
        start: usize,
        /// Byte offset where the word ends
        end: usize,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::new().filter_or(LOG_ENV, level);
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let backend = if cli.fake { Backend::Fake } else { Backend::Native };
    debug!("backend: {:?}", backend);
    let mut out = StyledOutput::stdout(resolve_color_choice(cli.color.as_deref()));

    match cli.command {
        Commands::Platforms { device_type } => {
            let session = Session::open(backend)?;
            commands::platforms::execute(&session, &mut out, &device_type, cli.json)?;
        }
        Commands::Features => {
            let session = Session::open(backend)?;
            commands::features::execute(&session, &mut out, cli.json)?;
        }
        Commands::Enums { name } => {
            commands::enums::execute(&mut out, name.as_deref(), cli.json)?;
        }
        Commands::Errors { code } => {
            let session = Session::open(backend)?;
            commands::errors::execute(&session, &mut out, code, cli.json)?;
        }
        Commands::Complete { line, start, end } => {
            let session = Session::open(backend)?;
            commands::complete::execute(&session, &mut out, &line, start, end, cli.json)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
