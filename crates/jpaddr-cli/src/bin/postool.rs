use std::path::PathBuf;

use clap::{Parser, Subcommand};

use jpaddr_cli::commands::lookup_ops::LookupKind;
use jpaddr_cli::commands::{build_ops, config_ops, lookup_ops};
use jpaddr_cli::logging;

#[derive(Parser)]
#[command(name = "postool", about = "Japan Post zipcode dataset tool")]
struct Cli {
    /// Write JSON trace lines to <DIR>/jpaddr-trace.jsonl
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a Japan Post table
    Fetch {
        /// Table source (ken-all, ken-all-rome)
        #[arg(long, default_value = "ken-all")]
        source: String,
        /// Output directory
        output_dir: String,
    },
    /// Build a zipcode index from a raw table
    Build {
        /// Table source (ken-all, ken-all-rome)
        #[arg(long, default_value = "ken-all")]
        source: String,
        /// Raw CSV/TSV file
        input_file: String,
        /// Output JSON index
        output_file: String,
    },
    /// Show index counts and a few sample entries
    Info {
        /// JSON index file
        file: String,
    },
    /// Print the lookup response for a zipcode
    Lookup {
        /// Dataset kind
        #[arg(long, value_enum, default_value = "kanji")]
        kind: LookupKind,
        /// JSON index file
        dataset: String,
        /// Zipcode (hyphens and full-width digits allowed)
        zipcode: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = logging::init_tracing(cli.trace_dir.as_deref());
    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Fetch { source, output_dir } => build_ops::fetch(&source, &output_dir),
        Command::Build {
            source,
            input_file,
            output_file,
        } => build_ops::build(&source, &input_file, &output_file),
        Command::Info { file } => build_ops::info(&file),
        Command::Lookup {
            kind,
            dataset,
            zipcode,
        } => lookup_ops::lookup(kind, &dataset, &zipcode),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
