use std::path::PathBuf;

use clap::{Parser, Subcommand};

use jpaddr_cli::commands::address_ops::{self, FieldArgs, RomanizeAs};
use jpaddr_cli::commands::config_ops;
use jpaddr_cli::logging;

#[derive(Parser)]
#[command(name = "addrtool", about = "Japanese address parsing and romanization")]
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
    /// Split a free-text address into components (JSON)
    Parse {
        /// Address text
        text: String,
    },
    /// Render an address in Western order
    Convert {
        /// Address text; omit to use the field flags
        text: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
        /// Directory holding data/postal/*.json; enables zipcode hints
        #[arg(long)]
        data_dir: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Romanize kana
    Romanize {
        /// Hiragana or katakana
        kana: String,
        /// How to treat the input
        #[arg(long = "as", value_enum, default_value = "plain")]
        mode: RomanizeAs,
    },
    /// Read a kanji or Arabic numeral
    Numeral {
        /// e.g. 二百三十四, 12
        text: String,
    },
    /// Guess the Japanese spelling of a postal romanization
    Reverse {
        /// e.g. "SHIBUYA KU"
        romaji: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = logging::init_tracing(cli.trace_dir.as_deref());
    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Parse { text } => address_ops::parse(&text),
        Command::Convert {
            text,
            fields,
            data_dir,
            json,
        } => address_ops::convert(text.as_deref(), fields, data_dir.as_deref(), json),
        Command::Romanize { kana, mode } => address_ops::romanize(&kana, mode),
        Command::Numeral { text } => address_ops::numeral(&text),
        Command::Reverse { romaji } => address_ops::reverse(&romaji),
    }
}
