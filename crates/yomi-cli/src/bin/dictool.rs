use clap::{Parser, Subcommand};

use yomi_cli::commands::{config_ops, dict_ops};
use yomi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "dictool", about = "Yomi lexicon build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a lexicon from raw files
    Compile {
        /// Lexicon source: tsv or ipadic
        #[arg(long, default_value = "tsv")]
        source: String,
        /// Input directory
        input_dir: String,
        /// Output file
        output_file: String,
    },
    /// Show lexicon info
    Info {
        /// Compiled lexicon file
        file: String,
    },
    /// Merge two lexicons
    Merge {
        /// Maximum cost to keep
        #[arg(long)]
        max_cost: Option<i16>,
        /// Maximum surface length (in characters)
        #[arg(long)]
        max_surface_len: Option<usize>,
        /// First lexicon
        dict_a: String,
        /// Second lexicon
        dict_b: String,
        /// Output file
        output_file: String,
    },
    /// Look up a surface in the lexicon (exact match)
    Lookup {
        /// Lexicon file
        dict_file: String,
        /// Surface form to look up
        surface: String,
    },
    /// Common-prefix search (all surfaces that are prefixes of the query)
    Prefix {
        /// Lexicon file
        dict_file: String,
        /// Query text
        query: String,
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
    init_tracing(false);

    match cli.command {
        Command::Compile {
            source,
            input_dir,
            output_file,
        } => dict_ops::compile(&source, &input_dir, &output_file),
        Command::Info { file } => dict_ops::info(&file),
        Command::Merge {
            max_cost,
            max_surface_len,
            dict_a,
            dict_b,
            output_file,
        } => {
            let opts = dict_ops::MergeOptions {
                max_cost,
                max_surface_len,
            };
            dict_ops::merge(&dict_a, &dict_b, &output_file, &opts);
        }
        Command::Lookup { dict_file, surface } => dict_ops::lookup(&dict_file, &surface),
        Command::Prefix { dict_file, query } => dict_ops::prefix(&dict_file, &query),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
