use clap::{Args, Parser, Subcommand};

use yomi_cli::commands::convert_ops::{self, AnalyzerArgs};
use yomi_cli::trace_init::init_tracing;
use yomi_core::RawOptions;

#[derive(Parser)]
#[command(name = "yomi", about = "Japanese text to hiragana, katakana or romaji")]
struct Cli {
    /// Emit logs as JSON lines on stderr (filter with YOMI_LOG)
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DictArgs {
    /// Compiled system dictionary
    dict_file: String,
    /// User dictionary (TSV); may be repeated
    #[arg(long = "user-dict")]
    user_dicts: Vec<String>,
    /// Settings TOML file (default: built-in settings)
    #[arg(long)]
    settings: Option<String>,
}

impl DictArgs {
    fn analyzer_args(&self) -> AnalyzerArgs<'_> {
        AnalyzerArgs {
            dict_file: &self.dict_file,
            user_dicts: &self.user_dicts,
            settings_file: self.settings.as_deref(),
        }
    }
}

/// Overrides for the `[convert]` settings table.
#[derive(Args)]
struct ConvertArgs {
    /// Target syllabary: hiragana, katakana or romaji
    #[arg(long)]
    to: Option<String>,
    /// Output mode: normal, spaced, okurigana or furigana
    #[arg(long)]
    mode: Option<String>,
    /// Opening delimiter for okurigana mode
    #[arg(long)]
    delimiter_start: Option<String>,
    /// Closing delimiter for okurigana mode
    #[arg(long)]
    delimiter_end: Option<String>,
    /// Where a kanji run's reading goes when the split is ambiguous: greedy or lazy
    #[arg(long = "policy")]
    align_policy: Option<String>,
    /// Unalignable tokens: fail, or plain to emit them without a reading
    #[arg(long)]
    on_unalignable: Option<String>,
}

impl From<ConvertArgs> for RawOptions {
    fn from(args: ConvertArgs) -> Self {
        RawOptions {
            to: args.to,
            mode: args.mode,
            delimiter_start: args.delimiter_start,
            delimiter_end: args.delimiter_end,
            align_policy: args.align_policy,
            on_unalignable: args.on_unalignable,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert text (reads stdin line by line when TEXT is omitted)
    Convert {
        #[command(flatten)]
        dict: DictArgs,
        /// Text to convert
        text: Option<String>,
        #[command(flatten)]
        options: ConvertArgs,
    },
    /// Show the lattice, N-best segmentations and alignment for a text
    Explain {
        #[command(flatten)]
        dict: DictArgs,
        /// Text to explain
        text: String,
        /// Number of segmentations (default: analyzer.nbest)
        #[arg(short, default_value = "0")]
        n: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        options: ConvertArgs,
    },
    /// Print the analyzer's tokens for a text
    Tokenize {
        #[command(flatten)]
        dict: DictArgs,
        /// Text to tokenize
        text: String,
        /// Number of alternative segmentations
        #[arg(short, default_value = "1")]
        n: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Convert {
            dict,
            text,
            options,
        } => convert_ops::convert_cmd(
            &dict.analyzer_args(),
            text.as_deref(),
            &RawOptions::from(options),
        ),
        Command::Explain {
            dict,
            text,
            n,
            json,
            options,
        } => convert_ops::explain_cmd(
            &dict.analyzer_args(),
            &text,
            n,
            json,
            &RawOptions::from(options),
        ),
        Command::Tokenize {
            dict,
            text,
            n,
            json,
        } => convert_ops::tokenize_cmd(&dict.analyzer_args(), &text, n, json),
    }
}
