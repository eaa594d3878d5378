use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "judgepad", about = "Run code through a remote execution service", version)]
#[command(group(ArgGroup::new("listing").args(["list_languages", "list_themes"]).multiple(false)))]
pub struct Cli {
    /// Source file to submit. Opens the editor when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language tag (see --list-languages). Inferred from the file
    /// extension when omitted.
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// File whose contents are passed to the program as stdin.
    #[arg(long = "stdin-file")]
    pub stdin_file: Option<PathBuf>,

    /// Editor color theme (see --list-themes).
    #[arg(long)]
    pub theme: Option<String>,

    /// List supported languages and exit.
    #[arg(long = "list-languages")]
    pub list_languages: bool,

    /// List editor themes and exit.
    #[arg(long = "list-themes")]
    pub list_themes: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
