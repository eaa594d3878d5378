mod cli;
mod config;
mod encode;
mod handlers;
mod judge;
mod languages;
mod printer;
mod session;
mod tui;

use anyhow::{anyhow, bail, Result};
use config::Config;
use is_terminal::IsTerminal;
use session::EditorSession;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let cfg = Config::load();

    if args.list_languages {
        for l in languages::LANGUAGES {
            println!("{:<12} {}", l.tag, l.name);
        }
        return Ok(());
    }
    if args.list_themes {
        for t in tui::theme::THEMES {
            println!("{}", t.name);
        }
        return Ok(());
    }

    // Resolve language: CLI flag, then file extension, then config default.
    let language = if let Some(tag) = args.language.as_deref() {
        languages::find(tag)
            .ok_or_else(|| anyhow!("unknown language '{}'; see --list-languages", tag))?
    } else if let Some(lang) = args
        .file
        .as_deref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(languages::from_extension)
    {
        lang
    } else {
        cfg.get("DEFAULT_LANGUAGE")
            .as_deref()
            .and_then(languages::find)
            .unwrap_or_else(languages::default_language)
    };

    match &args.file {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("cannot read {}: {}", path.display(), e))?;
            let stdin_text = match &args.stdin_file {
                Some(p) => std::fs::read_to_string(p)
                    .map_err(|e| anyhow!("cannot read {}: {}", p.display(), e))?,
                None => String::new(),
            };
            handlers::run::run(&cfg, language, &source, &stdin_text).await
        }
        None => {
            if !std::io::stdout().is_terminal() {
                bail!("the editor requires a terminal; pass a source file to run non-interactively");
            }
            let theme = args
                .theme
                .or_else(|| cfg.get("DEFAULT_THEME"))
                .unwrap_or_else(|| "cobalt".to_string());
            if tui::theme::find(&theme).is_none() {
                bail!("unknown theme '{}'; see --list-themes", theme);
            }
            let session = EditorSession::new(language, theme);
            tui::run_editor(&cfg, session).await
        }
    }
}
