use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use marklet_config::{Config, Emit};
use marklet_engine::{RenderOptions, compile};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Render marklet markup to HTML, or dump its tokens or document tree as JSON.
#[derive(Debug, Parser)]
#[command(name = "marklet", version, about)]
struct Args {
    /// Source file. Reads stdin when omitted or `-`.
    path: Option<PathBuf>,

    /// What to print. Defaults to the config file's `emit`, then html.
    #[arg(long, value_enum)]
    emit: Option<Format>,

    /// CSS colour for text that failed to parse.
    #[arg(long)]
    error_color: Option<String>,

    /// Config file to use instead of ~/.config/marklet/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Tokens,
    Tree,
}

impl From<Emit> for Format {
    fn from(emit: Emit) -> Self {
        match emit {
            Emit::Html => Format::Html,
            Emit::Tokens => Format::Tokens,
            Emit::Tree => Format::Tree,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let format = args.emit.unwrap_or_else(|| config.emit.into());
    let options = RenderOptions::default()
        .with_error_color(args.error_color.unwrap_or(config.error_color));

    let source = read_source(args.path.as_deref())?;
    let compiled = compile(&source, &options);

    let errors = compiled.tree.error_count();
    if errors > 0 {
        log::warn!("{errors} block(s) could not be parsed and are shown as errors");
    }

    let output = match format {
        Format::Html => compiled.html,
        Format::Tokens => serde_json::to_string_pretty(&compiled.tokens)?,
        Format::Tree => serde_json::to_string_pretty(&compiled.tree)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write output")?;
    Ok(())
}

/// The explicit config file if given (it must exist), else the default one if present.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            match Config::load_from_path(&path)? {
                Some(config) => Some(config),
                None => bail!("Config file not found: {}", path.display()),
            }
        }
        None => Config::load()?,
    };

    if loaded.is_none() {
        log::debug!("no config file, using defaults");
    }
    Ok(loaded.unwrap_or_default())
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}
