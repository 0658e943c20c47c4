//! Command line front end for translating locale files.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Args,
    Parser,
    Subcommand,
};
use js_i18n_translator::AlignEvent;
use js_i18n_translator::config::{
    ConfigManager,
    TranslatorSettings,
};
use js_i18n_translator::workspace::{
    DraftStore,
    FileSource,
    LocalFileSource,
    MemoryDraftStore,
    SessionRequest,
    TranslationSession,
    decode_draft,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Translate JavaScript/TypeScript/JSON locale files
#[derive(Parser, Debug)]
#[command(name = "js-i18n-translator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Workspace root holding the settings file
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Also write logs to daily files in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List locales and their files
    Locales,

    /// Show which keys of a file are translated
    Status(StatusArgs),

    /// Assemble the translated file
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Locale file relative to the locale directory
    file: Option<String>,

    /// Target locale
    #[arg(long)]
    to: String,

    /// Reference locale (defaults to the configured one)
    #[arg(long)]
    from: Option<String>,

    /// Draft tree (JSON) to restore over the target file
    #[arg(long)]
    draft: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatusArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Include translated entries
    #[arg(short, long)]
    all: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Write to this path instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level, overriding `indentWidth`
    #[arg(long)]
    indent_width: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref());

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(cli.workspace.clone()))
        .with_context(|| format!("Failed to load settings from {}", cli.workspace.display()))?;
    if let Command::Export(ExportArgs { indent_width: Some(indent_width), .. }) = &cli.command {
        let settings =
            TranslatorSettings { indent_width: *indent_width, ..config_manager.get_settings().clone() };
        config_manager.update_settings(settings).context("Invalid --indent-width")?;
    }
    let source = LocalFileSource::from_config(&config_manager)?;

    match cli.command {
        Command::Locales => list_locales(&source).await,
        Command::Status(args) => status(&config_manager, &source, args).await,
        Command::Export(args) => export(&config_manager, &source, args).await,
    }
}

/// Installs the stderr logger and, with `log_dir`, a non-blocking file logger.
///
/// The returned guard flushes the file logger when dropped.
fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "js-i18n-translator.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(filter).with(stderr_layer).with(file_layer).init();
    guard
}

async fn list_locales(source: &LocalFileSource) -> Result<()> {
    let locales = source.list_locales().await?;
    if locales.is_empty() {
        tracing::warn!(root = %source.locales_root().display(), "No locales found");
    }

    let mut stdout = std::io::stdout().lock();
    for locale in locales {
        let files = source.list_files(&locale).await?;
        writeln!(stdout, "{locale}")?;
        for file in files {
            writeln!(stdout, "  {file}")?;
        }
    }
    Ok(())
}

async fn status(config_manager: &ConfigManager, source: &LocalFileSource, args: StatusArgs) -> Result<()> {
    let session = open_session(config_manager, source, args.session).await?;
    let hide_translated = config_manager.get_settings().hide_translated && !args.all;

    let mut stdout = std::io::stdout().lock();
    for entry in session.events(hide_translated).iter().filter_map(AlignEvent::as_entry) {
        let marker = if entry.edit_node.is_blank() { "[ ]" } else { "[x]" };
        writeln!(stdout, "{marker} {}", entry.dotted_path())?;
    }
    Ok(())
}

async fn export(config_manager: &ConfigManager, source: &LocalFileSource, args: ExportArgs) -> Result<()> {
    let session = open_session(config_manager, source, args.session).await?;
    let text = session.export(&config_manager.get_settings().assemble_options())?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, text)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Exported translation");
        }
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

async fn open_session(
    config_manager: &ConfigManager,
    source: &LocalFileSource,
    args: SessionArgs,
) -> Result<TranslationSession> {
    let settings = config_manager.get_settings();
    let reference_locale = args.from.unwrap_or_else(|| settings.reference_locale.clone());

    let file = match args.file {
        Some(file) => file,
        None => {
            let files = source.list_files(&reference_locale).await?;
            settings
                .default_file(&files)
                .cloned()
                .with_context(|| format!("No locale files found for '{reference_locale}'"))?
        }
    };

    let mut drafts = MemoryDraftStore::new();
    if let Some(path) = &args.draft {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read draft {}", path.display()))?;
        drafts.save_draft(&decode_draft(&text)?, &args.to, &file);
    }

    let request = SessionRequest { file, reference_locale, target_locale: Some(args.to) };
    Ok(TranslationSession::open(source, &drafts, request).await?)
}
