//! LinkerLab - A terminal composer for cross-platform social posts
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use linkerlab::ai::{MockSuggester, Suggester};
use linkerlab::compose::{CompositionSession, PreviewImage};
use linkerlab::{Config, DraftStore, Platform};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => linkerlab::app::run(),
        Command::DraftShow => draft_show(),
        Command::DraftClear => draft_clear(),
        Command::Suggest { content } => suggest_cli(&content),
        Command::Preview { platform } => preview_cli(platform),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    DraftShow,
    DraftClear,
    Suggest { content: String },
    Preview { platform: Platform },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "draft" => match args.get(2).map(String::as_str) {
            None | Some("show") => Ok(Command::DraftShow),
            Some("clear") => Ok(Command::DraftClear),
            Some(other) => Err(anyhow::anyhow!(
                "Unknown draft command: {other}\nExpected 'show' or 'clear'"
            )),
        },

        "suggest" => {
            let content = args[2..].join(" ");
            if content.trim().is_empty() {
                return Err(anyhow::anyhow!("Missing content to improve"));
            }
            Ok(Command::Suggest { content })
        }

        "preview" => {
            let name = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing platform"))?;
            let platform = Platform::from_str(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown platform: {name}\nSupported: {}",
                    Platform::all()
                        .iter()
                        .map(Platform::id)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;
            Ok(Command::Preview { platform })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'linkerlab --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());
    let store_path = DraftStore::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🔗 LinkerLab - Compose once, preview everywhere

USAGE:
    linkerlab                          Launch TUI
    linkerlab [COMMAND]

COMMANDS:
    draft [show|clear]                 Show or delete the saved draft
    suggest <content>                  Print an AI-style rewrite of <content>
    preview <platform>                 Preview the saved draft on a platform
      Platforms: pinterest, facebook, instagram, etsy, blogger, youtube

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Post
      Ctrl+P        Publish
      Ctrl+S        Save draft
      Ctrl+G        AI suggestion
      Ctrl+O        Attach images
      Alt+1..6      Toggle platform

    Editor
      Alt+B/I       Bold / italic
      Alt+K         Insert link
      Alt+E         Insert emoji

    General
      Tab           Switch panel
      Ctrl+T        Next theme
      F1            Help
      Ctrl+Q        Quit

CONFIG:
    {}

DRAFTS:
    {}
"#,
        linkerlab::LOGO,
        config_path,
        store_path
    );
}

fn print_version() {
    println!("linkerlab {}", linkerlab::VERSION);
}

fn draft_show() -> Result<()> {
    let store = DraftStore::open()?;
    let Some(draft) = store.load_draft()? else {
        println!("No saved draft.");
        return Ok(());
    };

    println!("Saved {}", draft.saved_at_display());
    println!("Platforms: {}", draft.platforms_str());
    println!("Images: {}", draft.images.len());
    println!("{}", "─".repeat(60));
    println!("{}", draft.content);

    Ok(())
}

fn draft_clear() -> Result<()> {
    let store = DraftStore::open()?;
    if store.clear_draft()? {
        println!("✓ Draft deleted");
    } else {
        println!("No saved draft.");
    }
    Ok(())
}

fn suggest_cli(content: &str) -> Result<()> {
    let config = Config::load()?;
    let rt = Runtime::new().context("Failed to start async runtime")?;
    let suggester = MockSuggester::new(config.ai_delay());

    println!("🤖 Thinking...");
    let suggestion = rt.block_on(suggester.suggest(content))?;
    println!("\n{}", suggestion);

    Ok(())
}

fn preview_cli(platform: Platform) -> Result<()> {
    let store = DraftStore::open()?;
    let session = store
        .load_draft()?
        .map(|draft| CompositionSession::from_snapshot(&draft))
        .unwrap_or_default();
    let preview = session.build_preview(platform);

    println!("{} {} preview (.{})", platform.emoji(), platform.name(), preview.style_class);
    println!("{}", "─".repeat(60));
    for line in textwrap::wrap(&preview.display_text, 60) {
        println!("{line}");
    }
    println!();
    match preview.image {
        PreviewImage::Image(_) => {
            if let Some(img) = session.images().first() {
                println!("🖼  {} ({})", img.name, img.media_type);
            }
        }
        PreviewImage::Placeholder(text) => println!("▫ {text}"),
    }

    if !session.selected_platforms().contains(platform) {
        println!("\n(note: {} is not selected in this draft)", platform.name());
    }

    Ok(())
}
