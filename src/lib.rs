//! # LinkerLab 🔗
//!
//! A terminal composer for drafting one post across Pinterest, Facebook,
//! Instagram, Etsy, Blogger and YouTube.
//!
//! ## Overview
//!
//! LinkerLab keeps a single draft (text, images and target platforms),
//! shows how it will look on each platform, and offers formatting helpers,
//! a mocked AI rewrite and a mocked publish. Drafts are saved locally.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Owns the session, runs the event loop and async worker     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Compose     │ │    AI/Publish   │ │     Images      │
//! │                 │ │                 │ │                 │
//! │ • Session       │ │ • Mock suggest  │ │ • Read files    │
//! │ • Formatting    │ │ • Mock publish  │ │ • Data URIs     │
//! │ • Previews      │ │ • Status states │ │ • Input order   │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Store      │ │     Config      │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Key-value     │ │ • TOML          │ │ • Platform      │
//! │ • Draft record  │ │ • Theme         │ │ • Draft         │
//! │ • SQLite        │ │ • Delays        │ │ • Notification  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ai`] — Mocked content suggestions and the AI status indicator
//! - [`app`] — TUI application state and event loop
//! - [`compose`] — Composition session, formatting toolbar, previews
//! - [`config`] — Configuration management
//! - [`images`] — Image ingestion into data URIs
//! - [`models`] — Data models (Platform, `ImageAttachment`, `DraftSnapshot`)
//! - [`publish`] — Mocked publishing
//! - [`store`] — `SQLite` key-value store for drafts
//! - [`theme`] — Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```
//! use linkerlab::compose::{CompositionSession, FormatAction};
//! use linkerlab::Platform;
//!
//! let mut session = CompositionSession::new();
//! session.toggle_platform(Platform::Etsy, true);
//! session.set_text("Hello world");
//! let selection = session.apply_formatting(&FormatAction::Bold, 0, 5);
//!
//! assert_eq!(session.text(), "**Hello** world");
//! assert_eq!(selection, (2, 7));
//! assert!(session.validate_publish().is_ok());
//! ```

#![doc(html_root_url = "https://docs.rs/linkerlab/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::branches_sharing_code)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::return_self_not_must_use)]

pub mod ai;
pub mod app;
pub mod compose;
pub mod config;
pub mod demo;
pub mod error;
pub mod images;
pub mod models;
pub mod paths;
pub mod publish;
pub mod store;
pub mod theme;

// Re-export main types for convenience
pub use app::AppState;
pub use compose::CompositionSession;
pub use config::Config;
pub use error::ComposeError;
pub use models::{DraftSnapshot, ImageAttachment, Platform, Severity};
pub use store::DraftStore;
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
    __    _       __             __          __
   / /   (_)___  / /_____  _____/ /   ____ _/ /_
  / /   / / __ \/ //_/ _ \/ ___/ /   / __ `/ __ \
 / /___/ / / / / ,< /  __/ /  / /___/ /_/ / /_/ /
/_____/_/_/ /_/_/|_|\___/_/  /_____/\__,_/_.___/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
