//! Application state types and entry glue.
//!
//! Defines the state owned by the shell (user list, loading flags), the
//! interaction state around it (focus, modal, alerts), theming, and
//! re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod listing;
pub mod shell;
pub mod update;

use ratatui::style::Color;
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::api::DEFAULT_API_URL;
use crate::config::Settings;
use crate::form::CreationForm;
use crate::model::User;

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Which pane receives key input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userboard theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                other => other.to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Load from `path`, or from the user config dir, or write defaults to `path`.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config_file_read_path("theme.conf") {
            return Self::from_file(&existing.to_string_lossy()).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme");
        }
        t
    }
}

/// Look for `name` in `$XDG_CONFIG_HOME/userboard/` then `~/.config/userboard/`.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        dirs.push(PathBuf::from(xdg));
    }
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".config"));
    }
    dirs.into_iter()
        .map(|d| d.join("userboard").join(name))
        .find(|p| p.is_file())
}

/// Modal dialogs layered over the main screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Yes/No prompt before deleting; `yes` is the highlighted button.
    DeleteConfirm { id: i64, name: String, yes: bool },
    Help,
}

pub struct AppState {
    // Owned by the shell.
    pub users: Vec<User>,
    pub list_loading: bool,
    pub create_loading: bool,

    pub form: CreationForm,
    pub focus: Focus,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub modal: Option<ModalState>,
    /// Pending alerts, oldest first. Shown one at a time above everything else.
    pub alerts: VecDeque<String>,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub api_url: String,
    pub date_format: String,
}

impl AppState {
    /// Build state from settings, loading theme and keybindings from disk.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            theme: Theme::load_or_init(&settings.theme_path),
            keymap: keymap::Keymap::load_or_init(&settings.keybinds_path),
            api_url: settings.api_url.clone(),
            date_format: settings.date_format.clone(),
            ..Self::default()
        }
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push_back(message.into());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            list_loading: false,
            create_loading: false,
            form: CreationForm::new(),
            focus: Focus::List,
            selected_user_index: 0,
            rows_per_page: 10,
            modal: None,
            alerts: VecDeque::new(),
            theme: Theme::mocha(),
            keymap: keymap::Keymap::default(),
            api_url: DEFAULT_API_URL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
