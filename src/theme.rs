//! Highlight themes
//!
//! Maps token categories to colors and font styles. Themes are YAML; the
//! built-in "mocha" palette is compiled in, and user themes are read from
//! the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/mocha-codespace/themes/{id}.yaml`
//! 2. Embedded: built-in themes compiled into the binary

use std::path::Path;

use serde::Deserialize;

use crate::syntax::{TokenCategory, TokenSpan};

pub const MOCHA_YAML: &str = r##"version: 1
name: "Mocha"
editor:
  background: "#f5ebe0"
  foreground: "#3e2723"
syntax:
  keyword:
    color: "#8b4513"
    bold: true
  string:
    color: "#6b8e23"
  number:
    color: "#cd853f"
  call_target:
    color: "#704241"
    italic: true
  comment:
    color: "#a0826d"
    italic: true
"##;

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[BuiltinTheme {
    id: "mocha",
    yaml: MOCHA_YAML,
}];

pub const DEFAULT_THEME: &str = "mocha";

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    pub editor: EditorThemeData,
    pub syntax: SyntaxThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxThemeData {
    pub keyword: StyleData,
    pub string: StyleData,
    pub number: StyleData,
    pub call_target: StyleData,
    pub comment: StyleData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StyleData {
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Resolved style for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStyle {
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl TokenStyle {
    fn from_data(data: &StyleData) -> Result<Self, String> {
        Ok(Self {
            color: Color::from_hex(&data.color)?,
            bold: data.bold,
            italic: data.italic,
        })
    }

    /// ANSI SGR sequence selecting this style (24-bit color)
    pub fn ansi_prefix(&self) -> String {
        let mut codes = Vec::with_capacity(3);
        if self.bold {
            codes.push("1".to_string());
        }
        if self.italic {
            codes.push("3".to_string());
        }
        codes.push(format!("38;2;{};{};{}", self.color.r, self.color.g, self.color.b));
        format!("\x1b[{}m", codes.join(";"))
    }
}

pub const ANSI_RESET: &str = "\x1b[0m";

/// Resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    keyword: TokenStyle,
    string: TokenStyle,
    number: TokenStyle,
    call_target: TokenStyle,
    comment: TokenStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        Ok(Theme {
            name: data.name,
            background: Color::from_hex(&data.editor.background)?,
            foreground: Color::from_hex(&data.editor.foreground)?,
            keyword: TokenStyle::from_data(&data.syntax.keyword)?,
            string: TokenStyle::from_data(&data.syntax.string)?,
            number: TokenStyle::from_data(&data.syntax.number)?,
            call_target: TokenStyle::from_data(&data.syntax.call_target)?,
            comment: TokenStyle::from_data(&data.syntax.comment)?,
        })
    }

    /// The built-in palette, without going through YAML
    pub fn mocha() -> Self {
        let style = |r, g, b, bold, italic| TokenStyle {
            color: Color::rgb(r, g, b),
            bold,
            italic,
        };
        Theme {
            name: "Mocha".to_string(),
            background: Color::rgb(0xf5, 0xeb, 0xe0),
            foreground: Color::rgb(0x3e, 0x27, 0x23),
            keyword: style(0x8b, 0x45, 0x13, true, false),
            string: style(0x6b, 0x8e, 0x23, false, false),
            number: style(0xcd, 0x85, 0x3f, false, false),
            call_target: style(0x70, 0x42, 0x41, false, true),
            comment: style(0xa0, 0x82, 0x6d, false, true),
        }
    }

    pub fn style(&self, category: TokenCategory) -> TokenStyle {
        match category {
            TokenCategory::Keyword => self.keyword,
            TokenCategory::String => self.string,
            TokenCategory::Number => self.number,
            TokenCategory::CallTarget => self.call_target,
            TokenCategory::Comment => self.comment,
        }
    }

    /// Wrap each span of `text` in ANSI styling. `spans` must be sorted and
    /// disjoint, as the tokenizer produces them.
    pub fn paint(&self, text: &str, spans: &[TokenSpan]) -> String {
        let mut out = String::with_capacity(text.len() + spans.len() * 24);
        let mut cursor = 0;
        for span in spans {
            let (start, end) = (span.start, span.end());
            if start < cursor || end > text.len() {
                continue;
            }
            let (Some(before), Some(token)) = (text.get(cursor..start), text.get(start..end))
            else {
                continue;
            };
            out.push_str(before);
            // One styled run per line; every output line is self-contained
            let prefix = self.style(span.category).ansi_prefix();
            for (i, line) in token.split('\n').enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                if !line.is_empty() {
                    out.push_str(&prefix);
                    out.push_str(line);
                    out.push_str(ANSI_RESET);
                }
            }
            cursor = end;
        }
        out.push_str(text.get(cursor..).unwrap_or_default());
        out
    }
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}
