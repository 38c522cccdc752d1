//! Colored terminal output for the report commands.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use std::io::Write;

use raya_sdk::NativeValue;
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled writer over any `WriteColor` sink.
pub struct StyledOutput<W: WriteColor = StandardStream> {
    out: W,
}

impl StyledOutput<StandardStream> {
    /// Styled stdout with the given color choice.
    pub fn stdout(choice: ColorChoice) -> Self {
        Self {
            out: StandardStream::stdout(choice),
        }
    }
}

impl StyledOutput<Buffer> {
    /// Uncolored in-memory sink.
    pub fn buffer() -> Self {
        Self {
            out: Buffer::no_color(),
        }
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(self.out.as_slice()).into_owned()
    }
}

impl<W: WriteColor> StyledOutput<W> {
    // ── Generic styled writes ────────────────────────────────────────

    fn styled(&mut self, text: &str, color: Option<Color>, bold: bool) -> std::io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        self.out.set_color(&spec)?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }

    // ── Convenience helpers ──────────────────────────────────────────

    /// Bold section heading on its own line.
    pub fn heading(&mut self, text: &str) -> std::io::Result<()> {
        self.styled(text, Some(Color::Green), true)?;
        writeln!(self.out)
    }

    /// Cyan text.
    pub fn info(&mut self, text: &str) -> std::io::Result<()> {
        self.styled(text, Some(Color::Cyan), false)
    }

    /// Yellow bold text.
    pub fn warning(&mut self, text: &str) -> std::io::Result<()> {
        self.styled(text, Some(Color::Yellow), true)
    }

    /// Plain text (no color).
    pub fn plain(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.out, "{}", text)
    }

    /// Newline.
    pub fn newline(&mut self) -> std::io::Result<()> {
        writeln!(self.out)
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    // ── Values ───────────────────────────────────────────────────────

    /// Pretty JSON of a host value, one document per call.
    pub fn json(&mut self, value: &NativeValue) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// `key: value` with nested tables and lists indented below the key.
    pub fn field(&mut self, depth: usize, key: &str, value: &NativeValue) -> std::io::Result<()> {
        let pad = "  ".repeat(depth);
        self.plain(&pad)?;
        self.info(key)?;
        self.plain(":")?;
        match value {
            NativeValue::Object(map) if !map.is_empty() => {
                self.newline()?;
                for (k, v) in map {
                    self.field(depth + 1, k, v)?;
                }
                Ok(())
            }
            NativeValue::Array(items) if items.iter().any(is_compound) => {
                self.newline()?;
                for (i, item) in items.iter().enumerate() {
                    self.field(depth + 1, &format!("[{}]", i), item)?;
                }
                Ok(())
            }
            other => {
                self.plain(" ")?;
                self.plain(&scalar(other))?;
                self.newline()
            }
        }
    }
}

fn is_compound(value: &NativeValue) -> bool {
    matches!(value, NativeValue::Object(_) | NativeValue::Array(_))
}

/// One-line rendering of a leaf value.
pub fn scalar(value: &NativeValue) -> String {
    match value {
        NativeValue::Null => "nil".to_string(),
        NativeValue::Bool(b) => b.to_string(),
        NativeValue::Int(i) => i.to_string(),
        NativeValue::Float(x) => x.to_string(),
        NativeValue::String(s) => s.clone(),
        NativeValue::Buffer(bytes) => format!("<{} bytes>", bytes.len()),
        NativeValue::Array(items) => {
            let parts: Vec<String> = items.iter().map(scalar).collect();
            format!("[{}]", parts.join(", "))
        }
        NativeValue::Object(_) => "{}".to_string(),
        NativeValue::Pointer(p) => format!("{:#x}", p),
        NativeValue::Userdata(ud) => ud.describe(),
    }
}
