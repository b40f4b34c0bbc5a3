use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// User-facing output. Human mode prints symbols and colors; JSON modes
/// print one object per message so results can be piped.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        self.message("success", || format!("{} {}", "✓".green(), msg.as_ref()), msg.as_ref());
    }

    /// Shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "error", "message": msg.as_ref() })),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        self.message("info", || msg.as_ref().to_string(), msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        self.message("warning", || format!("{} {}", "⚠".yellow(), msg.as_ref()), msg.as_ref());
    }

    /// Structured result. Ignored in human mode, where callers render tables.
    pub fn json(&self, data: &serde_json::Value) {
        if self.is_human() || self.quiet {
            return;
        }
        self.print_json(data);
    }

    /// Pre-rendered human text such as a table. Ignored in JSON modes.
    pub fn human(&self, text: impl std::fmt::Display) {
        if self.is_human() && !self.quiet {
            println!("{}", text);
        }
    }

    fn message(&self, kind: &str, human: impl FnOnce() -> String, plain: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", human()),
            _ => self.print_json(&json!({ "type": kind, "message": plain })),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            _ => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
