use crate::cli::args::OutputFormat;
use crate::domain::config::TermBridgeConfig;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_config(&self, config: &TermBridgeConfig) -> Result<(), OutputError>;
    fn write_paths(&self, paths: &ConfigPaths) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::TermBridgeError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Where configuration is read from
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPaths {
    pub global: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
}

/// Writes to any stream in the selected format
pub struct ConsoleWriter<W: Write> {
    format: OutputFormat,
    out: std::cell::RefCell<W>,
}

impl ConsoleWriter<io::Stdout> {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, io::stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn with_writer(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            out: std::cell::RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_serialized<T: Serialize>(&self, value: &T) -> Result<(), OutputError> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Text | OutputFormat::Toml => toml::to_string_pretty(value)?,
        };
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", rendered.trim_end())?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for ConsoleWriter<W> {
    fn write_config(&self, config: &TermBridgeConfig) -> Result<(), OutputError> {
        self.write_serialized(config)
    }

    fn write_paths(&self, paths: &ConfigPaths) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                let mut out = self.out.borrow_mut();
                writeln!(out, "Global:  {}", paths.global.display())?;
                match &paths.project {
                    Some(project) => writeln!(out, "Project: {}", project.display())?,
                    None => writeln!(out, "Project: (none)")?,
                }
                Ok(())
            }
            _ => self.write_serialized(paths),
        }
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        let mut out = self.out.borrow_mut();
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "message": message });
                writeln!(out, "{}", json)?;
            }
            _ => writeln!(out, "{}", message)?,
        }
        Ok(())
    }
}
