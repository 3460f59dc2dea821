//! Generator configuration

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::placeholder::GO_KEYWORDS;

static GO_IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Whether `name` can be used as a Go identifier or package name.
pub fn is_go_identifier(name: &str) -> bool {
    GO_IDENTIFIER_RE.is_match(name) && !GO_KEYWORDS.contains(&name)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("package name is required for Go output")]
    MissingPackage,

    #[error("package name {package:?} is not a valid Go identifier")]
    InvalidPackage { package: String },

    #[error("source directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("source path is not a directory: {}", path.display())]
    SourceNotDirectory { path: PathBuf },

    #[error("unknown output format {format:?}, expected 'go' or 'json'")]
    UnknownFormat { format: String },
}

/// What the generator writes for each message file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Go source, one file per message file
    #[default]
    Go,
    /// The parsed model as JSON, for external emitters
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Go => "go",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(OutputFormat::Go),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    source_dir: PathBuf,
    target_dir: PathBuf,
    package: Option<String>,
    format: OutputFormat,
}

impl GenerateConfig {
    pub fn new(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        GenerateConfig {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            package: None,
            format: OutputFormat::default(),
        }
    }

    pub fn with_package(&mut self, package: &str) -> &mut Self {
        self.package = Some(package.to_string());
        self
    }

    pub fn with_format(&mut self, format: OutputFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Check the configuration before any file is touched.
    ///
    /// # Errors
    /// - [`ConfigError::MissingPackage`] / [`ConfigError::InvalidPackage`] for Go
    ///   output without a usable package name
    /// - [`ConfigError::SourceNotFound`] / [`ConfigError::SourceNotDirectory`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format == OutputFormat::Go {
            match self.package() {
                None | Some("") => return Err(ConfigError::MissingPackage),
                Some(package) if !is_go_identifier(package) => {
                    return Err(ConfigError::InvalidPackage {
                        package: package.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        if !self.source_dir.exists() {
            return Err(ConfigError::SourceNotFound {
                path: self.source_dir.clone(),
            });
        }

        if !self.source_dir.is_dir() {
            return Err(ConfigError::SourceNotDirectory {
                path: self.source_dir.clone(),
            });
        }

        Ok(())
    }
}
