//! Reading message files and writing the generated code

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Messages;
use crate::config::{ConfigError, GenerateConfig, OutputFormat, is_go_identifier};
use crate::error::Error;
use crate::parser::parse_reader;
use crate::writer::{LOCALE_SUPPORT_FILE, write_go, write_json, write_locale_support};

/// Extension of message definition files.
pub const MESSAGE_FILE_EXTENSION: &str = "yml";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid file name '{}': {reason}", path.display())]
    InvalidFileName { path: PathBuf, reason: String },

    #[error("error parsing file '{}': {source}", path.display())]
    Parse { path: PathBuf, source: Error },

    #[error("failed to render '{}'", path.display())]
    Render {
        path: PathBuf,
        source: std::fmt::Error,
    },

    #[error("failed to serialize '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write file '{}': {source}", path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// List the message files in `dir`, sorted by file name.
///
/// Only `*.yml` files directly inside `dir` are returned.
pub fn find_message_files(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let read_dir_err = |source| GenerateError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();

        if path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(MESSAGE_FILE_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

fn file_stem(path: &Path) -> Result<&str, GenerateError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| GenerateError::InvalidFileName {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })
}

/// Parse a single message file. The file name without extension names the
/// collection.
pub fn load_messages_from_file(path: &Path) -> Result<Messages, GenerateError> {
    let name = file_stem(path)?;

    let file = File::open(path).map_err(|source| GenerateError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(name, BufReader::new(file)).map_err(|source| GenerateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn render(
    config: &GenerateConfig,
    messages: &Messages,
    target: &Path,
) -> Result<String, GenerateError> {
    match config.format() {
        OutputFormat::Go => {
            if !is_go_identifier(&messages.name) {
                return Err(GenerateError::InvalidFileName {
                    path: target.to_path_buf(),
                    reason: format!("{:?} is not a valid Go identifier", messages.name),
                });
            }

            let mut out = String::new();
            write_go(&mut out, messages, config.package().unwrap_or_default()).map_err(
                |source| GenerateError::Render {
                    path: target.to_path_buf(),
                    source,
                },
            )?;
            Ok(out)
        }
        OutputFormat::Json => write_json(messages).map_err(|source| GenerateError::Json {
            path: target.to_path_buf(),
            source,
        }),
    }
}

/// Generate one output file per message file in the source directory.
///
/// Files are processed in name order and generation stops at the first file
/// that fails to parse; files generated before it are left in place. For Go
/// output the locale helpers are written to [`LOCALE_SUPPORT_FILE`] when any
/// message has translations.
///
/// Returns the paths of the written files.
pub fn generate(config: &GenerateConfig) -> Result<Vec<PathBuf>, GenerateError> {
    config.validate()?;

    let files = find_message_files(config.source_dir())?;
    if files.is_empty() {
        tracing::warn!(
            "no .{} files found in {}",
            MESSAGE_FILE_EXTENSION,
            config.source_dir().display()
        );
        return Ok(Vec::new());
    }

    fs::create_dir_all(config.target_dir()).map_err(|source| GenerateError::WriteFile {
        path: config.target_dir().to_path_buf(),
        source,
    })?;

    let locale_support = config.target_dir().join(LOCALE_SUPPORT_FILE);
    let mut needs_locale_support = false;
    let mut written = Vec::new();

    for file in &files {
        tracing::debug!(file = %file.display(), "parsing message file");
        let messages = load_messages_from_file(file)?;

        let target = config.target_dir().join(format!(
            "{}.{}",
            file_stem(file)?,
            config.format().extension()
        ));

        if target == locale_support {
            return Err(GenerateError::InvalidFileName {
                path: file.clone(),
                reason: format!("output would overwrite {}", LOCALE_SUPPORT_FILE),
            });
        }

        let contents = render(config, &messages, &target)?;
        write_file(&target, &contents)?;
        tracing::info!(
            file = %target.display(),
            messages = messages.len(),
            "generated"
        );

        needs_locale_support |= messages.has_translations();
        written.push(target);
    }

    if config.format() == OutputFormat::Go && needs_locale_support {
        let mut out = String::new();
        write_locale_support(&mut out, config.package().unwrap_or_default()).map_err(
            |source| GenerateError::Render {
                path: locale_support.clone(),
                source,
            },
        )?;
        write_file(&locale_support, &out)?;
        tracing::info!(file = %locale_support.display(), "generated");
        written.push(locale_support);
    }

    Ok(written)
}
