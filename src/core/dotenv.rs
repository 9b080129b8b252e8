//! Local KEY=VALUE secrets file.
//!
//! Parsing is deliberately lenient: lines that are not a `KEY=VALUE`
//! assignment with an uppercase key are skipped, not rejected, so hand-edited
//! files keep working.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::core::constants::SECRET_FILE_MODE;
use crate::core::domain::SecretMap;
use crate::core::validate::{is_valid_key, validate_key};
use crate::error::{FileError, Result, ValidationError};

/// A secrets file on disk and its parsed contents.
#[derive(Debug, Clone)]
pub struct EnvFile {
    map: SecretMap,
    path: PathBuf,
}

impl EnvFile {
    /// Parse a secrets file from disk.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if the file does not exist, or
    /// `FileError::Read` if it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading env file");

        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                FileError::NotFound(path.to_path_buf())
            } else {
                FileError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        warn_if_exposed(path);

        let map = parse(&contents);
        debug!(path = %path.display(), keys = map.len(), "env file loaded");

        Ok(Self {
            map,
            path: path.to_path_buf(),
        })
    }

    /// Pair a map with the path it will be written to.
    pub fn new(map: SecretMap, path: impl AsRef<Path>) -> Self {
        Self {
            map,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write the file with mode 600.
    ///
    /// Content goes to a sibling temporary file first and is renamed over the
    /// destination, so a failed write never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// `FileError::AlreadyExists` if the path exists and `force` is false,
    /// `ValidationError::InvalidKey` or `MultilineValue` if an entry cannot be
    /// represented,
    /// `FileError::Write` if the destination is not writable.
    pub fn save(&self, force: bool) -> Result<()> {
        if self.path.exists() && !force {
            return Err(FileError::AlreadyExists(self.path.clone()).into());
        }

        let content = render(&self.map)?;
        write_atomic(&self.path, content.as_bytes()).map_err(|source| FileError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), keys = self.map.len(), "env file written");
        Ok(())
    }

    pub fn map(&self) -> &SecretMap {
        &self.map
    }

    pub fn into_map(self) -> SecretMap {
        self.map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match render(&self.map) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Parse `KEY=VALUE` lines into a map.
///
/// Comment lines (`#`) and blank lines are skipped. Lines whose key does not
/// match `^[A-Z_]+$` are ignored. One layer of matching single or double
/// quotes is stripped from the value. Later assignments win.
pub fn parse(contents: &str) -> SecretMap {
    let mut map = SecretMap::new();

    for (lineno, line) in contents.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            trace!(line = lineno + 1, "skipping line without '='");
            continue;
        };

        if !is_valid_key(key) {
            debug!(line = lineno + 1, "skipping line with invalid key");
            continue;
        }

        map.insert(key, unquote(value));
    }

    map
}

/// Serialize a map as `KEY=VALUE` lines in key order.
///
/// Values that would change on reload, or that contain whitespace or `#`,
/// are wrapped in double quotes.
///
/// # Errors
///
/// Returns `ValidationError::InvalidKey` for keys that `parse` would drop and
/// `ValidationError::MultilineValue` for values containing a newline.
pub fn render(map: &SecretMap) -> Result<String> {
    let mut output = String::new();

    for (key, value) in map.iter() {
        validate_key(key)?;
        if value.contains('\n') {
            return Err(ValidationError::MultilineValue(key.to_string()).into());
        }

        if needs_quotes(value) {
            output.push_str(&format!("{}=\"{}\"\n", key, value));
        } else {
            output.push_str(&format!("{}={}\n", key, value));
        }
    }

    Ok(output)
}

fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(char::is_whitespace) || value.contains('#') || unquote(value) != value
}

/// Write `content` to `path` with mode 600 via a sibling temporary file.
///
/// The temporary file is created with mode 600 and renamed over `path`, so
/// the destination never holds partial content or looser permissions.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);

    let written = write_secure(&tmp, content)
        .and_then(|()| fs::rename(&tmp, path))
        .and_then(|()| set_secure_permissions(path));

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "env".to_string());
    path.with_file_name(format!(".{}.tmp-{}", name, std::process::id()))
}

fn write_secure(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SECRET_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()?;
    file.sync_all()
}

#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(SECRET_FILE_MODE))
}

#[cfg(not(unix))]
fn set_secure_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn warn_if_exposed(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "secrets file is readable by other users (expected 600)"
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_exposed(_path: &Path) {}
