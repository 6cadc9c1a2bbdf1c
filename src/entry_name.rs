//! Zip entry names.

use crate::{Error, Result};
use std::fmt;

/// Maximum length of an entry name in bytes.
///
/// The zip local and central headers store the name length in 16 bits.
const MAX_NAME_LENGTH: usize = u16::MAX as usize;

/// A checked zip entry name.
///
/// Names are stored exactly as given apart from [`into_directory`]
/// (which appends the trailing `/` that marks a directory entry). Checks:
/// - not empty
/// - no NUL bytes
/// - at most 65535 bytes
///
/// Names are not otherwise restricted, since archives in the wild contain
/// all sorts of names. Whether a name is safe to materialize on disk is a
/// separate question answered by [`is_enclosed`](Self::is_enclosed).
///
/// # Examples
///
/// ```
/// use dirzip::EntryName;
///
/// let dir = EntryName::new("assets").unwrap().into_directory();
/// assert_eq!(dir.as_str(), "assets/");
/// assert!(dir.is_directory());
///
/// let file = EntryName::new("assets/img/logo.png").unwrap();
/// assert_eq!(file.file_name(), "logo.png");
///
/// assert!(EntryName::new("").is_err());
/// ```
///
/// [`into_directory`]: Self::into_directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName(String);

impl EntryName {
    /// Creates an entry name, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryName`] if the name is empty, contains a
    /// NUL byte or is too long.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::InvalidEntryName("empty name".into()));
        }
        if s.contains('\0') {
            return Err(Error::InvalidEntryName(format!(
                "contains NUL byte: {:?}",
                s
            )));
        }
        if s.len() > MAX_NAME_LENGTH {
            return Err(Error::InvalidEntryName(format!(
                "name exceeds maximum length of {} bytes",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name ends with `/`.
    pub fn is_directory(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Turns the name into a directory marker by appending `/` if missing.
    pub fn into_directory(mut self) -> Self {
        if !self.is_directory() {
            self.0.push('/');
        }
        self
    }

    /// Returns the directory-marker spelling of this name, or `None` if the
    /// name already is one.
    pub fn directory_variant(&self) -> Option<Self> {
        if self.is_directory() {
            None
        } else {
            Some(self.clone().into_directory())
        }
    }

    /// Returns everything after the last `/`.
    ///
    /// For a directory marker this is the empty string.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Returns `true` if the name stays inside the directory it is extracted
    /// to: not absolute, no drive prefix, no `..` segment.
    ///
    /// Both `/` and `\` are treated as separators here.
    ///
    /// ```
    /// use dirzip::EntryName;
    ///
    /// assert!(EntryName::new("a/b.txt").unwrap().is_enclosed());
    /// assert!(!EntryName::new("../b.txt").unwrap().is_enclosed());
    /// assert!(!EntryName::new("/etc/passwd").unwrap().is_enclosed());
    /// ```
    pub fn is_enclosed(&self) -> bool {
        let s = self.0.as_str();
        if s.starts_with('/') || s.starts_with('\\') {
            return false;
        }
        let bytes = s.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            return false;
        }
        !s.split(['/', '\\']).any(|segment| segment == "..")
    }

    /// Returns `true` if removing this name removes the entry called `other`.
    ///
    /// A directory marker covers itself and every entry stored below it; any
    /// other name covers only itself.
    ///
    /// ```
    /// use dirzip::EntryName;
    ///
    /// let docs = EntryName::new("docs/").unwrap();
    /// assert!(docs.covers("docs/"));
    /// assert!(docs.covers("docs/sub/a.txt"));
    /// assert!(!docs.covers("docs-old.txt"));
    /// ```
    pub fn covers(&self, other: &str) -> bool {
        if self.is_directory() {
            other.starts_with(self.as_str())
        } else {
            other == self.as_str()
        }
    }

    /// Unwraps the name.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for EntryName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}
