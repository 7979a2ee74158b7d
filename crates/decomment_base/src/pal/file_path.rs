use relative_path::RelativePathBuf;
use std::path::Path;

use crate::DecommentError;

/* 📖 # Why use RelativePathBuf for FilePath?

The CLI runs with the current directory as the PAL base, and every file it touches
(the input, its `_1` sibling) is named relative to it. RelativePathBuf keeps separators
uniform across platforms, which matters when the path is printed back to the user.

A FilePath is always valid UTF-8. Converting a `Path` that is not fails instead of
replacing bytes, otherwise the lookup would go to a different file than the user named.
*/

/// Path of a file, relative to the PAL base directory.
///
/// # Examples
///
/// ```
/// use decomment_base::FilePath;
///
/// let input = FilePath::from("src/greet.js");
/// let stripped = input.with_file_name("greet_1.js");
/// assert_eq!(stripped.to_string(), "src/greet_1.js");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_str())
    }

    /// Returns the final component of the path, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name()
    }

    /// Returns the extension of the final component, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension()
    }

    /// Returns a sibling path with the final component replaced.
    pub fn with_file_name(&self, file_name: &str) -> FilePath {
        Self(self.0.with_file_name(file_name))
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl TryFrom<&Path> for FilePath {
    type Error = Box<DecommentError>;

    fn try_from(p: &Path) -> Result<Self, Self::Error> {
        match p.to_str() {
            Some(s) => Ok(Self::from(s)),
            None => Err(crate::err!("Path is not valid UTF-8: {}", p.display())),
        }
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_path_from_str_and_path() {
        let from_str = FilePath::from("src/main.rs");
        let from_path = FilePath::try_from(PathBuf::from("src/main.rs").as_path()).unwrap();
        assert_eq!(from_str, from_path);
        assert_eq!(from_str.as_path(), Path::new("src/main.rs"));
        assert_eq!(from_str.to_string(), "src/main.rs");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_path_rejects_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"src/bad\xff.c"));
        let err = FilePath::try_from(path).unwrap_err();
        assert!(err.to_string().starts_with("Path is not valid UTF-8: src/bad"), "{err}");
    }

    #[test]
    fn test_file_path_extension() {
        assert_eq!(FilePath::from("src/main.rs").extension(), Some("rs"));
        assert_eq!(FilePath::from("archive.tar.GZ").extension(), Some("GZ"));
        assert_eq!(FilePath::from("Makefile").extension(), None);
        assert_eq!(FilePath::from("dir.d/Makefile").extension(), None);
    }

    #[test]
    fn test_file_path_with_file_name() {
        let path = FilePath::from("src/lib/a.c");
        assert_eq!(path.file_name(), Some("a.c"));
        assert_eq!(path.with_file_name("a_1.c"), FilePath::from("src/lib/a_1.c"));
        assert_eq!(
            FilePath::from("a.c").with_file_name("a_1.c"),
            FilePath::from("a_1.c")
        );
    }
}
