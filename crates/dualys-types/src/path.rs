use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A path inside a plan's virtual file system.
///
/// The only invariant is that the path is non-empty. Well-formedness
/// (leading slash, normalization, `..` segments) is not checked: paths are
/// compared byte-for-byte and ordered lexicographically.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VfsPath(String);

impl VfsPath {
    /// Create a path, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> TypeResult<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(Self(path))
    }

    /// Build a path from a `'static` string already checked to be
    /// non-empty. Use [`vfs_path!`](crate::vfs_path) instead of calling
    /// this directly.
    #[doc(hidden)]
    pub fn from_checked_static(path: &'static str) -> Self {
        Self(path.to_owned())
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the path and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Build a [`VfsPath`] from a constant string, rejecting the empty string
/// at compile time.
///
/// ```
/// use dualys_types::vfs_path;
///
/// let entry = vfs_path!("/main.wasm");
/// assert_eq!(entry.as_str(), "/main.wasm");
/// ```
#[macro_export]
macro_rules! vfs_path {
    ($path:expr) => {{
        const PATH: &str = $path;
        const _: () = assert!(!PATH.is_empty(), "virtual path must not be empty");
        $crate::VfsPath::from_checked_static(PATH)
    }};
}

impl fmt::Debug for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VfsPath({:?})", self.0)
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VfsPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VfsPath {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VfsPath {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VfsPath> for String {
    fn from(path: VfsPath) -> Self {
        path.0
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets ordered maps keyed by `VfsPath` be queried with a plain `&str`.
impl Borrow<str> for VfsPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}
