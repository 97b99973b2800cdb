use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{self, Component, Path, PathBuf};

/// A directory relative to the scan root, as a sequence of path segments.
///
/// The empty sequence is the root itself and displays as `"."`. Ordering is
/// lexicographic over the segments, so the root sorts first and a parent
/// sorts immediately before its children.
///
/// `segments` holds the display form of each name (lossy for names that are
/// not valid UTF-8); `names` holds the names as found on disk and is what
/// [`DirectoryPath::to_path`] resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirectoryPath {
    segments: Vec<String>,
    names: Vec<OsString>,
}

impl DirectoryPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Build from segments, one directory name each. `"."` and empty parts
    /// are dropped; separators inside a segment are kept as part of the name.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = Self::root();
        for segment in segments {
            path.push(OsStr::new(segment.as_ref()));
        }
        path
    }

    /// Parse the display form (`"."` or `"a/b/c"`), splitting on the
    /// platform's path separators.
    pub fn parse(value: &str) -> Self {
        Self::from_segments(value.split(path::is_separator))
    }

    /// Convert a path already relative to the root. Each normal component
    /// becomes exactly one segment.
    pub fn from_relative(path: &Path) -> Self {
        let mut directory = Self::root();
        for component in path.components() {
            if let Component::Normal(name) = component {
                directory.push(name);
            }
        }
        directory
    }

    /// The path of a direct child directory named `name`.
    pub fn child(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.push(OsStr::new(name));
        child
    }

    fn push(&mut self, name: &OsStr) {
        if name.is_empty() || name == "." {
            return;
        }
        self.segments.push(name.to_string_lossy().into_owned());
        self.names.push(name.to_os_string());
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Resolve against the scan root.
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.names);
        path
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.segments.join("/"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// The filtered, name-sorted files of one directory that take part in its
/// consolidated artifact.
#[derive(Debug, Clone)]
pub struct EligibleFileSet {
    directory: DirectoryPath,
    files: Vec<CandidateFile>,
}

impl EligibleFileSet {
    /// Sorts `files` by name; the sort is stable so discovery order breaks ties.
    pub fn new(directory: DirectoryPath, mut files: Vec<CandidateFile>) -> Self {
        files.sort_by(|a, b| collate_names(&a.name, &b.name));
        Self { directory, files }
    }

    pub fn directory(&self) -> &DirectoryPath {
        &self.directory
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub file_name: String,
    pub source_directory: DirectoryPath,
    pub page_count: usize,
    pub size_bytes: u64,
}

/// Case-insensitive name ordering, with lowercase before uppercase when the
/// names differ only in case.
pub fn collate_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display_and_order() {
        let root = DirectoryPath::root();
        assert_eq!(root.to_string(), ".");
        assert!(root.is_root());
        assert_eq!(DirectoryPath::parse("."), root);
        assert!(root < DirectoryPath::parse("A"));
    }

    #[test]
    fn test_parse_splits_on_separators_only() {
        let path = DirectoryPath::parse("a/./b//c");
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(path.to_string(), "a/b/c");
        assert_eq!(DirectoryPath::root().child("x").child("y").to_string(), "x/y");
        assert_eq!(DirectoryPath::from_segments(["a", ".", "", "c"]).segments(), &["a", "c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_stays_inside_one_segment() {
        let relative = Path::new("export").join("R&D \\ Ops");
        let path = DirectoryPath::from_relative(&relative);
        assert_eq!(path.segments(), &["export", "R&D \\ Ops"]);
        assert_eq!(path.to_path(Path::new("/data")), Path::new("/data").join(&relative));
        assert_eq!(DirectoryPath::parse("R&D \\ Ops").depth(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_resolves_to_original() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9");
        let path = DirectoryPath::from_relative(Path::new(name));
        assert_eq!(path.segments(), &["caf\u{FFFD}"]);
        assert_eq!(path.to_path(Path::new("/data")), Path::new("/data").join(name));
    }

    #[test]
    fn test_parent_sorts_before_children() {
        let mut paths = vec![
            DirectoryPath::parse("B"),
            DirectoryPath::parse("A/Z"),
            DirectoryPath::parse("A B"),
            DirectoryPath::parse("A"),
            DirectoryPath::root(),
        ];
        paths.sort();
        let display: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        assert_eq!(display, vec![".", "A", "A/Z", "A B", "B"]);
    }

    #[test]
    fn test_eligible_set_sorts_case_insensitively() {
        let file = |name: &str| CandidateFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            size_bytes: 1,
        };
        let set = EligibleFileSet::new(
            DirectoryPath::root(),
            vec![file("b.pdf"), file("C.pdf"), file("a.pdf"), file("A.pdf")],
        );
        let names: Vec<&str> = set.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "A.pdf", "b.pdf", "C.pdf"]);
        assert_eq!(set.total_bytes(), 4);
    }
}
