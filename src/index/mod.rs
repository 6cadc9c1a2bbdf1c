//! Dual-indexed directory listings.
//!
//! A listing pass over a root directory builds a [`RoleIndex`] for one role
//! (folders or files). Each index holds four views of the same set of
//! `(absolute, relative)` pairs:
//!
//! | View | Key | Order |
//! |------|-----|-------|
//! | [`abs_to_rel`](RoleIndex::abs_to_rel) | absolute path | hashed |
//! | [`rel_to_abs`](RoleIndex::rel_to_abs) | relative path | hashed |
//! | [`sorted_abs_to_rel`](RoleIndex::sorted_abs_to_rel) | absolute path | [`SlashOrdered`] |
//! | [`sorted_rel_to_abs`](RoleIndex::sorted_rel_to_abs) | relative path | [`SlashOrdered`] |
//!
//! All four always have the same length and hold the same pairs.
//! [`entries`](RoleIndex::entries) keeps traversal order.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirzip::index::{ListOptions, PathIndex, PathType};
//!
//! let mut index = PathIndex::new();
//! let listing = index.list_files(
//!     "/var/log/app",
//!     &ListOptions::new().recursive(true).path_type(PathType::Relative),
//! );
//! print!("{}", listing);
//!
//! for (relative, absolute) in index.files().sorted_rel_to_abs() {
//!     println!("{} -> {}", relative, absolute);
//! }
//! ```

mod ordering;
mod walk;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub use ordering::{SlashOrdered, compare_by_depth, separator_count};
pub use walk::{list, path_string};

/// The kind of filesystem node an index tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Directories.
    Folders,
    /// Regular files.
    Files,
}

/// Which form of path a listing prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathType {
    /// Full path, starting with the root as given.
    #[default]
    Absolute,
    /// Path below the root, without a leading separator.
    Relative,
}

/// Options for a listing pass.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Walk the whole subtree instead of direct children only.
    pub recursive: bool,
    /// Form of the paths in the returned listing.
    pub path_type: PathType,
    /// Rewrite `\` to `/` in relative paths.
    pub normalize_separators: bool,
}

impl ListOptions {
    /// Creates options for a single-level listing of absolute paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether subdirectories are descended into.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the path form used in the listing.
    pub fn path_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    /// Sets whether relative paths use `/` regardless of platform.
    pub fn normalize_separators(mut self, normalize: bool) -> Self {
        self.normalize_separators = normalize;
        self
    }
}

/// One indexed filesystem node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathEntry {
    /// Absolute path (root prefix included), as rendered by [`path_string`].
    pub absolute: String,
    /// Path relative to the root.
    pub relative: String,
    /// The path as the filesystem reported it. Use this to reopen the node;
    /// the string forms are not reversible for names that are not UTF-8.
    pub native: PathBuf,
}

impl PathEntry {
    /// Returns the path in the requested form.
    pub fn path(&self, path_type: PathType) -> &str {
        match path_type {
            PathType::Absolute => &self.absolute,
            PathType::Relative => &self.relative,
        }
    }
}

/// The result of one listing pass for one role.
#[derive(Debug, Clone)]
pub struct RoleIndex {
    role: Role,
    root: String,
    entries: Vec<PathEntry>,
    abs_to_rel: HashMap<String, String>,
    rel_to_abs: HashMap<String, String>,
    sorted_abs_to_rel: BTreeMap<SlashOrdered, String>,
    sorted_rel_to_abs: BTreeMap<SlashOrdered, String>,
    pub(crate) skipped: usize,
}

impl RoleIndex {
    /// Creates an empty index for `role` under `root`.
    pub fn new(role: Role, root: impl Into<String>) -> Self {
        Self {
            role,
            root: root.into(),
            entries: Vec::new(),
            abs_to_rel: HashMap::new(),
            rel_to_abs: HashMap::new(),
            sorted_abs_to_rel: BTreeMap::new(),
            sorted_rel_to_abs: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Adds a pair to all four views.
    ///
    /// Returns `false` and leaves the index unchanged if either path is
    /// already present.
    pub(crate) fn insert(&mut self, entry: PathEntry) -> bool {
        if self.abs_to_rel.contains_key(&entry.absolute)
            || self.rel_to_abs.contains_key(&entry.relative)
        {
            return false;
        }
        self.abs_to_rel
            .insert(entry.absolute.clone(), entry.relative.clone());
        self.rel_to_abs
            .insert(entry.relative.clone(), entry.absolute.clone());
        self.sorted_abs_to_rel.insert(
            SlashOrdered::new(entry.absolute.clone()),
            entry.relative.clone(),
        );
        self.sorted_rel_to_abs.insert(
            SlashOrdered::new(entry.relative.clone()),
            entry.absolute.clone(),
        );
        self.entries.push(entry);
        true
    }

    /// Returns the role this index tracks.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the root as formatted for prefix stripping.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the number of indexed paths.
    pub fn len(&self) -> usize {
        self.abs_to_rel.len()
    }

    /// Returns `true` if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.abs_to_rel.is_empty()
    }

    /// Returns the number of nodes that could not be classified or whose
    /// rendered path collided with one already indexed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the indexed pairs in traversal order.
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// Looks up the relative path of an absolute path.
    pub fn relative_of(&self, absolute: &str) -> Option<&str> {
        self.abs_to_rel.get(absolute).map(String::as_str)
    }

    /// Looks up the absolute path of a relative path.
    pub fn absolute_of(&self, relative: &str) -> Option<&str> {
        self.rel_to_abs.get(relative).map(String::as_str)
    }

    /// Absolute to relative, hashed.
    pub fn abs_to_rel(&self) -> &HashMap<String, String> {
        &self.abs_to_rel
    }

    /// Relative to absolute, hashed.
    pub fn rel_to_abs(&self) -> &HashMap<String, String> {
        &self.rel_to_abs
    }

    /// Absolute to relative, shallowest first.
    pub fn sorted_abs_to_rel(&self) -> &BTreeMap<SlashOrdered, String> {
        &self.sorted_abs_to_rel
    }

    /// Relative to absolute, shallowest first.
    pub fn sorted_rel_to_abs(&self) -> &BTreeMap<SlashOrdered, String> {
        &self.sorted_rel_to_abs
    }

    /// Renders the newline-terminated listing in traversal order.
    pub fn listing(&self, path_type: PathType) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.path(path_type));
            out.push('\n');
        }
        out
    }

    /// Renders the newline-terminated listing in [`SlashOrdered`] order of
    /// the printed form.
    pub fn sorted_listing(&self, path_type: PathType) -> String {
        let keys: Vec<&SlashOrdered> = match path_type {
            PathType::Absolute => self.sorted_abs_to_rel.keys().collect(),
            PathType::Relative => self.sorted_rel_to_abs.keys().collect(),
        };
        let mut out = String::new();
        for key in keys {
            out.push_str(key.as_str());
            out.push('\n');
        }
        out
    }
}

/// Folder and file indexes kept side by side.
///
/// Each listing call replaces the index of its role and leaves the other one
/// alone.
#[derive(Debug, Clone)]
pub struct PathIndex {
    folders: RoleIndex,
    files: RoleIndex,
}

impl Default for PathIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PathIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            folders: RoleIndex::new(Role::Folders, String::new()),
            files: RoleIndex::new(Role::Files, String::new()),
        }
    }

    /// Lists the directories under `root` and replaces the folder index.
    ///
    /// Returns the listing, one path per line, each line terminated by `\n`.
    /// A root that is not a directory yields an empty listing and an empty
    /// folder index.
    pub fn list_folders(&mut self, root: impl AsRef<Path>, options: &ListOptions) -> String {
        self.folders = list(root, Role::Folders, options);
        self.folders.listing(options.path_type)
    }

    /// Lists the regular files under `root` and replaces the file index.
    ///
    /// Same contract as [`list_folders`](Self::list_folders).
    pub fn list_files(&mut self, root: impl AsRef<Path>, options: &ListOptions) -> String {
        self.files = list(root, Role::Files, options);
        self.files.listing(options.path_type)
    }

    /// Returns the folder index from the last [`list_folders`](Self::list_folders) call.
    pub fn folders(&self) -> &RoleIndex {
        &self.folders
    }

    /// Returns the file index from the last [`list_files`](Self::list_files) call.
    pub fn files(&self) -> &RoleIndex {
        &self.files
    }

    /// Takes the file index out, leaving an empty one behind.
    pub fn take_files(&mut self) -> RoleIndex {
        std::mem::replace(&mut self.files, RoleIndex::new(Role::Files, String::new()))
    }

    /// Takes the folder index out, leaving an empty one behind.
    pub fn take_folders(&mut self) -> RoleIndex {
        std::mem::replace(
            &mut self.folders,
            RoleIndex::new(Role::Folders, String::new()),
        )
    }

    /// Number of indexed files.
    pub fn files_count(&self) -> usize {
        self.files.len()
    }

    /// Number of indexed folders.
    pub fn folders_count(&self) -> usize {
        self.folders.len()
    }
}
