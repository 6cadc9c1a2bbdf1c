//! Archive modification operations.

use std::path::PathBuf;

use crate::EntryName;

/// A pending modification of an archive.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Add a directory marker.
    AddDirectory {
        /// Entry name, ending with `/`.
        name: EntryName,
    },
    /// Add a file entry streamed from disk.
    AddFile {
        /// Entry name.
        name: EntryName,
        /// File the content is read from.
        source: PathBuf,
    },
    /// Add a file entry from memory.
    AddBytes {
        /// Entry name.
        name: EntryName,
        /// Entry content.
        data: Vec<u8>,
    },
    /// Delete every entry with this name.
    Delete {
        /// Entry name.
        name: EntryName,
    },
}

impl Operation {
    /// Returns the entry name this operation targets.
    pub fn name(&self) -> &EntryName {
        match self {
            Operation::AddDirectory { name }
            | Operation::AddFile { name, .. }
            | Operation::AddBytes { name, .. }
            | Operation::Delete { name } => name,
        }
    }

    /// Returns `true` for operations that write a new entry.
    pub fn is_addition(&self) -> bool {
        !matches!(self, Operation::Delete { .. })
    }

    /// Returns the operation type as a string.
    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::AddDirectory { .. } => "add-directory",
            Operation::AddFile { .. } => "add-file",
            Operation::AddBytes { .. } => "add-bytes",
            Operation::Delete { .. } => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name() {
        let name = EntryName::new("a/b.txt").unwrap();
        let op = Operation::Delete { name: name.clone() };
        assert_eq!(op.name(), &name);
        assert!(!op.is_addition());
    }

    #[test]
    fn test_operation_type() {
        let dir = Operation::AddDirectory {
            name: EntryName::new("d/").unwrap(),
        };
        let file = Operation::AddFile {
            name: EntryName::new("f").unwrap(),
            source: PathBuf::from("/tmp/f"),
        };
        let bytes = Operation::AddBytes {
            name: EntryName::new("b").unwrap(),
            data: vec![1],
        };
        assert_eq!(dir.operation_type(), "add-directory");
        assert_eq!(file.operation_type(), "add-file");
        assert_eq!(bytes.operation_type(), "add-bytes");
        assert!(dir.is_addition() && file.is_addition() && bytes.is_addition());
    }
}
