use std::io;
use std::path::{Path, PathBuf};

/// Prefix of paths on the storage device
pub const DEVICE_PREFIX: &str = "sdmc:";

/// Narrow file access over a storage device.
///
/// Paths are device paths such as `sdmc:/leafcfg/settings.json`.
pub trait Explorer {
    /// Device prefix, e.g. `sdmc:`
    fn prefix(&self) -> &str {
        DEVICE_PREFIX
    }

    fn is_file(&self, path: &str) -> bool;

    /// Read a whole file, `Ok(None)` when it does not exist
    fn read_file(&self, path: &str) -> io::Result<Option<Vec<u8>>>;

    fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()>;

    fn delete_file(&self, path: &str) -> io::Result<()>;
}

/// Explorer backed by a host directory standing in for the device root
#[derive(Debug, Clone)]
pub struct FsExplorer {
    root: PathBuf,
}

impl FsExplorer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a device path to a host path. Paths outside the device are rejected.
    fn host_path(&self, path: &str) -> io::Result<PathBuf> {
        let rest = path.strip_prefix(self.prefix()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{path}' is not on {}", self.prefix()),
            )
        })?;
        let rest = rest.trim_start_matches('/');
        if rest.split('/').any(|part| part == "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{path}' escapes the device root"),
            ));
        }
        Ok(self.root.join(rest))
    }
}

impl Explorer for FsExplorer {
    fn is_file(&self, path: &str) -> bool {
        self.host_path(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read_file(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        let host = self.host_path(path)?;
        match std::fs::read(&host) {
            Ok(data) => {
                tracing::debug!(path, bytes = data.len(), "read file");
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
        let host = self.host_path(path)?;
        if let Some(parent) = host.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&host, data)?;
        tracing::debug!(path, bytes = data.len(), "wrote file");
        Ok(())
    }

    fn delete_file(&self, path: &str) -> io::Result<()> {
        std::fs::remove_file(self.host_path(path)?)?;
        tracing::debug!(path, "deleted file");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::Explorer;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::io;

    /// In-memory explorer for tests
    #[derive(Debug, Default)]
    pub struct MemoryExplorer {
        pub files: RefCell<HashMap<String, Vec<u8>>>,
        pub fail_writes: bool,
        pub fail_reads: bool,
        pub fail_deletes: bool,
        /// Number of write attempts, failed ones included
        pub write_attempts: Cell<usize>,
    }

    impl MemoryExplorer {
        pub fn with_file(path: &str, data: &str) -> Self {
            let explorer = Self::default();
            explorer
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            explorer
        }

        pub fn contents(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Explorer for MemoryExplorer {
        fn is_file(&self, path: &str) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn read_file(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
            if self.fail_reads {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied"));
            }
            Ok(self.files.borrow().get(path).cloned())
        }

        fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
            self.write_attempts.set(self.write_attempts.get() + 1);
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied"));
            }
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn delete_file(&self, path: &str) -> io::Result<()> {
            if self.fail_deletes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "delete denied"));
            }
            self.files
                .borrow_mut()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }
}
