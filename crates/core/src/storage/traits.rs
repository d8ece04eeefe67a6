use crate::errors::CoreError;

/// Minimal filesystem capability used by the snapshot cache.
///
/// Paths are relative, `/`-separated, and interpreted by the implementation
/// (a directory root for [`super::local::LocalArtifactStore`], a map key for
/// in-memory test stores).
pub trait ArtifactStore: Send + Sync {
    /// File names (not paths) directly inside `dir`. A missing directory is empty.
    fn list(&self, dir: &str) -> Result<Vec<String>, CoreError>;

    /// File content, or `None` if the file does not exist.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Create or replace a file, creating parent directories as needed.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), CoreError>;

    fn delete(&self, path: &str) -> Result<(), CoreError>;
}
