//! Common test utilities for groundwork integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch host directory for integration tests
#[allow(dead_code)]
pub struct TestHost {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the directory root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestHost {
    /// Create a new scratch directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file under the scratch directory
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Write a YAML plan file and return its path
    pub fn write_plan(&self, name: &str, content: &str) -> PathBuf {
        self.write_file(name, content)
    }

    /// Read a file from the scratch directory
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the scratch directory
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}
