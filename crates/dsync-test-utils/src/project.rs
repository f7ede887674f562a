//! [`TestProject`] builder for design-sync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source text of a hand-written component file embedding `literal`.
///
/// The surrounding code mimics what developers keep next to the embedded
/// definition, so tests can check it is not clobbered by extraction.
pub fn component_source(factory: &str, name: &str, literal: &str) -> String {
    format!(
        "import {{ {factory} }} from '@splitflow/designer'\n\nexport const style = {factory}('{name}', {literal})\n"
    )
}

/// A temporary project directory with helpers for laying out component files.
///
/// # Example
///
/// ```rust,no_run
/// use dsync_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_file("src/card/card.sf.ts", "export const style = {}");
/// project.assert_file_contains("src/card/card.sf.ts", "style");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path for a project-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestProject: failed to create {parent:?}: {e}"));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProject: failed to write {rel}: {e}"));
        path
    }

    /// Write a component file embedding `literal` through `factory`.
    pub fn write_component(&self, rel: &str, factory: &str, name: &str, literal: &str) -> PathBuf {
        self.write_file(rel, &component_source(factory, name, literal))
    }

    /// Create an empty directory.
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("TestProject: failed to create {rel}: {e}"));
        path
    }

    /// Read a project file.
    pub fn read_file(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("TestProject: failed to read {rel}: {e}"))
    }

    pub fn file_exists(&self, rel: &str) -> bool {
        self.path(rel).is_file()
    }

    /// Names of the entries directly under `rel`, sorted.
    pub fn list_dir(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path(rel))
            .unwrap_or_else(|e| panic!("TestProject: failed to list {rel}: {e}"))
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn assert_file_exists(&self, rel: &str) {
        assert!(self.file_exists(rel), "Expected file to exist: {rel}");
    }

    pub fn assert_file_not_exists(&self, rel: &str) {
        assert!(!self.file_exists(rel), "Expected file to be absent: {rel}");
    }

    pub fn assert_file_contains(&self, rel: &str, needle: &str) {
        let content = self.read_file(rel);
        assert!(
            content.contains(needle),
            "Expected {rel} to contain {needle:?}, got:\n{content}"
        );
    }
}
