//! Test utilities and fixtures for the Aero router.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use tempfile::TempDir;

/// Generate a strategy for URL-like route paths such as `/ab/c`.
///
/// A small alphabet keeps shared prefixes frequent.
pub fn route_path_strategy() -> BoxedStrategy<String> {
    prop::string::string_regex("(/[abc]{0,3}){1,4}")
        .expect("valid path regex")
        .boxed()
}

/// A test fixture owning a temporary directory and any environment
/// variables set through it.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,

    /// Vector of environment variables to cleanup after tests
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key_str = key.into();
        std::env::set_var(&key_str, value.into());
        self.env_vars.push(key_str);
    }

    /// Write `contents` to `name` inside the fixture directory.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn write_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
