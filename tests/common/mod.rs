//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_file("main.js", "/*requires util.js */main();")
//!     .with_file("util.js", "util();");
//! fixture.command().arg("combine").arg("main.js").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::sources;
    pub use super::TestFixture;
}

/// Source snippets used across tests.
#[allow(dead_code)]
pub mod sources {
    /// Entry file of the canonical two-file example.
    pub const MAIN_JS: &str = "/*requires util.js */alert(1);";

    /// Dependency of [`MAIN_JS`].
    pub const UTIL_JS: &str = "function f(){}";

    /// Combined output of the example without separators.
    pub const EXAMPLE_OUTPUT: &str = "function f(){}alert(1);";

    /// Combined output of the example with separators.
    pub const EXAMPLE_OUTPUT_SEPARATED: &str =
        "\n/*------util.js------*/\nfunction f(){}\n/*------main.js------*/\nalert(1);";
}

/// A temporary directory populated with source files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// The `main.js` / `util.js` example.
    pub fn with_example(self) -> Self {
        self.with_file("main.js", sources::MAIN_JS)
            .with_file("util.js", sources::UTIL_JS)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a binary file with the given path and content.
    pub fn with_binary_file(self, path: &str, content: &[u8]) -> Self {
        self.temp_dir
            .child(path)
            .write_binary(content)
            .expect("Failed to write binary file");
        self
    }

    /// Add a `.combiner.yaml` project file.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".combiner.yaml", content)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file inside the fixture.
    pub fn file(&self, path: &str) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `file-combiner` command running inside the fixture directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("file-combiner");
        cmd.current_dir(self.path())
            .env_remove("FILE_COMBINER_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
