//! Storage fixture loader.
//!
//! Loads records from `fixtures/` at the workspace root. The files use the storage
//! layout the site has always written, so they double as compatibility checks.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Load a JSON fixture file relative to the workspace `fixtures/` directory.
///
/// # Example
/// ```no_run
/// use sesmine_testing::fixture::Fixture;
/// let users = Fixture::load("store/users.json");
/// ```
pub struct Fixture;

impl Fixture {
    fn root() -> PathBuf {
        let start = std::env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap());
        start
            .ancestors()
            .find(|a| a.join("fixtures").is_dir())
            .unwrap_or(Path::new("."))
            .join("fixtures")
    }

    /// Load and parse a fixture JSON file at `fixtures/<path>`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = Self::root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }

    /// Load a fixture and deserialize it into `T`.
    ///
    /// Panics if the fixture does not match `T`.
    pub fn load_as<T: DeserializeOwned>(relative_path: &str) -> T {
        serde_json::from_value(Self::load(relative_path)).unwrap_or_else(|e| {
            panic!("fixture {} does not match expected type: {}", relative_path, e)
        })
    }

    /// Raw file contents, for seeding a storage backend byte-for-byte.
    pub fn raw(relative_path: &str) -> String {
        let full_path = Self::root().join(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e))
    }
}
