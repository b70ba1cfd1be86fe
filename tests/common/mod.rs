//! Common testing utilities for Secret Defines integration tests.
//!
//! The external secret store is simulated by a small `sh` script. It is run
//! as `sh <script> lookup <collection> <attribute>`, so the script itself
//! never needs the executable bit.

use secret_defines::config::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The four store entries used throughout the tests.
#[allow(dead_code)]
pub const STANDARD_SECRETS: [(&str, &str, &str); 4] = [
    ("wifi", "ssid", "MyNetwork"),
    ("wifi", "password", "Sup3rSecret"),
    ("mqtt", "user", "device01"),
    ("mqtt", "password", "hunter2"),
];

/// Test context that manages temporary files and directories.
pub struct TestContext {
    /// Path to temporary directory
    pub temp_path: PathBuf,
    /// The temporary directory (kept to prevent early deletion)
    _temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().to_path_buf();

        Ok(Self {
            temp_path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a test file with content.
    pub fn create_file(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let file_path = self.temp_path.join(name);
        let mut file = fs::File::create(&file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(file_path)
    }

    /// Write a fake store script answering the given `(collection, attribute, value)`
    /// entries and failing with a non-zero status for anything else.
    ///
    /// Every query is appended to `calls.log`. A query for collection `echo`
    /// prints back its attribute unchanged.
    pub fn create_store_script(&self, secrets: &[(&str, &str, &str)]) -> anyhow::Result<PathBuf> {
        let log = self.call_log_path();

        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(
            "printf '%s/%s\\n' \"$2\" \"$3\" >> {}\n",
            sh_quote(&log.to_string_lossy())
        ));
        script.push_str("case \"$2/$3\" in\n");
        for (collection, attribute, value) in secrets {
            script.push_str(&format!(
                "  {}) printf '%s\\n' {} ;;\n",
                sh_quote(&format!("{}/{}", collection, attribute)),
                sh_quote(value)
            ));
        }
        script.push_str("  echo/*) printf '%s' \"$3\" ;;\n");
        script.push_str("  *) echo \"secret-tool: no secret for $2/$3\" >&2; exit 1 ;;\n");
        script.push_str("esac\n");

        self.create_file("store.sh", &script)
    }

    /// Configuration that runs `script` through `sh`.
    pub fn store_config(&self, script: &Path) -> Config {
        let mut config = Config::default();
        config.store.program = "sh".to_string();
        config.store.args = vec![script.to_string_lossy().into_owned(), "lookup".to_string()];
        config
    }

    /// Write `config` as YAML and return its path.
    #[allow(dead_code)]
    pub fn write_config(&self, config: &Config) -> anyhow::Result<PathBuf> {
        let yaml = serde_yaml::to_string(config)?;
        self.create_file("secret-defines.yaml", &yaml)
    }

    /// References the fake store was queried for, in order.
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.call_log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn call_log_path(&self) -> PathBuf {
        self.temp_path.join("calls.log")
    }
}

/// Single-quote a word for `sh`.
pub fn sh_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_context_create_file() {
        let ctx = TestContext::new().unwrap();
        let file_path = ctx.create_file("test.txt", "Hello, World!").unwrap();

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_sh_quote() {
        assert_eq!(sh_quote("plain"), "'plain'");
        assert_eq!(sh_quote("it's"), r"'it'\''s'");
    }
}
