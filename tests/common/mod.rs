//! Common test utilities for column-lens tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use column_lens::{AnalyzeOptions, CatalogDefaults, OutputFormat};

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub work_dir: PathBuf,
    _fixture_name: String,
}

impl TestContext {
    /// Create a new test context by copying a fixture to a temp directory
    pub fn with_fixture(fixture_name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fixture_path = fixture_dir(fixture_name);
        let work_dir = temp_dir.path().to_path_buf();

        copy_dir_recursive(&fixture_path, &work_dir).expect("Failed to copy fixture");

        Self {
            _temp_dir: temp_dir,
            work_dir,
            _fixture_name: fixture_name.to_string(),
        }
    }

    /// Create a context holding a single dashboard written from a JSON string
    pub fn with_dashboard_json(json: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let work_dir = temp_dir.path().to_path_buf();
        fs::write(work_dir.join("dashboard.json"), json).expect("Failed to write dashboard");

        Self {
            _temp_dir: temp_dir,
            work_dir,
            _fixture_name: "<inline>".to_string(),
        }
    }

    pub fn dashboard_path(&self) -> PathBuf {
        self.work_dir.join("dashboard.json")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("output")
    }

    /// Analyze options writing into this context's output directory
    pub fn options(&self, format: OutputFormat) -> AnalyzeOptions {
        AnalyzeOptions {
            dashboard_path: self.dashboard_path(),
            output_dir: self.output_dir(),
            format,
            save: true,
            defaults: CatalogDefaults::default(),
        }
    }

    /// Run a full analysis, panicking with the fixture name on failure
    pub fn analyze_successfully(&self, format: OutputFormat) -> column_lens::Analysis {
        match column_lens::analyze_dashboard(&self.options(format)) {
            Ok(analysis) => analysis,
            Err(e) => panic!("Analysis failed for fixture '{}': {:?}", self._fixture_name, e),
        }
    }

    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output_dir().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}

/// Path to a fixture directory under tests/fixtures
pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture's dashboard.json as a string
pub fn fixture_json(name: &str) -> String {
    fs::read_to_string(fixture_dir(name).join("dashboard.json")).expect("Failed to read fixture")
}

/// Recursively copy a directory
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
