//! Generated file set

use serde::Serialize;

/// One generated file: a path relative to the output directory plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: String,
    pub content: String,
}

impl OutputFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Every file produced for one code target, in unit construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputManifest {
    pub code_target: String,
    files: Vec<OutputFile>,
}

impl OutputManifest {
    pub fn new(code_target: impl Into<String>) -> Self {
        Self {
            code_target: code_target.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: OutputFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    /// The first file with this path.
    pub fn get(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
