// Test utilities for stubsmith integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use stubsmith::{synthesize_trait, GeneratedMockType, StubsmithError, SynthesisOptions};
use tempfile::TempDir;

pub fn parse_trait(source: &str) -> syn::ItemTrait {
    syn::parse_str(source).expect("test trait should parse")
}

pub fn synthesize(source: &str) -> Result<GeneratedMockType, StubsmithError> {
    synthesize_trait(&parse_trait(source), &SynthesisOptions::default())
}

/// Normalized token text, so expectations are independent of whitespace.
pub fn normalize(source: &str) -> String {
    let file: syn::File = syn::parse_str(source).expect("expected source should parse");
    quote::ToTokens::to_token_stream(&file).to_string()
}

// Temporary project with Rust sources for CLI tests
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }
}
