// file: src/parser/frontmatter.rs
// description: YAML frontmatter rendering for synchronized pages
// reference: https://docs.rs/yaml-rust

use crate::error::{Result, SyncError};
use yaml_rust::yaml::Hash;
use yaml_rust::{Yaml, YamlEmitter};

const DELIMITER: &str = "---";

/// Ordered string fields of a frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    /// Renders the block including both `---` delimiters, without a trailing newline.
    ///
    /// Values go through the YAML emitter so titles containing `:` or quotes
    /// stay parseable.
    pub fn render(&self) -> Result<String> {
        let mut hash = Hash::new();
        for (key, value) in &self.fields {
            hash.insert(Yaml::String(key.clone()), Yaml::String(value.clone()));
        }

        let mut out = String::new();
        YamlEmitter::new(&mut out)
            .dump(&Yaml::Hash(hash))
            .map_err(|e| SyncError::Serialization(format!("frontmatter: {:?}", e)))?;

        // the emitter opens the document with its own `---` line
        let body = out.strip_prefix(DELIMITER).unwrap_or(&out).trim_start_matches('\n');

        Ok(format!("{}\n{}\n{}", DELIMITER, body, DELIMITER))
    }
}
