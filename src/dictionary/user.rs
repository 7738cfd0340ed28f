//! User dictionary compiled from a line-oriented source file.
//!
//! Each non-empty, non-comment line declares one custom word:
//!
//! ```text
//! # surface,segmentation,readings,part-of-speech
//! 関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,カスタム名詞
//! ```
//!
//! The segmentation lists the parts the surface is split into and the
//! readings give one reading per part.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, YomiError};

/// One segment of a user dictionary entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Surface text of the segment.
    pub surface: String,
    /// Reading of the segment.
    pub reading: String,
}

/// A custom word and the parts it is segmented into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEntry {
    /// Full surface form matched in the input.
    pub surface: String,
    /// Parts emitted as tokens, in order.
    pub segments: Vec<Segment>,
    /// Part-of-speech tag given to every part.
    pub pos_tag: String,
}

/// Immutable user dictionary with longest-match lookup.
#[derive(Clone, Debug, Default)]
pub struct UserDictionary {
    entries: HashMap<String, Arc<UserEntry>>,
    max_chars: usize,
}

impl UserDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and compile a dictionary file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            YomiError::dictionary_source(format!(
                "failed to read user dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content).map_err(|e| match e {
            YomiError::DictionarySource(msg) => {
                YomiError::dictionary_source(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Compile a dictionary from source text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut dictionary = UserDictionary::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_line(line)
                .map_err(|msg| YomiError::dictionary_source(format!("line {}: {}", idx + 1, msg)))?;
            dictionary.insert(entry);
        }

        Ok(dictionary)
    }

    /// Add an entry, replacing any entry with the same surface.
    pub fn insert(&mut self, entry: UserEntry) {
        self.max_chars = self.max_chars.max(entry.surface.chars().count());
        self.entries.insert(entry.surface.clone(), Arc::new(entry));
    }

    /// Find the longest entry that is a prefix of `text`.
    pub fn longest_match(&self, text: &str) -> Option<&UserEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let ends: Vec<usize> = text
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .take(self.max_chars)
            .collect();

        ends.iter()
            .rev()
            .find_map(|&end| self.entries.get(&text[..end]))
            .map(|entry| entry.as_ref())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> std::result::Result<UserEntry, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 comma-separated fields, found {}", fields.len()));
    }
    let (surface, segmentation, readings, pos_tag) = (fields[0], fields[1], fields[2], fields[3]);
    if surface.is_empty() {
        return Err("empty surface".to_string());
    }
    if pos_tag.is_empty() {
        return Err(format!("empty part-of-speech for '{surface}'"));
    }

    let parts: Vec<&str> = segmentation.split_whitespace().collect();
    let readings: Vec<&str> = readings.split_whitespace().collect();
    if parts.is_empty() {
        return Err(format!("empty segmentation for '{surface}'"));
    }
    if parts.len() != readings.len() {
        return Err(format!(
            "'{}' has {} segments but {} readings",
            surface,
            parts.len(),
            readings.len()
        ));
    }
    if parts.concat() != surface {
        return Err(format!("segmentation of '{surface}' does not spell the surface"));
    }

    Ok(UserEntry {
        surface: surface.to_string(),
        segments: parts
            .into_iter()
            .zip(readings)
            .map(|(surface, reading)| Segment {
                surface: surface.to_string(),
                reading: reading.to_string(),
            })
            .collect(),
        pos_tag: pos_tag.to_string(),
    })
}
