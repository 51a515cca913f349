//! The namelist document and its persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::path::KeyPath;
use crate::value::{coerce_like, expect_f64, expect_i64, expect_string};

/// On-disk representation of a namelist document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// An ordered collection of namelist sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namelist {
    sections: Mapping,
}

impl Namelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document in the given format.
    pub fn parse(text: &str, format: DocumentFormat) -> StoreResult<Self> {
        let root: Value = match format {
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
            DocumentFormat::Json => serde_json::from_str(text)?,
        };
        Self::from_value(root)
    }

    pub fn from_yaml_str(text: &str) -> StoreResult<Self> {
        Self::parse(text, DocumentFormat::Yaml)
    }

    fn from_value(root: Value) -> StoreResult<Self> {
        let sections = match root {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(StoreError::InvalidDocument(format!(
                    "top level must be a mapping of sections, found {}",
                    crate::value::type_name(&other)
                )))
            }
        };

        for (name, section) in &sections {
            let name = name
                .as_str()
                .ok_or_else(|| StoreError::InvalidDocument("section names must be strings".into()))?;
            if !section.is_mapping() {
                return Err(StoreError::InvalidDocument(format!(
                    "section '{}' must be a mapping of variables",
                    name
                )));
            }
        }

        Ok(Self { sections })
    }

    /// Load a namelist document from disk.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let namelist = Self::parse(&text, DocumentFormat::from_path(path))?;
        debug!(path = %path.display(), sections = namelist.sections.len(), "Loaded namelist");
        Ok(namelist)
    }

    /// Serialize in the given format.
    pub fn to_string_as(&self, format: DocumentFormat) -> StoreResult<String> {
        Ok(match format {
            DocumentFormat::Yaml => serde_yaml::to_string(&self.sections)?,
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(&self.sections)?;
                text.push('\n');
                text
            }
        })
    }

    /// Write the whole document to `path`.
    ///
    /// The document is written to a temporary file in the same directory
    /// and renamed over the target, so readers never see a partial file.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let text = self.to_string_as(DocumentFormat::from_path(path))?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), bytes = text.len(), "Wrote namelist");
        Ok(())
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().filter_map(Value::as_str)
    }

    /// Look up a section by case-insensitive name.
    pub fn section(&self, name: &str) -> Option<&Mapping> {
        find_key(&self.sections, name)
            .and_then(|k| self.sections.get(k))
            .and_then(Value::as_mapping)
    }

    fn section_mut(&mut self, name: &str) -> &mut Mapping {
        let key = find_key(&self.sections, name)
            .cloned()
            .unwrap_or_else(|| Value::String(name.to_string()));
        let entry = self
            .sections
            .entry(key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !entry.is_mapping() {
            *entry = Value::Mapping(Mapping::new());
        }
        match entry {
            Value::Mapping(map) => map,
            _ => unreachable!("section entry was just made a mapping"),
        }
    }

    /// Look up a variable by case-insensitive section and name.
    pub fn get(&self, section: &str, variable: &str) -> Option<&Value> {
        let map = self.section(section)?;
        find_key(map, variable).and_then(|k| map.get(k))
    }

    /// Look up a variable, failing if absent.
    pub fn require(&self, section: &str, variable: &str) -> StoreResult<&Value> {
        self.get(section, variable)
            .ok_or_else(|| StoreError::MissingKey(format!("{}:{}", section, variable)))
    }

    /// Set a variable, keeping its position if it already exists.
    pub fn set(&mut self, section: &str, variable: &str, value: Value) {
        let map = self.section_mut(section);
        let key = find_key(map, variable)
            .cloned()
            .unwrap_or_else(|| Value::String(variable.to_string()));
        map.insert(key, value);
    }

    /// Resolve a key path, including an optional list index.
    ///
    /// Index 0 of a scalar addresses the scalar itself.
    pub fn get_path(&self, path: &KeyPath) -> StoreResult<&Value> {
        let value = self.require(&path.section, &path.variable)?;
        match (path.index, value) {
            (None, v) => Ok(v),
            (Some(i), Value::Sequence(items)) => {
                items.get(i).ok_or_else(|| StoreError::IndexOutOfRange {
                    key: path.to_string(),
                    index: i,
                    len: items.len(),
                })
            }
            (Some(0), v) => Ok(v),
            (Some(i), _) => Err(StoreError::IndexOutOfRange {
                key: path.to_string(),
                index: i,
                len: 1,
            }),
        }
    }

    /// Set the variable at `path` from text, converting it to the type of
    /// the value already stored there.
    pub fn set_from_str(&mut self, path: &KeyPath, text: &str) -> StoreResult<()> {
        let key = path.to_string();
        let existing = self.get_path(path)?;
        let parsed = coerce_like(&key, existing, text)?;

        let new_value = match (path.index, self.require(&path.section, &path.variable)?) {
            (Some(i), Value::Sequence(items)) => {
                let mut items = items.clone();
                items[i] = parsed;
                Value::Sequence(items)
            }
            _ => parsed,
        };

        debug!(key = %key, value = %text, "Setting namelist variable");
        self.set(&path.section, &path.variable, new_value);
        Ok(())
    }

    /// Read a variable as a list of exactly `len` elements.
    ///
    /// A bare scalar is a single element list. Longer lists are truncated;
    /// shorter ones are an error.
    pub fn list(&self, section: &str, variable: &str, len: usize) -> StoreResult<Vec<Value>> {
        let key = format!("{}:{}", section, variable);
        let value = self.require(section, variable)?;
        let mut items = match value {
            Value::Sequence(items) => items.clone(),
            Value::Mapping(_) => return Err(StoreError::type_mismatch(key, "a scalar or list", value)),
            scalar => vec![scalar.clone()],
        };

        if items.len() < len {
            return Err(StoreError::InvalidDocument(format!(
                "'{}' has {} value(s) but max_dom is {}",
                key,
                items.len(),
                len
            )));
        }
        items.truncate(len);
        Ok(items)
    }

    pub fn i64_list(&self, section: &str, variable: &str, len: usize) -> StoreResult<Vec<i64>> {
        let key = format!("{}:{}", section, variable);
        self.list(section, variable, len)?
            .iter()
            .map(|v| expect_i64(&key, v))
            .collect()
    }

    pub fn string_list(&self, section: &str, variable: &str, len: usize) -> StoreResult<Vec<String>> {
        let key = format!("{}:{}", section, variable);
        self.list(section, variable, len)?
            .iter()
            .map(|v| expect_string(&key, v))
            .collect()
    }

    /// Read a scalar integer. A one element list is accepted.
    pub fn i64(&self, section: &str, variable: &str) -> StoreResult<i64> {
        let key = format!("{}:{}", section, variable);
        expect_i64(&key, first_of(self.require(section, variable)?))
    }

    /// Read a scalar number. A one element list is accepted.
    pub fn f64(&self, section: &str, variable: &str) -> StoreResult<f64> {
        let key = format!("{}:{}", section, variable);
        expect_f64(&key, first_of(self.require(section, variable)?))
    }

    /// Read a scalar string. A one element list is accepted.
    pub fn string(&self, section: &str, variable: &str) -> StoreResult<String> {
        let key = format!("{}:{}", section, variable);
        expect_string(&key, first_of(self.require(section, variable)?))
    }
}

/// First element of a list, or the value itself.
fn first_of(value: &Value) -> &Value {
    match value {
        Value::Sequence(items) if !items.is_empty() => &items[0],
        v => v,
    }
}

fn find_key<'a>(map: &'a Mapping, name: &str) -> Option<&'a Value> {
    map.keys()
        .find(|k| k.as_str().is_some_and(|s| s.eq_ignore_ascii_case(name)))
}
