//! `section:variable[:index]` key paths.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Address of a namelist variable, optionally a single list element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub section: String,
    pub variable: String,
    /// 0-based list element
    pub index: Option<usize>,
}

impl KeyPath {
    pub fn new(section: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            variable: variable.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl FromStr for KeyPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let invalid = || StoreError::InvalidPath(s.to_string());

        match parts.as_slice() {
            [section, variable] if !section.is_empty() && !variable.is_empty() => {
                Ok(Self::new(*section, *variable))
            }
            [section, variable, index] if !section.is_empty() && !variable.is_empty() => {
                let index = index.parse().map_err(|_| invalid())?;
                Ok(Self::new(*section, *variable).with_index(index))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.variable)?;
        if let Some(index) = self.index {
            write!(f, ":{}", index)?;
        }
        Ok(())
    }
}
