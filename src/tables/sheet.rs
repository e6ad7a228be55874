//! Keyed, read-only balance sheet.
//!
//! A sheet is serialized as a plain array of rows and kept in a `BTreeMap`, so
//! iteration always follows key order and never depends on hashing.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A row that can live in a [`Sheet`].
pub trait SheetRow {
    type Key: Ord + Copy + fmt::Debug;

    /// Sheet name used in configuration errors
    const NAME: &'static str;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<R: SheetRow> {
    rows: BTreeMap<R::Key, R>,
}

impl<R: SheetRow> Default for Sheet<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: SheetRow> Sheet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet, rejecting duplicate keys.
    pub fn from_rows<I: IntoIterator<Item = R>>(rows: I) -> Result<Self, ConfigError> {
        let mut sheet = Self::new();
        for row in rows {
            sheet.insert(row)?;
        }
        Ok(sheet)
    }

    pub fn insert(&mut self, row: R) -> Result<(), ConfigError> {
        let key = row.key();
        if self.rows.contains_key(&key) {
            return Err(ConfigError::DuplicateRow {
                table: R::NAME,
                key: format!("{key:?}"),
            });
        }
        self.rows.insert(key, row);
        Ok(())
    }

    /// Looks up a row; a missing row is a configuration error.
    pub fn get(&self, key: R::Key) -> Result<&R, ConfigError> {
        self.rows.get(&key).ok_or_else(|| ConfigError::MissingRow {
            table: R::NAME,
            key: format!("{key:?}"),
        })
    }

    pub fn contains(&self, key: R::Key) -> bool {
        self.rows.contains_key(&key)
    }

    /// Rows in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'de, R> Deserialize<'de> for Sheet<R>
where
    R: SheetRow + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<R>::deserialize(deserializer)?;
        Sheet::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

impl<R> Serialize for Sheet<R>
where
    R: SheetRow + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.values())
    }
}
