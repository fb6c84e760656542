use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::{
    error::{LedgerError, Result},
    models::{CatalogEntry, FundId},
};

/// Canonical fund names and their numeric identifiers, loaded once per run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FundCatalog {
    ids_by_name: BTreeMap<String, FundId>,
}

impl FundCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file, &path.display().to_string())?;
        info!(path = %path.display(), funds = catalog.len(), "Read fund catalog");
        Ok(catalog)
    }

    /// Reads `id,name` records. Every record must have exactly two fields.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut catalog = Self::default();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or_default();

            if record.len() != 2 {
                return Err(LedgerError::format(
                    source_name,
                    line,
                    format!(
                        "expected 2 fields, found {} in '{}'",
                        record.len(),
                        record.iter().collect::<Vec<_>>().join(",")
                    ),
                ));
            }

            let id = record[0].trim().parse::<FundId>().map_err(|_| {
                LedgerError::format(source_name, line, format!("invalid fund id '{}'", &record[0]))
            })?;

            let name = record[1].trim();
            if name.is_empty() {
                return Err(LedgerError::format(
                    source_name,
                    line,
                    format!("empty fund name for id {}", id),
                ));
            }

            catalog.insert(name, id);
        }

        Ok(catalog)
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.insert(entry.name(), *entry.id());
        }
        catalog
    }

    fn insert(&mut self, name: &str, id: FundId) {
        if let Some(previous) = self.ids_by_name.insert(name.to_string(), id) {
            if previous != id {
                warn!(name, previous, id, "Duplicate fund name in catalog, keeping the later id");
            }
        }
    }

    pub fn id_of(&self, name: &str) -> Option<FundId> {
        self.ids_by_name.get(name).copied()
    }

    /// Entries in ascending name order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.ids_by_name
            .iter()
            .map(|(name, id)| CatalogEntry::new(name.clone(), *id))
    }

    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }
}
