use std::{fs::File, io::Write, path::Path};

use csv::{Writer, WriterBuilder};

use crate::{
    app::replay::LedgerSink,
    error::Result,
    models::{LEDGER_HEADER, LedgerRow},
};

/// Writes replayed rows as CSV. The header is written up front so that an
/// empty replay still produces a well-formed file.
pub struct LedgerWriter<W: Write> {
    writer: Writer<W>,
}

impl LedgerWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(File::create(path)?)
    }
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(LEDGER_HEADER)?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| std::io::Error::other(err.to_string()).into())
    }
}

impl<W: Write> LedgerSink for LedgerWriter<W> {
    fn write_row(&mut self, row: &LedgerRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }
}
