//! Streaming output formatter
//!
//! `EntryFormatter` writes each scan entry as soon as it arrives, so lazy
//! scans print without collecting anything.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::scan::{AggregateCount, Entry};

use super::config::OutputConfig;
use super::utils::{format_number, format_size};

/// Writes entries and aggregates, one line at a time.
pub struct EntryFormatter<W: WriteColor> {
    config: OutputConfig,
    out: W,
    dirs: u64,
    files: u64,
}

impl EntryFormatter<StandardStream> {
    /// Formatter over stdout, colored if the config allows it.
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice), config)
    }
}

impl<W: WriteColor> EntryFormatter<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self {
            config,
            out,
            dirs: 0,
            files: 0,
        }
    }

    /// Write one entry: directories in bold blue, files plain.
    pub fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        let text = if self.config.names_only {
            entry.name().into_owned()
        } else {
            entry.path.display().to_string()
        };

        if entry.is_dir {
            self.dirs += 1;
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            write!(self.out, "{}", text)?;
            self.out.reset()?;
            writeln!(self.out)?;
        } else {
            self.files += 1;
            writeln!(self.out, "{}", text)?;
        }
        Ok(())
    }

    /// Write a list of entries.
    pub fn write_entries<'a, I>(&mut self, entries: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        for entry in entries {
            self.write_entry(entry)?;
        }
        Ok(())
    }

    /// Write a size on its own line, in bytes or human units.
    pub fn write_size(&mut self, bytes: u64) -> io::Result<()> {
        if self.config.human_sizes {
            writeln!(self.out, "{}", format_size(bytes))
        } else {
            writeln!(self.out, "{}", bytes)
        }
    }

    /// Write an aggregate as a small report.
    pub fn write_count(&mut self, count: &AggregateCount) -> io::Result<()> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);

        self.out.set_color(&bold)?;
        write!(self.out, "Files:")?;
        self.out.reset()?;
        writeln!(self.out, "        {}", format_number(count.files))?;

        self.out.set_color(&bold)?;
        write!(self.out, "Directories:")?;
        self.out.reset()?;
        writeln!(self.out, "  {}", format_number(count.dirs))?;

        self.out.set_color(&bold)?;
        write!(self.out, "Total:")?;
        self.out.reset()?;
        writeln!(self.out, "        {}", format_number(count.total()))?;

        self.out.set_color(&bold)?;
        write!(self.out, "Size:")?;
        self.out.reset()?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        let size = if self.config.human_sizes {
            format_size(count.total_size_bytes)
        } else {
            format!("{} bytes", format_number(count.total_size_bytes))
        };
        write!(self.out, "         {}", size)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    /// Directories and files written so far.
    pub fn counts(&self) -> (u64, u64) {
        (self.dirs, self.files)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
