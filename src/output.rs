//! Writing the rendered index and the run summary

use crate::index::{CompileStats, Ingested};
use crate::utils::write_utf16le;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Write the index as UTF-16LE with a BOM, to `path` or to stdout
pub fn write_index(text: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_utf16le(&mut writer, text)
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_utf16le(&mut lock, text)
        }
    }
}

/// Print skipped files and totals to stderr
pub fn print_summary(ingested: &Ingested, stats: &CompileStats, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    write_summary(&mut stderr, ingested, stats)
}

/// Write the run summary to any color-capable writer
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    ingested: &Ingested,
    stats: &CompileStats,
) -> io::Result<()> {
    for skipped in &ingested.skipped {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(out, "skipped")?;
        out.reset()?;
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", skipped.path.display())?;
        out.reset()?;
        writeln!(out, ": {}", skipped.error)?;
    }

    let total_files = ingested.files_read + ingested.skipped.len();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "indexed")?;
    out.reset()?;
    writeln!(
        out,
        " {} entries under {} headings from {} of {} files",
        stats.entries, stats.headings, ingested.files_read, total_files
    )?;

    if stats.unresolved > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "unresolved")?;
        out.reset()?;
        writeln!(out, " {} references sorted last", stats.unresolved)?;
    }

    Ok(())
}
