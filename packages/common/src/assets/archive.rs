use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::CompressionMethod;
use zip::DateTime;
use zip::result::ZipError;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::error::AssetError;
use super::filename::strip_upload_timestamp;

/// Read buffer for copying source files into the archive.
const COPY_BUF_SIZE: usize = 64 * 1024;

/// One planned archive member: a source file on disk and the display name
/// it gets inside the archive (upload timestamps stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub source: PathBuf,
    pub name: String,
}

/// Enumerates `dir` (non-recursive), keeps `.pdf` files, derives display
/// names, and returns entries sorted by display name.
///
/// Two sources that normalize to the same display name collapse to one
/// entry; the lexicographically last source filename wins, so the plan is
/// stable across runs of an unchanged directory.
pub fn plan_pdf_bundle(dir: &Path) -> Result<Vec<BundleEntry>, AssetError> {
    let mut sources: Vec<(String, String)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !name.ends_with(".pdf") {
            continue;
        }
        sources.push((strip_upload_timestamp(&name), name));
    }

    if sources.is_empty() {
        return Err(AssetError::EmptyBundle);
    }

    sources.sort();
    let mut by_display: BTreeMap<String, String> = BTreeMap::new();
    for (display, source) in sources {
        if let Some(replaced) = by_display.insert(display.clone(), source) {
            let display_name = display.as_str();
            let replaced_source = replaced.as_str();
            debug!(
                display = display_name,
                replaced = replaced_source,
                "bundle name collision, keeping later source"
            );
        }
    }

    Ok(by_display
        .into_iter()
        .map(|(name, source)| BundleEntry {
            source: dir.join(source),
            name,
        })
        .collect())
}

/// Streams `entries` into a ZIP written to `sink`, Deflate at maximum
/// level. Entry timestamps are fixed so an unchanged directory produces
/// byte-identical archives.
///
/// Returns the sink after the archive footer is flushed. Callers using
/// [`StreamSink`] must still call [`StreamSink::finish`] to drain the
/// retained tail.
pub fn write_bundle<W: Write + Seek>(entries: &[BundleEntry], sink: W) -> Result<W, AssetError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(sink);
    let mut buf = vec![0u8; COPY_BUF_SIZE];

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)
            .map_err(zip_error)?;
        let mut file = fs::File::open(&entry.source)?;
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            zip.write_all(&buf[..n]).map_err(AssetError::from_sink)?;
        }
    }

    zip.finish().map_err(zip_error)
}

fn zip_error(err: ZipError) -> AssetError {
    match err {
        ZipError::Io(io) => AssetError::from_sink(io),
        other => AssetError::Archive(other),
    }
}

/// Bytes retained behind a patch target; the ZIP writer revisits nearby
/// header fields when it finalizes an entry.
const PATCH_WINDOW: u64 = 512;

/// Adapts a forward-only byte sink (an HTTP response channel) to the
/// `Write + Seek` surface the ZIP writer needs.
///
/// The writer only ever seeks backwards to patch the local header of the
/// entry it just finished, so everything earlier in the stream is final.
/// `StreamSink` keeps the not-yet-final tail in memory (bounded by one
/// entry's header plus its compressed data) and pushes everything before
/// it downstream as soon as a backward seek proves it final.
pub struct StreamSink<W: Write> {
    inner: W,
    /// Bytes already handed to `inner`.
    flushed: u64,
    /// Logical bytes `[flushed, flushed + tail.len())`, still patchable.
    tail: Vec<u8>,
    /// Current logical stream position.
    pos: u64,
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            flushed: 0,
            tail: Vec::new(),
            pos: 0,
        }
    }

    fn end(&self) -> u64 {
        self.flushed + self.tail.len() as u64
    }

    /// Sends `[flushed, upto)` downstream.
    fn flush_before(&mut self, upto: u64) -> io::Result<()> {
        if upto <= self.flushed {
            return Ok(());
        }
        let n = (upto - self.flushed) as usize;
        self.inner.write_all(&self.tail[..n])?;
        self.tail.drain(..n);
        self.flushed = upto;
        Ok(())
    }

    /// Drains the retained tail and flushes the inner sink. Must be called
    /// after the archive footer has been written.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_before(self.end())?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for StreamSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.pos < self.flushed {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "write into already-flushed region of the archive stream",
            ));
        }
        let off = (self.pos - self.flushed) as usize;
        let upto = off + buf.len();
        if upto > self.tail.len() {
            self.tail.resize(upto, 0);
        }
        self.tail[off..upto].copy_from_slice(buf);
        self.pos += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // The tail is drained on backward seeks and in `finish`; flushing
        // it here could expose bytes the writer still intends to patch.
        self.inner.flush()
    }
}

impl<W: Write> Seek for StreamSink<W> {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let target = match from {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(d) => self.end().checked_add_signed(d),
            SeekFrom::Current(d) => self.pos.checked_add_signed(d),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek before start of stream")
        })?;

        if target < self.flushed {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "seek into already-flushed region of the archive stream",
            ));
        }

        // A backward seek means everything well before the target is final.
        if target < self.pos {
            self.flush_before(target.saturating_sub(PATCH_WINDOW))?;
        }

        self.pos = target;
        Ok(target)
    }
}
