// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! I/O for detector recordings and fused results.
//!
//! Recordings are JSON lines, one [`FrameDetections`] per line. Fused output is written
//! the same way, one [`FusedFrame`] per line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::detection::FrameDetections;
use crate::error::{FusionError, Result};
use crate::results::FusionOutput;

/// Streams frames from a JSON-lines detector recording.
///
/// Blank lines are skipped. Frame indices count non-blank lines from zero.
pub struct FrameReader<R> {
    reader: R,
    line_no: usize,
    frame_idx: usize,
    buf: String,
}

impl FrameReader<BufReader<File>> {
    /// Open a recording file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| FusionError::IoError(format!("{}: {e}", path.display())))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FrameReader<R> {
    /// Wrap any buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            frame_idx: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<(usize, FrameDetections)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => return Some(Err(e.into())),
            }
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = serde_json::from_str::<FrameDetections>(line)
                .map_err(|e| FusionError::ParseError(format!("line {}: {e}", self.line_no)));
            let idx = self.frame_idx;
            self.frame_idx += 1;
            return Some(parsed.map(|frame| (idx, frame)));
        }
    }
}

/// Read every frame of a recording.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any line fails to parse.
pub fn read_frames<P: AsRef<Path>>(path: P) -> Result<Vec<FrameDetections>> {
    FrameReader::open(path)?
        .map(|item| item.map(|(_, frame)| frame))
        .collect()
}

/// One line of fused output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedFrame {
    /// Frame index in the recording.
    pub frame: usize,
    /// Fused result for the frame.
    #[serde(flatten)]
    pub output: FusionOutput,
}

/// Writes fused frames as JSON lines.
pub struct ResultWriter<W: Write> {
    writer: W,
    written: usize,
}

impl ResultWriter<BufWriter<File>> {
    /// Create (or truncate) an output file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| FusionError::IoError(format!("{}: {e}", parent.display())))?;
        }
        let file = File::create(&path)
            .map_err(|e| FusionError::IoError(format!("{}: {e}", path.display())))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ResultWriter<W> {
    /// Wrap any writer.
    pub const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of frames written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Append one fused frame.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write(&mut self, frame: &FusedFrame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
