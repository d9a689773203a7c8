use crate::error::{EditorError, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Random access into the target file plus what is known about its length.
///
/// `file_size` is the length last measured on disk. `biggest_loc` is the
/// furthest offset known to be addressable; it can run ahead of
/// `file_size` after the log extends the file, and is pulled back by a
/// truncation.
pub struct ByteStore {
    path: PathBuf,
    file: File,
    read_only: bool,
    force_read_only: bool,
    file_size: u64,
    biggest_loc: u64,
}

impl ByteStore {
    /// Opens `path` read-write, falling back to read-only when the file
    /// cannot be opened for writing.
    pub fn open(path: impl AsRef<Path>, force_read_only: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (mut file, read_only) = open_file(&path, force_read_only)?;
        let file_size = measure(&mut file)?;
        log::info!(
            "Opened {:?} ({} bytes{})",
            path,
            file_size,
            if read_only { ", read-only" } else { "" }
        );
        Ok(Self {
            path,
            file,
            read_only,
            force_read_only,
            file_size,
            biggest_loc: file_size,
        })
    }

    /// Closes and reopens the same path so seek position and size are
    /// measured afresh after the file was reshaped.
    pub fn reopen(&mut self) -> Result<()> {
        let (mut file, read_only) = open_file(&self.path, self.force_read_only)?;
        self.file_size = measure(&mut file)?;
        self.file = file;
        self.read_only = read_only;
        self.biggest_loc = self.file_size;
        log::debug!("Reopened {:?} ({} bytes)", self.path, self.file_size);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn biggest_loc(&self) -> u64 {
        self.biggest_loc
    }

    /// The furthest offset the cursor may reach, ignoring pending edits.
    pub fn effective_size(&self) -> u64 {
        self.file_size.max(self.biggest_loc)
    }

    pub(crate) fn grow_to(&mut self, size: u64) {
        if size > self.file_size {
            self.file_size = size;
        }
        if size > self.biggest_loc {
            self.biggest_loc = size;
        }
    }

    pub(crate) fn lower_biggest_loc(&mut self, loc: u64) {
        if self.biggest_loc > loc {
            self.biggest_loc = loc;
        }
    }

    pub(crate) fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Fills `buf` from `offset`, returning how many bytes were available.
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if offset >= self.file_size {
            return Ok(0);
        }
        self.file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        Ok(())
    }

    /// Shrinks (or grows) the file on disk to `len` bytes.
    pub fn set_len(&mut self, len: u64) -> Result<()> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        self.file.set_len(len)?;
        self.file_size = len;
        Ok(())
    }
}

fn open_file(path: &Path, force_read_only: bool) -> Result<(File, bool)> {
    if !force_read_only {
        match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => return Ok((file, false)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EditorError::NoSuchFile(path.to_path_buf()));
            }
            Err(e) => log::warn!("Opening {:?} read-write failed ({}), trying read-only", path, e),
        }
    }
    match File::open(path) {
        Ok(file) => Ok((file, true)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(EditorError::NoSuchFile(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}

// Seeking to the end also works for block devices, where metadata reports 0.
fn measure(file: &mut File) -> Result<u64> {
    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;
    Ok(size)
}
