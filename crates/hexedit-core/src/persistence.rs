//! Operations that write to disk: flushing the edit log and the whole-file
//! reshapes (truncate, insert, delete marked).
//!
//! Reshapes require an empty edit log. They shift the tail of the file in
//! bounded chunks, reopen the file, and put the cursor back on the same
//! absolute offset.

use crate::error::{EditorError, Result};
use crate::events::Response;
use crate::state::{ByteStore, Session};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::Path;

const SHIFT_CHUNK: usize = 64 * 1024;

/// Moves `[from, end)` up by `by` bytes, last chunk first so nothing is
/// overwritten before it has been read.
pub fn shift_forward<F: Read + Write + Seek>(io: &mut F, from: u64, end: u64, by: u64) -> io::Result<()> {
    let mut buf = vec![0u8; SHIFT_CHUNK];
    let mut hi = end;
    while hi > from {
        let len = (hi - from).min(SHIFT_CHUNK as u64) as usize;
        let lo = hi - len as u64;
        io.seek(SeekFrom::Start(lo))?;
        io.read_exact(&mut buf[..len])?;
        io.seek(SeekFrom::Start(lo + by))?;
        io.write_all(&buf[..len])?;
        hi = lo;
    }
    Ok(())
}

/// Moves `[from, end)` down so that it starts at `to`, first chunk first.
pub fn shift_backward<F: Read + Write + Seek>(io: &mut F, from: u64, to: u64, end: u64) -> io::Result<()> {
    let mut buf = vec![0u8; SHIFT_CHUNK];
    let mut pos = from;
    while pos < end {
        let len = (end - pos).min(SHIFT_CHUNK as u64) as usize;
        io.seek(SeekFrom::Start(pos))?;
        io.read_exact(&mut buf[..len])?;
        io.seek(SeekFrom::Start(to + (pos - from)))?;
        io.write_all(&buf[..len])?;
        pos += len as u64;
    }
    Ok(())
}

/// Where the cursor was before a reshape, by absolute offset.
#[derive(Debug, Clone, Copy)]
struct RestorePoint {
    base: u64,
    offset: u64,
}

impl Session {
    /// Writes the edit log to disk.
    ///
    /// On failure every pending edit is gone anyway; the file is reread so
    /// the screen shows what actually reached the disk.
    pub fn save(&mut self) -> Response {
        if self.edits.is_empty() {
            return Response::Done;
        }
        match self.edits.flush(&mut self.store) {
            Ok(()) => Response::Message("Saved".to_string()),
            Err(e) => {
                let size = self.effective_size();
                if let Err(reload) = self.store.reopen() {
                    log::error!("Reloading after a failed save: {}", reload);
                }
                self.forget_mark_past_end(size);
                let size = self.effective_size();
                self.view.normalize(size);
                Response::Notice(format!("{e}. Unsaved changes were discarded"))
            }
        }
    }

    pub fn undo(&mut self) {
        let size = self.effective_size();
        self.edits.discard();
        self.forget_mark_past_end(size);
    }

    /// Cuts the file at the cursor, dropping edits and marks past it.
    pub fn truncate_at_cursor(&mut self) -> Response {
        let point = self.view.absolute();
        if self.is_read_only() {
            return Response::Notice(EditorError::ReadOnly.to_string());
        }
        if self.store.file_size() > point
            && let Err(e) = self.store.set_len(point)
        {
            return Response::Notice(e.to_string());
        }
        self.edits.remove_edits(point, u64::MAX - point);
        self.selection.invalidate_from(point);
        self.store.lower_biggest_loc(point);
        log::info!("Truncated {:?} at {:#x}", self.store.path(), point);
        Response::Done
    }

    /// Inserts `payload` at the cursor, moving the rest of the file up.
    pub fn insert_bytes(&mut self, payload: &[u8]) -> Response {
        let at = self.view.absolute().min(self.store.file_size());
        let len = payload.len() as u64;
        let response = self.reshape(at..u64::MAX, |store| {
            let end = store.file_size();
            shift_forward(store.file_mut(), at, end, len)?;
            store.write_at(at, payload)
        });
        if response == Response::Done {
            log::info!("Inserted {} bytes at {:#x}", len, at);
            self.highlight = Some(at..at + len);
        }
        response
    }

    /// Deletes the marked bytes, moving the rest of the file down.
    pub fn remove_marked(&mut self) -> Response {
        let Some(range) = self.selection.range() else {
            return Response::Notice("Nothing marked".to_string());
        };
        let response = self.reshape(range.clone(), |store| {
            let size = store.file_size();
            let end = range.end.min(size);
            if range.start >= end {
                return Ok(());
            }
            shift_backward(store.file_mut(), end, range.start, size)?;
            store.set_len(size - (end - range.start))
        });
        if response == Response::Done {
            log::info!("Removed {} marked bytes at {:#x}", range.end - range.start, range.start);
        }
        response
    }

    /// Runs a whole-file reshape, then reloads and restores the cursor.
    /// The store is reopened even when `op` fails halfway.
    fn reshape<F>(&mut self, affected: Range<u64>, op: F) -> Response
    where
        F: FnOnce(&mut ByteStore) -> Result<()>,
    {
        if !self.edits.is_empty() {
            return Response::Notice("Save or undo pending changes first".to_string());
        }
        if self.is_read_only() {
            return Response::Notice(EditorError::ReadOnly.to_string());
        }
        let point = RestorePoint {
            base: self.view.base,
            offset: self.view.absolute(),
        };

        let outcome = op(&mut self.store);
        let reopened = self.store.reopen();
        self.selection.invalidate_overlapping(affected);
        self.restore_view(point);

        match outcome.and(reopened) {
            Ok(()) => Response::Done,
            Err(e) => {
                log::error!("Reshaping {:?} failed: {}", self.store.path(), e);
                Response::Notice(e.to_string())
            }
        }
    }

    fn restore_view(&mut self, point: RestorePoint) {
        let size = self.effective_size();
        self.view.set_base(point.base.min(size), size);
        self.view.set_cursor(point.offset.min(size), size);
        self.view.nibble = 0;
    }

    /// Writes the clipboard to `path`, replacing any existing file.
    pub fn yank_to_file(&mut self, path: &Path) -> Response {
        match std::fs::write(path, &self.clipboard) {
            Ok(()) => {
                log::info!("Wrote {} clipboard bytes to {:?}", self.clipboard.len(), path);
                Response::Message(format!("Wrote {} bytes to {}", self.clipboard.len(), path.display()))
            }
            Err(e) => Response::Notice(e.to_string()),
        }
    }

    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Response {
        match ByteStore::open(path, self.read_only) {
            Ok(store) => {
                self.replace_store(store);
                Response::Done
            }
            Err(e) => Response::Notice(e.to_string()),
        }
    }
}
