use super::edit_log::EditLog;
use super::selection::Selection;
use super::store::ByteStore;
use super::types::{CellAttr, Window};
use super::view::{ViewSnapshot, ViewState};
use crate::error::Result;
use std::ops::Range;
use std::path::Path;

/// Multi-key sequences waiting for their second key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum PendingKey {
    #[default]
    None,
    Quoted,
    Escape,
}

/// Everything one editing session owns: the open file, the pending edits,
/// the view and the selection.
pub struct Session {
    pub store: ByteStore,
    pub edits: EditLog,
    pub view: ViewState,
    pub selection: Selection,
    pub clipboard: Vec<u8>,
    /// View as it was before the last input event.
    pub previous: ViewSnapshot,
    /// Bytes freshly inserted by the last command.
    pub highlight: Option<Range<u64>>,
    pub(crate) read_only: bool,
    pub(crate) hint_shown: bool,
    pub(crate) last_hex_string: String,
    pub(crate) last_ascii_string: String,
    pub(crate) pending: PendingKey,
}

impl Session {
    pub fn new(store: ByteStore, view: ViewState, read_only: bool) -> Self {
        Self {
            store,
            edits: EditLog::new(),
            view,
            selection: Selection::new(),
            clipboard: Vec::new(),
            previous: ViewSnapshot::default(),
            highlight: None,
            read_only,
            hint_shown: false,
            last_hex_string: String::new(),
            last_ascii_string: String::new(),
            pending: PendingKey::None,
        }
    }

    pub fn open(path: impl AsRef<Path>, read_only: bool, view: ViewState) -> Result<Self> {
        let store = ByteStore::open(path, read_only)?;
        Ok(Self::new(store, view, read_only))
    }

    /// Swaps in another file, dropping every piece of per-file state.
    pub(crate) fn replace_store(&mut self, store: ByteStore) {
        self.store = store;
        self.edits.discard();
        self.selection.clear();
        self.highlight = None;
        self.view.base = 0;
        self.view.cursor = 0;
        self.view.nibble = 0;
    }

    pub fn is_modified(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.store.is_read_only()
    }

    /// Size as seen through the pending edits; the append position.
    pub fn effective_size(&self) -> u64 {
        self.store
            .effective_size()
            .max(self.edits.last_edited_loc())
    }

    /// Effective bytes of `[start, start + len)`, cut at the effective size.
    pub fn read_range(&mut self, start: u64, len: usize) -> Result<Vec<u8>> {
        let len = self.effective_size().saturating_sub(start).min(len as u64) as usize;
        let mut bytes = vec![0u8; len];
        self.store.read_at(start, &mut bytes)?;
        self.edits.overlay(start, &mut bytes);
        Ok(bytes)
    }

    pub fn byte_at(&mut self, offset: u64) -> Result<Option<u8>> {
        if let Some(value) = self.edits.get(offset) {
            return Ok(Some(value));
        }
        Ok(self.read_range(offset, 1)?.first().copied())
    }

    pub fn window(&mut self) -> Result<Window> {
        let size = self.effective_size();
        let base = self.view.base;
        let bytes = self.read_range(base, self.view.visible(size))?;
        let attrs = (0..bytes.len() as u64)
            .map(|i| {
                let offset = base + i;
                CellAttr {
                    modified: self.edits.is_edited(offset),
                    marked: self.selection.contains(offset),
                    inserted: self
                        .highlight
                        .as_ref()
                        .is_some_and(|r| r.contains(&offset)),
                }
            })
            .collect();
        Ok(Window {
            base,
            line_length: self.view.line_length(),
            page: self.view.page(),
            bytes,
            attrs,
            cursor: self.view.cursor,
            nibble: self.view.nibble,
            display: self.view.display,
        })
    }

    /// Restores the view invariants after any command: cursor and base in
    /// range of the (possibly changed) size, and the mark covering the
    /// cursor.
    pub(crate) fn after_command(&mut self) {
        let size = self.effective_size();
        self.view.normalize(size);
        if self.selection.is_set() {
            self.selection.extend(self.view.absolute());
        }
    }

    /// Call after an edit that may have shortened the file. A mark reaching
    /// past the new end no longer names real bytes and is dropped.
    pub(crate) fn forget_mark_past_end(&mut self, old_size: u64) {
        let size = self.effective_size();
        if size < old_size {
            self.selection.invalidate_from(size);
        }
    }

    pub fn resize(&mut self, line_length: usize, rows: usize) {
        let size = self.effective_size();
        self.view.resize(line_length, rows, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Addressing;
    use std::io::Write;

    fn session_with(data: &[u8]) -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        let view = ViewState::new(16, 4, 4, 512, Addressing::Byte);
        let session = Session::open(file.path(), false, view).unwrap();
        (file, session)
    }

    #[test]
    fn test_window_overlays_edits() {
        let (_tmp, mut session) = session_with(b"ABCDEFGH");
        session.edits.set_byte(2, b'z');
        let window = session.window().unwrap();
        assert_eq!(window.bytes, b"ABzDEFGH");
        assert!(window.attrs[2].modified);
        assert!(!window.attrs[3].modified);
    }

    #[test]
    fn test_effective_size_follows_appended_edits() {
        let (_tmp, mut session) = session_with(b"AB");
        session.edits.write_bytes(2, b"CD");
        assert_eq!(session.effective_size(), 4);
        assert_eq!(session.byte_at(3).unwrap(), Some(b'D'));
        assert_eq!(session.byte_at(4).unwrap(), None);
    }

    #[test]
    fn test_window_marks_selection() {
        let (_tmp, mut session) = session_with(b"ABCDEFGH");
        session.selection.toggle(1);
        session.selection.extend(3);
        let window = session.window().unwrap();
        let marked: Vec<bool> = window.attrs.iter().map(|a| a.marked).collect();
        assert_eq!(
            marked,
            vec![false, true, true, true, false, false, false, false]
        );
    }
}
