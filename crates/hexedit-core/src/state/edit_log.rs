use super::store::ByteStore;
use crate::error::{EditorError, Result};
use std::collections::BTreeMap;
use std::ops::Range;

/// Pending, length-preserving overwrites that have not been flushed yet.
///
/// Pages are keyed by their absolute base offset. After every mutation the
/// pages are disjoint and never touch each other: a write that lands right
/// after a page, or that bridges two pages, grows them into one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditLog {
    pages: BTreeMap<u64, Vec<u8>>,
}

impl EditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pending bytes across all pages.
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn pages(&self) -> impl Iterator<Item = (u64, &[u8])> {
        self.pages.iter().map(|(base, vals)| (*base, vals.as_slice()))
    }

    /// One past the furthest byte touched by a pending edit, 0 when empty.
    pub fn last_edited_loc(&self) -> u64 {
        self.pages
            .last_key_value()
            .map(|(base, vals)| base + vals.len() as u64)
            .unwrap_or(0)
    }

    fn page_before_or_at(&self, offset: u64) -> Option<(u64, u64)> {
        self.pages
            .range(..=offset)
            .next_back()
            .map(|(base, vals)| (*base, vals.len() as u64))
    }

    pub fn get(&self, offset: u64) -> Option<u8> {
        let (base, _) = self.page_before_or_at(offset)?;
        self.pages
            .get(&base)
            .and_then(|vals| vals.get((offset - base) as usize))
            .copied()
    }

    pub fn is_edited(&self, offset: u64) -> bool {
        self.get(offset).is_some()
    }

    pub fn set_byte(&mut self, offset: u64, value: u8) {
        let start = match self.page_before_or_at(offset) {
            Some((base, len)) if offset <= base + len => {
                let Some(vals) = self.pages.get_mut(&base) else {
                    return;
                };
                let idx = (offset - base) as usize;
                if idx < vals.len() {
                    vals[idx] = value;
                    return;
                }
                vals.push(value);
                base
            }
            _ => {
                self.pages.insert(offset, vec![value]);
                offset
            }
        };

        // The page now ends at offset + 1; swallow a neighbour starting there.
        if let Some(next) = self.pages.remove(&(offset + 1))
            && let Some(vals) = self.pages.get_mut(&start)
        {
            vals.extend(next);
        }
    }

    pub fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.set_byte(offset + i as u64, *b);
        }
    }

    /// Drops every pending byte in `[offset, offset + len)`, splitting pages
    /// that straddle either end.
    pub fn remove_edits(&mut self, offset: u64, len: u64) {
        if len == 0 {
            return;
        }
        let end = offset.saturating_add(len);

        let mut hit: Vec<u64> = self.pages.range(offset..end).map(|(b, _)| *b).collect();
        if let Some((base, plen)) = offset
            .checked_sub(1)
            .and_then(|o| self.page_before_or_at(o))
            && base + plen > offset
        {
            hit.push(base);
        }

        for base in hit {
            let Some(vals) = self.pages.remove(&base) else {
                continue;
            };
            let page_end = base + vals.len() as u64;
            if base < offset {
                self.pages
                    .insert(base, vals[..(offset - base) as usize].to_vec());
            }
            if page_end > end {
                self.pages.insert(end, vals[(end - base) as usize..].to_vec());
            }
        }
    }

    /// Copies pending bytes over `buf`, which holds the file bytes starting
    /// at `base`.
    pub fn overlay(&self, base: u64, buf: &mut [u8]) {
        let window = base..base + buf.len() as u64;
        for (page_base, vals) in self.intersecting(window.clone()) {
            for (i, b) in vals.iter().enumerate() {
                let at = page_base + i as u64;
                if window.contains(&at) {
                    buf[(at - base) as usize] = *b;
                }
            }
        }
    }

    fn intersecting(&self, range: Range<u64>) -> impl Iterator<Item = (u64, &Vec<u8>)> {
        let first = self
            .page_before_or_at(range.start)
            .map(|(base, _)| base)
            .unwrap_or(range.start);
        self.pages
            .range(first..range.end)
            .map(|(base, vals)| (*base, vals))
            .filter(move |(base, vals)| base + vals.len() as u64 > range.start)
    }

    pub fn discard(&mut self) {
        self.pages.clear();
    }

    /// Writes every page to the store.
    ///
    /// A failing page does not stop the others from being attempted. The log
    /// is always emptied, and the store's size grows to cover edits that
    /// extended the file. The first failure is returned.
    pub fn flush(&mut self, store: &mut ByteStore) -> Result<()> {
        let last = self.last_edited_loc();
        let pages = std::mem::take(&mut self.pages);
        let mut first_error: Option<EditorError> = None;
        let mut written = 0usize;

        for (base, vals) in &pages {
            match store.write_at(*base, vals) {
                Ok(()) => written += vals.len(),
                Err(e) => {
                    log::error!("Writing {} bytes at {:#x} failed: {}", vals.len(), base, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        store.grow_to(last);
        log::info!("Flushed {} pages ({} bytes written)", pages.len(), written);

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
