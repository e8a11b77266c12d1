/*!
# Row Tables

A [`RowTable`] is a growable arena of rows addressed by [`Row`] index. Rows
are allocated from a free-list (freed slots are reused last-in-first-out),
so indices stay small and dense-ish but are *not* guaranteed contiguous:
every consumer must go through [`RowTable::is_valid`] or the table iterator
instead of assuming index density.

An [`IntColumn`] is a named, growable column of optional row values. A cell
holds either a row index or nothing; "nothing" covers both the `NIL` end of
an adjacency chain and the undefined state of a freed row.

Tables emit batched [`RowRange`] change events. Within a suppressed scope
(see [`RowTable::with_notify_suppressed`]) events are queued and coalesced,
so a compound mutation appears to listeners as one range per change kind.
*/

use crate::ids::*;

/// A growable column of optional row values.
///
/// Cells default to `None`; setting a cell beyond the current length extends
/// the column. Thanks to [`OptionalRow`]'s niche, a cell occupies four bytes.
#[derive(Debug, Clone)]
pub struct IntColumn {
    name: &'static str,
    cells: Vec<Option<OptionalRow>>,
}

impl IntColumn {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cells: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value at `row`, or `None` if the cell is unset or out of
    /// bounds.
    #[inline]
    pub fn get(&self, row: Row) -> Option<Row> {
        self.cells
            .get(row as usize)
            .copied()
            .flatten()
            .map(|r| r.get())
    }

    /// Sets the cell at `row`, extending the column with unset cells if
    /// needed. ** Panics if `value == Some(INVALID_ROW)` **
    pub fn set(&mut self, row: Row, value: Option<Row>) {
        if self.cells.len() <= row as usize {
            self.cells.resize(row as usize + 1, None);
        }
        self.cells[row as usize] = value.map(|r| {
            OptionalRow::new(r).expect("INVALID_ROW cannot be stored in a column")
        });
    }

    /// Returns *true* if the cell at `row` holds no value.
    #[inline]
    pub fn is_unset(&self, row: Row) -> bool {
        self.get(row).is_none()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

/// The kind of a row range change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Inserted,
    Removed,
}

/// A batched change notification: rows `first..=last` changed per `change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: Row,
    pub last: Row,
    pub change: RowChange,
}

/// A growable arena of rows with free-list allocation and change notification.
pub struct RowTable {
    name: &'static str,
    valid: Vec<bool>,
    free: Vec<Row>,
    count: NumRows,
    suppress: u32,
    pending: Vec<RowRange>,
    listeners: Vec<Box<dyn FnMut(RowRange)>>,
}

impl std::fmt::Debug for RowTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowTable")
            .field("name", &self.name)
            .field("count", &self.count)
            .field("high", &self.high())
            .finish()
    }
}

impl RowTable {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            valid: Vec::new(),
            free: Vec::new(),
            count: 0,
            suppress: 0,
            pending: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of valid rows.
    #[inline]
    pub fn count(&self) -> NumRows {
        self.count
    }

    /// High-water mark: all valid rows are `< high()`. Freed rows below the
    /// mark stay accounted for until reused.
    #[inline]
    pub fn high(&self) -> Row {
        self.valid.len() as Row
    }

    #[inline]
    pub fn is_valid(&self, row: Row) -> bool {
        self.valid.get(row as usize).copied().unwrap_or(false)
    }

    /// Allocates a row, reusing the most recently freed slot if any.
    pub fn alloc(&mut self) -> Row {
        let row = match self.free.pop() {
            Some(row) => {
                self.valid[row as usize] = true;
                row
            }
            None => {
                assert!(self.valid.len() < INVALID_ROW as usize);
                self.valid.push(true);
                self.valid.len() as Row - 1
            }
        };
        self.count += 1;
        self.emit(RowRange {
            first: row,
            last: row,
            change: RowChange::Inserted,
        });
        row
    }

    /// Frees a row. Returns *true* if the row was valid before.
    pub fn free(&mut self, row: Row) -> bool {
        if !self.is_valid(row) {
            return false;
        }
        self.valid[row as usize] = false;
        self.free.push(row);
        self.count -= 1;
        self.emit(RowRange {
            first: row,
            last: row,
            change: RowChange::Removed,
        });
        true
    }

    /// Drops all rows and pending notifications.
    pub fn clear(&mut self) {
        self.valid.clear();
        self.free.clear();
        self.count = 0;
        self.pending.clear();
    }

    /// Returns a restartable iterator over all valid rows in index order.
    pub fn iter(&self) -> RowIter<'_> {
        RowIter::new(&self.valid)
    }

    /// Registers a listener for row range changes.
    pub fn on_change(&mut self, listener: impl FnMut(RowRange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Runs `f` with notifications suppressed; queued events are coalesced
    /// and flushed when the outermost scope ends, on every exit path of `f`.
    pub fn with_notify_suppressed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.suppress += 1;
        let out = f(self);
        self.suppress -= 1;
        if self.suppress == 0 {
            self.flush();
        }
        out
    }

    fn emit(&mut self, range: RowRange) {
        if self.suppress > 0 {
            // coalesce with the previous pending range when adjacent
            if let Some(prev) = self.pending.last_mut() {
                if prev.change == range.change && prev.last + 1 == range.first {
                    prev.last = range.last;
                    return;
                }
            }
            self.pending.push(range);
        } else {
            for l in &mut self.listeners {
                l(range);
            }
        }
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for range in pending {
            for l in &mut self.listeners {
                l(range);
            }
        }
    }
}

/// A restartable cursor over the valid rows of a table.
///
/// Unlike a plain iterator it supports [`peek`](RowIter::peek) without
/// consuming and [`restart`](RowIter::restart) to rewind to the first row.
#[derive(Clone)]
pub struct RowIter<'a> {
    valid: &'a [bool],
    next: Row,
}

impl<'a> RowIter<'a> {
    fn new(valid: &'a [bool]) -> Self {
        let mut iter = Self { valid, next: 0 };
        iter.skip_invalid();
        iter
    }

    fn skip_invalid(&mut self) {
        while (self.next as usize) < self.valid.len() && !self.valid[self.next as usize] {
            self.next += 1;
        }
    }

    /// Returns the next row without consuming it.
    pub fn peek(&self) -> Option<Row> {
        ((self.next as usize) < self.valid.len()).then_some(self.next)
    }

    /// Rewinds to the first valid row.
    pub fn restart(&mut self) {
        self.next = 0;
        self.skip_invalid();
    }
}

impl Iterator for RowIter<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let row = self.peek()?;
        self.next += 1;
        self.skip_invalid();
        Some(row)
    }
}
