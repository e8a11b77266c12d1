/*!
# Edge Cursors

An [`EdgeCursor`] walks one adjacency chain, or two chains end-to-end, by
chasing a `next` column from an origin edge. Two-chain cursors cover the full
incidence of a vertex: the outgoing chain is exhausted first, then the cursor
switches to the incoming chain. Note that a self-loop sits in both chains of
its vertex and is therefore yielded twice by a two-chain cursor.

A cursor borrows the columns it walks, so the borrow checker rejects any
structural mutation of the graph while a cursor is alive. Code that must
remove edges mid-traversal collects the edge ids first.

Cursors are plain values: [`Clone`] forks the current position for nested
traversals and [`rebind`](EdgeCursor::rebind) resets an existing cursor onto
a new origin, so tight loops over many vertices reuse one cursor.
*/

use crate::{ids::*, table::IntColumn};

/// A cursor over one or two adjacency chains.
#[derive(Clone)]
pub struct EdgeCursor<'a> {
    cur: Option<EdgeId>,
    next: &'a IntColumn,
    /// Origin and next-column of the not-yet-started second chain.
    tail: Option<(Option<EdgeId>, &'a IntColumn)>,
}

impl<'a> EdgeCursor<'a> {
    /// Creates a cursor over a single chain starting at `origin`.
    pub fn new(origin: Option<EdgeId>, next: &'a IntColumn) -> Self {
        Self {
            cur: origin,
            next,
            tail: None,
        }
    }

    /// Creates a cursor walking the chain at `origin` to exhaustion, then the
    /// chain at `origin2`.
    pub fn new_merged(
        origin: Option<EdgeId>,
        next: &'a IntColumn,
        origin2: Option<EdgeId>,
        next2: &'a IntColumn,
    ) -> Self {
        let mut cursor = Self {
            cur: origin,
            next,
            tail: Some((origin2, next2)),
        };
        cursor.roll_over();
        cursor
    }

    /// Resets this cursor onto a new single chain.
    pub fn rebind(&mut self, origin: Option<EdgeId>, next: &'a IntColumn) {
        self.cur = origin;
        self.next = next;
        self.tail = None;
    }

    /// Resets this cursor onto a new pair of chains.
    pub fn rebind_merged(
        &mut self,
        origin: Option<EdgeId>,
        next: &'a IntColumn,
        origin2: Option<EdgeId>,
        next2: &'a IntColumn,
    ) {
        self.cur = origin;
        self.next = next;
        self.tail = Some((origin2, next2));
        self.roll_over();
    }

    /// Returns the next edge without consuming it.
    pub fn peek(&self) -> Option<EdgeId> {
        self.cur
    }

    /// Switches to the second chain once the first is exhausted.
    fn roll_over(&mut self) {
        if self.cur.is_none() {
            if let Some((origin, next)) = self.tail.take() {
                self.cur = origin;
                self.next = next;
            }
        }
    }
}

impl Iterator for EdgeCursor<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let edge = self.cur?;
        self.cur = self.next.get(edge);
        self.roll_over();
        Some(edge)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn chain(name: &'static str, links: &[(Row, Option<Row>)]) -> IntColumn {
        let mut col = IntColumn::new(name);
        for &(e, n) in links {
            col.set(e, n);
        }
        col
    }

    #[test]
    fn single_chain() {
        let next = chain("#next", &[(3, Some(1)), (1, Some(4)), (4, None)]);

        let cursor = EdgeCursor::new(Some(3), &next);
        assert_eq!(cursor.collect_vec(), vec![3, 1, 4]);
        assert_eq!(EdgeCursor::new(None, &next).count(), 0);
    }

    #[test]
    fn merged_chains_and_peek() {
        let next = chain("#next", &[(0, Some(2)), (2, None)]);
        let next_in = chain("#next_in", &[(5, None)]);

        let mut cursor = EdgeCursor::new_merged(Some(0), &next, Some(5), &next_in);
        assert_eq!(cursor.peek(), Some(0));
        let fork = cursor.clone();
        assert_eq!(cursor.collect_vec(), vec![0, 2, 5]);
        assert_eq!(fork.collect_vec(), vec![0, 2, 5]);

        // an empty first chain rolls over immediately
        let cursor = EdgeCursor::new_merged(None, &next, Some(5), &next_in);
        assert_eq!(cursor.collect_vec(), vec![5]);
    }

    #[test]
    fn rebind_reuses_cursor() {
        let next = chain("#next", &[(0, Some(1)), (1, None), (7, None)]);

        let mut cursor = EdgeCursor::new(Some(0), &next);
        assert_eq!(cursor.by_ref().collect_vec(), vec![0, 1]);
        cursor.rebind(Some(7), &next);
        assert_eq!(cursor.collect_vec(), vec![7]);
    }
}
