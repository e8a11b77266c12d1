/*!
# Row Indices

Vertices and edges are nothing but row indices into their backing tables.
We choose `Row = u32` as almost all use-cases involve less than `2^32` rows.
This allows us to (1) save space by not using `usize` or `u64` and (2) keep
vertex and edge handles trivially copyable.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// A row index into a [`RowTable`](crate::table::RowTable).
pub type Row = u32;

/// Row-value that is never allocated and thus usable as a niche.
pub const INVALID_ROW: Row = Row::MAX;

/// A vertex is a row of the vertex table.
pub type VertexId = Row;

/// An edge is a row of the edge table.
pub type EdgeId = Row;

/// There can be at most `2^32 - 1` rows in a table!
pub type NumRows = Row;

/// BitSet over rows of one table
pub type RowBitSet = BitSetImpl<Row>;

/// As `Option<Row>` uses additional bytes for padding, it can be inefficient
/// since adjacency columns are `Vec`s of optional rows. This instead uses the
/// `NonZero`-Wrapper to reserve a constant niche value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalRowImpl<const N: Row>(NonZero<Row>);

/// `INVALID_ROW` is safe to pick as the `None`-Value
pub type OptionalRow = OptionalRowImpl<INVALID_ROW>;

impl<const N: Row> OptionalRowImpl<N> {
    /// Returns `Some(OptionalRowImpl)` if `r != N` and `None` otherwise
    pub const fn new(r: Row) -> Option<Self> {
        match NonZero::new(r ^ N) {
            Some(inner) => Some(OptionalRowImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying row value
    pub const fn get(&self) -> Row {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn optional_row_niche() {
        assert_eq!(
            std::mem::size_of::<Option<OptionalRow>>(),
            std::mem::size_of::<Row>()
        );

        assert!(OptionalRow::new(INVALID_ROW).is_none());
        for r in [0, 1, 17, INVALID_ROW - 1] {
            assert_eq!(OptionalRow::new(r).unwrap().get(), r);
        }
    }
}
