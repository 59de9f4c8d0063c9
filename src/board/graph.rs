//! Static connectivity table over the 25 board intersections
//!
//! Every intersection connects to its orthogonal neighbors. Intersections
//! whose coordinate parity is even (`(row + col) % 2 == 0`) additionally
//! connect along the diagonals, giving each point 3 to 8 neighbors. The
//! graph is immutable for the process lifetime but constructed explicitly
//! so tests can hold independent instances.

use super::{Pos, BOARD_SIZE, TOTAL_CELLS};

/// Orthogonal steps, present at every intersection
const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal steps, present only at even-parity intersections
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Adjacency graph over the board, one neighbor bitmask per cell.
///
/// 25 cells fit in a `u32`, so a neighbor set is a single mask and
/// adjacency tests are one AND.
#[derive(Debug, Clone)]
pub struct Connectivity {
    neighbors: [u32; TOTAL_CELLS],
}

impl Connectivity {
    /// Build the connectivity table.
    #[must_use]
    pub fn new() -> Self {
        let mut neighbors = [0u32; TOTAL_CELLS];

        for row in 0..BOARD_SIZE as i32 {
            for col in 0..BOARD_SIZE as i32 {
                let idx = Pos::new(row as u8, col as u8).to_index();
                let mut mask = 0u32;

                for &(dr, dc) in &ORTHOGONAL {
                    if Pos::is_valid(row + dr, col + dc) {
                        mask |= 1 << Pos::new((row + dr) as u8, (col + dc) as u8).to_index();
                    }
                }

                // Diagonal lines exist only at even-parity points; both
                // endpoints of a diagonal edge share that parity.
                if (row + col) % 2 == 0 {
                    for &(dr, dc) in &DIAGONAL {
                        if Pos::is_valid(row + dr, col + dc) {
                            mask |= 1 << Pos::new((row + dr) as u8, (col + dc) as u8).to_index();
                        }
                    }
                }

                neighbors[idx] = mask;
            }
        }

        Self { neighbors }
    }

    /// Check whether two intersections are directly connected.
    #[inline]
    #[must_use]
    pub fn is_adjacent(&self, a: Pos, b: Pos) -> bool {
        self.neighbors[a.to_index()] & (1 << b.to_index()) != 0
    }

    /// Number of neighbors of an intersection (3-8).
    #[inline]
    #[must_use]
    pub fn degree(&self, pos: Pos) -> u32 {
        self.neighbors[pos.to_index()].count_ones()
    }

    /// Iterate over the neighbors of an intersection.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        let mut mask = self.neighbors[pos.to_index()];
        std::iter::from_fn(move || {
            if mask == 0 {
                None
            } else {
                let idx = mask.trailing_zeros() as usize;
                mask &= mask - 1;
                Some(Pos::from_index(idx))
            }
        })
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbors() {
        let conn = Connectivity::new();
        // Corner: two orthogonal plus the inward diagonal
        assert_eq!(conn.degree(Pos::new(0, 0)), 3);
        assert_eq!(conn.degree(Pos::new(4, 4)), 3);
    }

    #[test]
    fn test_center_has_eight_neighbors() {
        let conn = Connectivity::new();
        assert_eq!(conn.degree(Pos::new(2, 2)), 8);
    }

    #[test]
    fn test_odd_parity_point_has_no_diagonals() {
        let conn = Connectivity::new();
        // (0,1) is odd parity: only (0,0), (0,2), (1,1)
        assert_eq!(conn.degree(Pos::new(0, 1)), 3);
        assert!(conn.is_adjacent(Pos::new(0, 1), Pos::new(1, 1)));
        assert!(!conn.is_adjacent(Pos::new(0, 1), Pos::new(1, 0)));
        assert!(!conn.is_adjacent(Pos::new(0, 1), Pos::new(1, 2)));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let conn = Connectivity::new();
        for a in 0..TOTAL_CELLS {
            for b in 0..TOTAL_CELLS {
                let (pa, pb) = (Pos::from_index(a), Pos::from_index(b));
                assert_eq!(conn.is_adjacent(pa, pb), conn.is_adjacent(pb, pa));
            }
        }
    }

    #[test]
    fn test_degree_bounds() {
        let conn = Connectivity::new();
        for idx in 0..TOTAL_CELLS {
            let d = conn.degree(Pos::from_index(idx));
            assert!((3..=8).contains(&d), "degree {d} out of range at {idx}");
        }
    }

    #[test]
    fn test_neighbors_iterator_matches_degree() {
        let conn = Connectivity::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            assert_eq!(conn.neighbors(pos).count() as u32, conn.degree(pos));
        }
    }

    #[test]
    fn test_no_self_loops() {
        let conn = Connectivity::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            assert!(!conn.is_adjacent(pos, pos));
        }
    }
}
