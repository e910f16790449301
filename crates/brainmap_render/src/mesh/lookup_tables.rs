//! Lookup tables for Surface Nets over a unit cube
//!
//! A cube has 8 corners and 12 edges. Corner `i` sits at
//! `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`, so two corners share an edge
//! exactly when their indices differ in a single bit. Depending on which
//! corners are inside the surface there are 2^8 = 256 configurations.

/// Edge definitions for the cube
///
/// Each edge connects two corners (indexed 0-7). Enumerated corner by
/// corner, pairing corner `i` with `i ^ 1`, `i ^ 2`, `i ^ 4` when the
/// partner is larger. Edges 0, 1 and 2 leave corner 0 along x, y and z.
pub const CUBE_EDGES: [[usize; 2]; 12] = compute_cube_edges();

/// For each case (0-255), which edges are crossed by the surface.
/// Bit i is set if edge i is crossed (i.e., its endpoints are on opposite sides).
///
/// An edge is crossed when: (corner_a inside XOR corner_b inside)
pub const EDGE_TABLE: [u16; 256] = compute_edge_table();

/// Compute the edge list at compile time
const fn compute_cube_edges() -> [[usize; 2]; 12] {
    let mut edges = [[0usize; 2]; 12];
    let mut k = 0;
    let mut i = 0;

    while i < 8 {
        let mut j = 1;
        while j <= 4 {
            let p = i ^ j;
            if i <= p {
                edges[k] = [i, p];
                k += 1;
            }
            j <<= 1;
        }
        i += 1;
    }

    edges
}

/// Compute the edge table at compile time
const fn compute_edge_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut case_idx: usize = 0;

    while case_idx < 256 {
        let mut edge_mask = 0u16;
        let mut edge_idx = 0;

        while edge_idx < 12 {
            let c0 = CUBE_EDGES[edge_idx][0];
            let c1 = CUBE_EDGES[edge_idx][1];

            let c0_inside = (case_idx >> c0) & 1;
            let c1_inside = (case_idx >> c1) & 1;

            if c0_inside != c1_inside {
                edge_mask |= 1 << edge_idx;
            }

            edge_idx += 1;
        }

        table[case_idx] = edge_mask;
        case_idx += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossed(case_idx: usize) -> Vec<usize> {
        (0..12).filter(|i| (EDGE_TABLE[case_idx] >> i) & 1 == 1).collect()
    }

    #[test]
    fn test_cube_edges_order() {
        assert_eq!(
            CUBE_EDGES,
            [
                [0, 1], [0, 2], [0, 4],
                [1, 3], [1, 5],
                [2, 3], [2, 6],
                [3, 7],
                [4, 5], [4, 6],
                [5, 7],
                [6, 7],
            ]
        );
    }

    #[test]
    fn test_edges_differ_in_one_bit() {
        for [a, b] in CUBE_EDGES {
            assert_eq!((a ^ b).count_ones(), 1, "Edge ({}, {}) is not a cube edge", a, b);
            assert!(a < b);
        }
    }

    #[test]
    fn test_first_edges_follow_axes() {
        // Edge i leaves corner 0 along axis i
        for axis in 0..3 {
            assert_eq!(CUBE_EDGES[axis], [0, 1 << axis]);
        }
    }

    #[test]
    fn test_edge_table_uniform_cases() {
        // All corners outside or all inside - no edges crossed
        assert_eq!(EDGE_TABLE[0], 0);
        assert_eq!(EDGE_TABLE[255], 0);
    }

    #[test]
    fn test_edge_table_single_corner() {
        // Corner 0 inside - the three edges leaving it are crossed
        assert_eq!(EDGE_TABLE[1], 0b000000000111);
        assert_eq!(crossed(1), vec![0, 1, 2]);
        // Corner 7 inside - edges 7, 10, 11
        assert_eq!(crossed(0x80), vec![7, 10, 11]);
    }

    #[test]
    fn test_edge_table_planar_cut() {
        // Lower z face inside, upper outside - the four vertical edges
        assert_eq!(crossed(0x0f), vec![2, 4, 6, 7]);
        assert_eq!(EDGE_TABLE[0xf0].count_ones(), 4);
    }

    #[test]
    fn test_complement_symmetry() {
        // Flipping inside/outside crosses the same edges
        for i in 0..256 {
            assert_eq!(EDGE_TABLE[i], EDGE_TABLE[255 - i], "Cases {} and {}", i, 255 - i);
        }
    }

    #[test]
    fn test_edge_count_distribution() {
        let count_3 = (0..256).filter(|&i| EDGE_TABLE[i].count_ones() == 3).count();
        let count_12 = (0..256).filter(|&i| EDGE_TABLE[i].count_ones() == 12).count();

        // One corner apart from the rest: 8 cases each way
        assert_eq!(count_3, 16);
        // Checkerboard corners
        assert_eq!(count_12, 2);
    }
}
