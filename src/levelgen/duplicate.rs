//! Duplicate level guard
//!
//! A freshly generated grid is rejected when any accepted level matches it
//! cell for cell. Campaigns are tens of levels, so a linear scan is enough.

use super::grid::Grid;

/// Index of the first accepted level identical to `candidate`
pub fn find_duplicate(candidate: &Grid, accepted: &[Grid]) -> Option<usize> {
    accepted.iter().position(|level| same_layout(level, candidate))
}

/// Cell-by-cell comparison, stopping at the first mismatch
fn same_layout(a: &Grid, b: &Grid) -> bool {
    a.same_shape(b) && a.cells().iter().zip(b.cells()).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<i32>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_no_accepted_levels() {
        assert_eq!(find_duplicate(&grid(vec![vec![1]]), &[]), None);
    }

    #[test]
    fn test_identical_level_found() {
        let accepted = vec![
            grid(vec![vec![1, 0], vec![0, 1]]),
            grid(vec![vec![2, 2], vec![0, 0]]),
        ];
        let candidate = grid(vec![vec![2, 2], vec![0, 0]]);
        assert_eq!(find_duplicate(&candidate, &accepted), Some(1));
    }

    #[test]
    fn test_single_cell_difference_is_distinct() {
        let accepted = vec![grid(vec![vec![1, 1], vec![1, 1]])];
        let candidate = grid(vec![vec![1, 1], vec![1, 2]]);
        assert_eq!(find_duplicate(&candidate, &accepted), None);
    }

    #[test]
    fn test_hit_points_matter() {
        // Same layout, different hit points
        let accepted = vec![grid(vec![vec![1, 0, 1]])];
        assert_eq!(find_duplicate(&grid(vec![vec![3, 0, 3]]), &accepted), None);
    }

    #[test]
    fn test_different_dimensions_never_match() {
        let accepted = vec![grid(vec![vec![0, 0, 0, 0]])];
        assert_eq!(find_duplicate(&grid(vec![vec![0, 0], vec![0, 0]]), &accepted), None);
    }
}
