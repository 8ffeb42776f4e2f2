//! Goal matrix: which (first-positive successes, second-positive successes)
//! pairs satisfy the combined goal.

use crate::config::PresetConfig;

/// `(n+1) x (n+1)` acceptance table, row = first-positive successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalCells {
    n: usize,
    cells: Vec<bool>,
}

impl GoalCells {
    /// `cell[i][j] = i >= first_goal && j >= second_goal && i + j >= goal_sum`.
    pub fn from_goals(n: usize, first_goal: usize, second_goal: usize, goal_sum: usize) -> Self {
        let side = n + 1;
        let mut cells = vec![false; side * side];
        for i in 0..side {
            for j in 0..side {
                cells[i * side + j] = i >= first_goal && j >= second_goal && i + j >= goal_sum;
            }
        }
        Self { n, cells }
    }

    /// Sum rule plus the preset's carve-outs, then its toggled cells.
    pub fn for_preset(n: usize, preset: &PresetConfig) -> Self {
        let mut goals = Self::from_goals(
            n,
            preset.first_positive_goal,
            preset.second_positive_goal,
            preset.positive_goal_sum,
        );
        for &[i, j] in &preset.excluded_cells {
            goals.exclude(i, j);
        }
        for &[i, j] in &preset.toggled_cells {
            goals.toggle(i, j);
        }
        goals
    }

    /// Force a cell to "not a goal". Cells outside the matrix are ignored.
    pub fn exclude(&mut self, i: usize, j: usize) {
        if let Some(idx) = self.index(i, j) {
            self.cells[idx] = false;
        }
    }

    /// Flip a single cell. Cells outside the matrix are ignored.
    pub fn toggle(&mut self, i: usize, j: usize) {
        if let Some(idx) = self.index(i, j) {
            self.cells[idx] = !self.cells[idx];
        }
    }

    #[inline(always)]
    pub fn is_goal(&self, i: usize, j: usize) -> bool {
        self.index(i, j).map(|idx| self.cells[idx]).unwrap_or(false)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of accepting cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        let side = self.n + 1;
        (i < side && j < side).then_some(i * side + j)
    }
}
