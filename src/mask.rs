//! Data mask patterns and the four penalty rules used to choose between them.

use crate::matrix::ModuleGrid;
use log::{debug, trace};
use rayon::prelude::*;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    /// All eight patterns in index order.
    pub const ALL: [Mask; 8] = [
        Mask(0),
        Mask(1),
        Mask(2),
        Mask(3),
        Mask(4),
        Mask(5),
        Mask(6),
        Mask(7),
    ];

    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this pattern flips the module at (`row`, `col`).
    pub fn inverts(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            7 => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

/// Scores `grid` with `mask` applied and its format bits written.
///
/// `grid` is left untouched; the work happens on a copy.
pub(crate) fn evaluate(grid: &ModuleGrid, mask: Mask) -> u32 {
    let mut candidate = grid.clone();
    candidate.apply_mask(mask);
    candidate.draw_format_bits(mask);
    let penalty = penalty_score(&candidate);
    trace!("mask {} penalty {}", mask.value(), penalty);
    penalty
}

/// Evaluates all eight masks in parallel and returns the one with the lowest
/// penalty. Ties go to the lowest mask index.
pub(crate) fn select_mask(grid: &ModuleGrid) -> Mask {
    let penalties: Vec<u32> = Mask::ALL.par_iter().map(|&mask| evaluate(grid, mask)).collect();
    let mut best = Mask::ALL[0];
    let mut minpenalty = u32::MAX;
    for (mask, penalty) in Mask::ALL.into_iter().zip(penalties) {
        if penalty < minpenalty {
            best = mask;
            minpenalty = penalty;
        }
    }
    debug!("Selected mask {} with penalty {}", best.value(), minpenalty);
    best
}

/// Sum of the four structural penalties (N1 runs, N2 blocks, N3 finder-like
/// patterns, N4 dark balance) for the grid as it currently stands.
pub(crate) fn penalty_score(grid: &ModuleGrid) -> u32 {
    let size = grid.size();
    let mut result: u32 = 0;

    for row in 0..size {
        result += line_penalty(size, |i| grid.is_dark(row, i));
    }
    for col in 0..size {
        result += line_penalty(size, |i| grid.is_dark(i, col));
    }

    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let color = grid.is_dark(row, col);
            if color == grid.is_dark(row, col + 1)
                && color == grid.is_dark(row + 1, col)
                && color == grid.is_dark(row + 1, col + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    result + balance_penalty(grid.dark_count(), size * size)
}

/// N4: 10 points per whole 5% step the dark ratio strays from 50%.
fn balance_penalty(dark: usize, total: usize) -> u32 {
    // Smallest k such that the dark ratio lies within (50 ± 5(k+1))%
    let k = (dark * 20).abs_diff(total * 10).div_ceil(total).saturating_sub(1);
    u32::try_from(k).unwrap_or(0) * PENALTY_N4
}

/// N1 and N3 penalties for a single row or column.
fn line_penalty(size: usize, is_dark: impl Fn(usize) -> bool) -> u32 {
    let mut result: u32 = 0;
    let mut runcolor = false;
    let mut runlen: usize = 0;
    let mut history = RunHistory::new(size);
    for i in 0..size {
        let color = is_dark(i);
        if color == runcolor {
            runlen += 1;
            if runlen == 5 {
                result += PENALTY_N1;
            } else if runlen > 5 {
                result += 1;
            }
        } else {
            history.push(runlen);
            if !runcolor {
                result += history.count_patterns() * PENALTY_N3;
            }
            runcolor = color;
            runlen = 1;
        }
    }
    result + history.terminate_and_count(runcolor, runlen) * PENALTY_N3
}

/// The last seven run lengths of a line, newest first, for spotting
/// 1:1:3:1:1 finder-like patterns. The light border outside the symbol is
/// folded into the first and last runs.
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { size, runs: [0; 7] }
    }

    fn push(&mut self, mut runlen: usize) {
        if self.runs[0] == 0 {
            runlen += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = runlen;
    }

    /// Counts finder-like patterns ending at the newest dark run (0, 1 or 2).
    fn count_patterns(&self) -> u32 {
        let rh = &self.runs;
        let n = rh[1];
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        u32::from(core && rh[0] >= n * 4 && rh[6] >= n)
            + u32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, runcolor: bool, mut runlen: usize) -> u32 {
        if runcolor {
            self.push(runlen);
            runlen = 0;
        }
        runlen += self.size;
        self.push(runlen);
        self.count_patterns()
    }
}
