//! The working module grid used while a symbol is being built.
//!
//! Function patterns (finders, separators, timing, alignment, format and
//! version areas) are drawn first and marked reserved. Codeword bits then
//! fill every remaining cell in zig-zag order, a mask is XORed over those
//! cells, and the format bits are written last.

use crate::mask::Mask;
use crate::version::{Version, ECC_LOW_FORMAT_BITS};

/// BCH generator for the 15-bit format information.
const FORMAT_GENERATOR: u32 = 0x537;

/// XOR mask applied to format information so it is never all zero.
const FORMAT_MASK: u32 = 0x5412;

/// BCH generator for the 18-bit version information.
const VERSION_GENERATOR: u32 = 0x1F25;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Cell {
    Unset,
    Dark,
    Light,
}

impl Cell {
    fn from_dark(isdark: bool) -> Self {
        if isdark {
            Cell::Dark
        } else {
            Cell::Light
        }
    }
}

/// A square grid of modules under construction, with a reserved flag per cell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleGrid {
    version: Version,
    size: usize,
    cells: Vec<Cell>,
    reserved: Vec<bool>,
}

impl ModuleGrid {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            cells: vec![Cell::Unset; size * size],
            reserved: vec![false; size * size],
        }
    }

    #[cfg(test)]
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Unset cells read as light.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)] == Cell::Dark
    }

    #[cfg(test)]
    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[self.index(row, col)]
    }

    /// Overwrites one module without touching its reserved flag.
    #[cfg(test)]
    pub(crate) fn set_module(&mut self, row: usize, col: usize, isdark: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = Cell::from_dark(isdark);
    }

    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Dark).count()
    }

    /// Draws every function pattern and reserves the format and version areas.
    pub fn draw_function_patterns(&mut self) {
        self.draw_timing_patterns();
        let far = self.size - 4;
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(3, far);
        self.draw_finder_pattern(far, 3);
        self.draw_alignment_patterns();
        self.reserve_format_areas();
        self.draw_version_info();
    }

    fn draw_timing_patterns(&mut self) {
        for i in 0..self.size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    /// Finder pattern centred on (`row`, `col`), including its light separator.
    fn draw_finder_pattern(&mut self, row: usize, col: usize) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let r = row as i32 + dy;
                let c = col as i32 + dx;
                if !(0..self.size as i32).contains(&r) || !(0..self.size as i32).contains(&c) {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(r as usize, c as usize, dist != 2 && dist != 4);
            }
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = self.version.alignment_pattern_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &row) in positions.iter().enumerate() {
            for (j, &col) in positions.iter().enumerate() {
                // These three overlap the finder patterns
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let r = (i32::from(row) + dy) as usize;
                        let c = (i32::from(col) + dx) as usize;
                        self.set_function(r, c, dx.abs().max(dy.abs()) != 1);
                    }
                }
            }
        }
    }

    /// Reserves both format information copies (light for now) and sets the
    /// always-dark module beside the bottom-left finder.
    fn reserve_format_areas(&mut self) {
        for i in 0..15 {
            for (row, col) in format_bit_positions(self.size, i) {
                self.set_function(row, col, false);
            }
        }
        self.set_function(self.size - 8, 8, true);
    }

    /// Writes the two 6×3 version information blocks. No-op below version 7.
    fn draw_version_info(&mut self) {
        if !self.version.has_version_info() {
            return;
        }
        let bits = version_info_bits(self.version);
        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function(b, a, bit);
            self.set_function(a, b, bit);
        }
    }

    /// Places `codewords` bit by bit, MSB first, in the zig-zag column-pair
    /// order starting at the bottom-right corner. Cells left over after the
    /// last bit (remainder bits) are written light.
    ///
    /// # Panics
    ///
    /// Panics if `codewords` does not match the version's total codeword count.
    pub fn place_codewords(&mut self, codewords: &[u8]) {
        assert_eq!(
            codewords.len(),
            self.version.total_codewords(),
            "Codeword count does not match version"
        );
        let size = self.size;
        let totalbits = codewords.len() * 8;
        let mut i: usize = 0;
        let mut right = size - 1;
        loop {
            // Skip the vertical timing column
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..size {
                let row = if upward { size - 1 - vert } else { vert };
                for col in [right, right - 1] {
                    let idx = self.index(row, col);
                    if self.reserved[idx] {
                        continue;
                    }
                    debug_assert_eq!(self.cells[idx], Cell::Unset, "module written twice");
                    let isdark = i < totalbits && get_bit(u32::from(codewords[i >> 3]), 7 - (i & 7));
                    self.cells[idx] = Cell::from_dark(isdark);
                    i += 1;
                }
            }
            if right < 2 {
                break;
            }
            right -= 2;
        }
        debug_assert_eq!(i, self.version.num_raw_data_modules());
    }

    /// XORs `mask` over every non-reserved module.
    pub fn apply_mask(&mut self, mask: Mask) {
        for row in 0..self.size {
            for col in 0..self.size {
                let idx = self.index(row, col);
                if self.reserved[idx] || !mask.inverts(row, col) {
                    continue;
                }
                self.cells[idx] = match self.cells[idx] {
                    Cell::Dark => Cell::Light,
                    Cell::Light | Cell::Unset => Cell::Dark,
                };
            }
        }
    }

    /// Writes both copies of the format information for level L and `mask`.
    pub fn draw_format_bits(&mut self, mask: Mask) {
        let bits = format_info_bits(mask);
        for i in 0..15 {
            let bit = get_bit(bits, i);
            for (row, col) in format_bit_positions(self.size, i) {
                self.set_function(row, col, bit);
            }
        }
        self.set_function(self.size - 8, 8, true);
    }

    /// Consumes the grid, returning the dark flags and reserved flags row by row.
    pub fn into_parts(self) -> (Vec<bool>, Vec<bool>) {
        let modules = self.cells.into_iter().map(|c| c == Cell::Dark).collect();
        (modules, self.reserved)
    }

    fn set_function(&mut self, row: usize, col: usize, isdark: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = Cell::from_dark(isdark);
        self.reserved[idx] = true;
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size && col < self.size, "module out of bounds");
        row * self.size + col
    }
}

/// The 15-bit format word: EC level and mask, BCH(15,5) protected and XOR-masked.
pub fn format_info_bits(mask: Mask) -> u32 {
    let data = u32::from((ECC_LOW_FORMAT_BITS << 3) | mask.value());
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

/// The 18-bit version word: 6-bit version, BCH(18,6) protected.
pub fn version_info_bits(version: Version) -> u32 {
    let ver = u32::from(version.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (ver << 12) | rem
}

/// (row, col) of format bit `i` in the top-left copy and in the split
/// top-right/bottom-left copy.
pub fn format_bit_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let first = match i {
        0..=5 => (i, 8),
        6 => (7, 8),
        7 => (8, 8),
        8 => (8, 7),
        _ => (8, 14 - i),
    };
    let second = if i < 8 {
        (8, size - 1 - i)
    } else {
        (size - 15 + i, 8)
    };
    [first, second]
}

fn get_bit(x: u32, i: usize) -> bool {
    (x >> i) & 1 != 0
}
