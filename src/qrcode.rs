//! QR code encoding functionality.
//!
//! This module ties the encoder together: byte-mode data codewords, per-block
//! Reed-Solomon error correction, interleaving, module placement and mask
//! selection. The result is an immutable [`QrCode`].

use crate::error::Result;
use crate::mask::{select_mask, Mask};
use crate::matrix::ModuleGrid;
use crate::reed_solomon::ReedSolomonGenerator;
use crate::segment::encode_data_codewords;
use crate::version::Version;
use log::debug;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Always byte mode at error correction level L, versions 1 to 15. Instances
/// are immutable after creation.
///
/// # Example
///
/// ```rust
/// use qrtext::QrCode;
///
/// let qr = QrCode::encode_text("Hello, World!").unwrap();
/// assert_eq!(qr.version().value(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,
    size: usize,
    mask: Mask,
    /// Dark flags, row-major.
    modules: Vec<bool>,
    /// Function-pattern flags, row-major.
    function: Vec<bool>,
}

impl QrCode {
    /// Encodes a text string as UTF-8 bytes.
    ///
    /// The smallest version whose capacity holds the encoded length is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::Capacity`](crate::QrError::Capacity) if the text is
    /// longer than 520 bytes.
    pub fn encode_text(text: &str) -> Result<Self> {
        Self::encode_bytes(text.as_bytes())
    }

    /// Encodes binary data, choosing the mask automatically.
    pub fn encode_bytes(data: &[u8]) -> Result<Self> {
        Self::encode_bytes_with_mask(data, None)
    }

    /// Encodes binary data. The `mask` can be `None` for automatic selection
    /// or a fixed pattern from 0 to 7.
    pub fn encode_bytes_with_mask(data: &[u8], mask: Option<Mask>) -> Result<Self> {
        let version = Version::for_len(data.len())?;
        debug!("Selected version {} for {} bytes", version, data.len());
        let datacodewords = encode_data_codewords(data, version)?;
        Ok(Self::encode_codewords(&datacodewords, version, mask))
    }

    /// Creates a QR Code from finished data codewords.
    ///
    /// This is a low-level API; most users want [`encode_text`](Self::encode_text).
    ///
    /// # Panics
    ///
    /// Panics if `datacodewords` is not exactly the version's data codeword count.
    pub fn encode_codewords(datacodewords: &[u8], version: Version, mask: Option<Mask>) -> Self {
        let allcodewords = add_ecc_and_interleave(datacodewords, version);

        let mut grid = ModuleGrid::new(version);
        grid.draw_function_patterns();
        grid.place_codewords(&allcodewords);

        let mask = mask.unwrap_or_else(|| select_mask(&grid));
        grid.apply_mask(mask);
        grid.draw_format_bits(mask);

        let size = grid.size();
        let (modules, function) = grid.into_parts();
        Self {
            version,
            size,
            mask,
            modules,
            function,
        }
    }

    /// Returns this QR Code's version, in the range [1, 15].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 77].
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the mask applied to this QR Code.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns `true` for a dark module and `false` for a light one.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the symbol.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules[self.index(row, col)]
    }

    /// Whether the module belongs to a function pattern or the format/version
    /// areas rather than to the data region.
    pub fn is_function(&self, row: usize, col: usize) -> bool {
        self.function[self.index(row, col)]
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Coordinates outside the QR code's bounds are light, which makes this
    /// convenient for drawing a quiet zone.
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size as i32;
        range.contains(&x) && range.contains(&y) && self.is_dark(y as usize, x as usize)
    }

    /// Iterates over the rows of the symbol, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.modules.chunks(self.size)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size && col < self.size, "module out of bounds");
        row * self.size + col
    }
}

/// Splits data codewords into blocks, appends Reed-Solomon codewords to each
/// block, and interleaves them into the final codeword sequence.
///
/// The first blocks are one data codeword shorter when the codewords do not
/// divide evenly. Data codewords are interleaved round-robin across blocks,
/// followed by EC codewords interleaved the same way.
fn add_ecc_and_interleave(data: &[u8], ver: Version) -> Vec<u8> {
    assert_eq!(data.len(), ver.num_data_codewords(), "Illegal argument");
    let numblocks: usize = ver.num_blocks();
    let blockecclen: usize = ver.ecc_codewords_per_block();
    let rawcodewords: usize = ver.total_codewords();
    let numshortblocks: usize = numblocks - (rawcodewords % numblocks);
    let shortblockdatalen: usize = rawcodewords / numblocks - blockecclen;
    debug!(
        "Version {}: {} blocks ({} short of {} data codewords), {} EC codewords each",
        ver, numblocks, numshortblocks, shortblockdatalen, blockecclen
    );

    let rs = ReedSolomonGenerator::new(blockecclen);
    let mut blocks: Vec<&[u8]> = Vec::with_capacity(numblocks);
    let mut eccs: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
    let mut rest: &[u8] = data;
    for i in 0..numblocks {
        let datlen: usize = shortblockdatalen + usize::from(i >= numshortblocks);
        let (dat, tail) = rest.split_at(datlen);
        eccs.push(rs.compute_remainder(dat));
        blocks.push(dat);
        rest = tail;
    }
    debug_assert!(rest.is_empty());

    let mut result = Vec::with_capacity(rawcodewords);
    for j in 0..=shortblockdatalen {
        for dat in &blocks {
            if let Some(&b) = dat.get(j) {
                result.push(b);
            }
        }
    }
    for j in 0..blockecclen {
        for ecc in &eccs {
            result.push(ecc[j]);
        }
    }
    debug_assert_eq!(result.len(), rawcodewords);
    result
}
