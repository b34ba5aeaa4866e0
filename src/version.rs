use crate::error::{QrError, Result};

/// Level-L byte-mode capacity for versions 1 to 15.
pub const BYTE_CAPACITY: [usize; 15] = [
    17, 32, 53, 78, 106, 134, 154, 192, 230, 271, 321, 367, 425, 458, 520,
];

/// Level-L error correction codewords per block, versions 1 to 15.
static ECC_CODEWORDS_PER_BLOCK: [u8; 15] = [7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22];

/// Level-L error correction block count, versions 1 to 15.
static NUM_ERROR_CORRECTION_BLOCKS: [u8; 15] = [1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6];

/// Alignment pattern centre coordinates, versions 1 to 15.
static ALIGNMENT_PATTERN_POSITIONS: [&[u8]; 15] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
];

/// The two error-correction bits written into format information for level L.
pub(crate) const ECC_LOW_FORMAT_BITS: u8 = 0b01;

/// A QR code version (1–15) encoded at error correction level L.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(u8);

impl Version {
    /// The smallest supported version.
    pub const MIN: Version = Version(1);

    /// The largest supported version.
    pub const MAX: Version = Version(15);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 15].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 15].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Picks the smallest version whose byte capacity holds `len` bytes.
    pub fn for_len(len: usize) -> Result<Self> {
        BYTE_CAPACITY
            .iter()
            .position(|&cap| len <= cap)
            .map(|i| Version(i as u8 + 1))
            .ok_or(QrError::Capacity {
                len,
                max: Version::MAX.byte_capacity(),
            })
    }

    /// Width and height of the symbol in modules.
    pub const fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Maximum number of bytes a byte-mode segment can hold at this version.
    pub fn byte_capacity(self) -> usize {
        BYTE_CAPACITY[self.index()]
    }

    /// Width of the byte-mode character count field.
    pub fn char_count_bits(self) -> u8 {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    pub fn ecc_codewords_per_block(self) -> usize {
        usize::from(ECC_CODEWORDS_PER_BLOCK[self.index()])
    }

    pub fn num_blocks(self) -> usize {
        usize::from(NUM_ERROR_CORRECTION_BLOCKS[self.index()])
    }

    /// Number of modules available for data and EC bits, remainder bits included.
    pub fn num_raw_data_modules(self) -> usize {
        let ver = usize::from(self.0);
        let mut result: usize = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign: usize = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    /// Total codewords (data plus EC) the symbol carries.
    pub fn total_codewords(self) -> usize {
        self.num_raw_data_modules() / 8
    }

    pub fn num_data_codewords(self) -> usize {
        self.total_codewords() - self.ecc_codewords_per_block() * self.num_blocks()
    }

    pub fn alignment_pattern_positions(self) -> &'static [u8] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// Whether the symbol carries the two version-information blocks.
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-L", self.0)
    }
}
