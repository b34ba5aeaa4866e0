//! Galois Field GF(2^8) arithmetic for QR Code Reed-Solomon coding.
//!
//! The field is generated by the primitive polynomial 0x11D
//! (x⁸ + x⁴ + x³ + x² + 1) with generator element 2, as mandated by
//! ISO/IEC 18004. Exponent and logarithm tables are built once on first use
//! and shared read-only by every encoder afterwards.

use std::sync::OnceLock;

/// QR Code field polynomial: x⁸ + x⁴ + x³ + x² + 1
const GF256_POLYNOMIAL: u16 = 0x11D;

/// Number of non-zero field elements.
const LIMIT: usize = 255;

/// Exponent and logarithm lookup tables for GF(256).
pub struct GaloisField {
    exp_table: [u8; 256],
    log_table: [u8; 256],
}

impl GaloisField {
    pub fn new() -> Self {
        let mut exp_table = [0u8; 256];
        let mut log_table = [0u8; 256];
        let mut b: u16 = 1;
        for l in 0..LIMIT {
            exp_table[l] = b as u8;
            log_table[b as usize] = l as u8;
            b <<= 1;
            if b & 0x100 != 0 {
                b ^= GF256_POLYNOMIAL;
            }
        }
        // 2^255 == 2^0; keeps exp(i) total over 0..=255
        exp_table[LIMIT] = exp_table[0];
        Self { exp_table, log_table }
    }

    /// Returns 2^`power`.
    #[inline]
    pub fn exp(&self, power: usize) -> u8 {
        self.exp_table[power % LIMIT]
    }

    /// Returns the discrete logarithm of a non-zero element.
    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        debug_assert_ne!(a, 0, "log of zero is undefined");
        self.log_table[a as usize]
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[sum % LIMIT]
    }

    /// Divides `a` by the non-zero element `b`.
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        assert_ne!(b, 0, "division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let diff = LIMIT + self.log_table[a as usize] as usize - self.log_table[b as usize] as usize;
        self.exp_table[diff % LIMIT]
    }
}

impl Default for GaloisField {
    fn default() -> Self {
        Self::new()
    }
}

static GALOIS_FIELD: OnceLock<GaloisField> = OnceLock::new();

/// Get the global GF(256) instance
pub fn galois_field() -> &'static GaloisField {
    GALOIS_FIELD.get_or_init(GaloisField::new)
}

#[inline]
pub fn gf_mul(a: u8, b: u8) -> u8 {
    galois_field().mul(a, b)
}

#[inline]
pub fn gf_div(a: u8, b: u8) -> u8 {
    galois_field().div(a, b)
}

#[inline]
pub fn gf_exp(power: usize) -> u8 {
    galois_field().exp(power)
}
