use crate::galois::{gf_exp, gf_mul};

/// Largest EC codeword count per block any QR version uses.
const MAX_DEGREE: usize = 30;

/// Reed-Solomon error-correction codeword generator for a fixed degree.
///
/// The divisor is the monic generator polynomial ∏(x − 2^i) for i in
/// `0..degree`, stored high-to-low with the leading 1 omitted.
#[derive(Debug, Clone)]
pub struct ReedSolomonGenerator {
    divisor: [u8; MAX_DEGREE],
    degree: usize,
}

impl ReedSolomonGenerator {
    /// # Panics
    ///
    /// Panics if `degree` is not in `1..=30`.
    pub fn new(degree: usize) -> Self {
        assert!((1..=MAX_DEGREE).contains(&degree), "Degree out of range");
        let mut divisor = [0u8; MAX_DEGREE];
        let poly: &mut [u8] = &mut divisor[..degree];
        // Start with the constant polynomial 1, then multiply by (x - 2^i) each round
        poly[degree - 1] = 1;
        for i in 0..degree {
            let root = gf_exp(i);
            for j in 0..degree {
                poly[j] = gf_mul(poly[j], root);
                if j + 1 < degree {
                    poly[j] ^= poly[j + 1];
                }
            }
        }
        Self { divisor, degree }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Generator coefficients below the leading term, highest degree first.
    pub fn coefficients(&self) -> &[u8] {
        &self.divisor[..self.degree]
    }

    /// Returns the remainder of `data(x) · x^degree` divided by the generator,
    /// i.e. the EC codewords for `data`, highest degree first.
    pub fn compute_remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.degree];
        for &b in data {
            let factor: u8 = b ^ result[0];
            result.copy_within(1.., 0);
            result[self.degree - 1] = 0;
            for (x, &y) in result.iter_mut().zip(self.coefficients()) {
                *x ^= gf_mul(y, factor);
            }
        }
        result
    }
}

/// Computes `ec_len` error-correction codewords for one data block.
pub fn ec_codewords(data: &[u8], ec_len: usize) -> Vec<u8> {
    ReedSolomonGenerator::new(ec_len).compute_remainder(data)
}
