//! A small, independent QR reader for checking encoder output.
//!
//! It only understands what the encoder produces (level L, byte mode,
//! versions 1 to 15) but derives everything else on its own: function pattern
//! layout, format and version words, unmasking, de-interleaving and
//! Reed-Solomon syndromes.

#![allow(dead_code)]

use qrtext::QrCode;

/// (EC codewords per block, block count) for level L, versions 1 to 15.
const LEVEL_L_BLOCKS: [(usize, usize); 15] = [
    (7, 1),
    (10, 1),
    (15, 1),
    (20, 1),
    (26, 1),
    (18, 2),
    (20, 2),
    (24, 2),
    (30, 2),
    (18, 4),
    (20, 4),
    (24, 4),
    (26, 4),
    (30, 4),
    (22, 6),
];

#[derive(Debug)]
pub struct Decoded {
    pub version: usize,
    pub mask: u8,
    pub ecc_level_bits: u8,
    pub payload: Vec<u8>,
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reads `qr` back into its byte-mode payload, checking every structural
/// element along the way.
pub fn read_symbol(qr: &QrCode) -> Result<Decoded, String> {
    let size = qr.size();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad size {size}"));
    }
    let version = (size - 17) / 4;
    let module = |x: usize, y: usize| qr.is_dark(y, x);

    check_finders(size, &module)?;
    let (ecc_level_bits, mask) = read_format(size, &module)?;
    if version >= 7 {
        read_version(size, version, &module)?;
    }

    let function = function_map(size, version);
    let codewords = read_codewords(size, &function, mask, &module);
    let data = deinterleave_and_check(version, &codewords)?;
    let payload = parse_byte_mode(version, &data)?;

    Ok(Decoded {
        version,
        mask,
        ecc_level_bits,
        payload,
    })
}

fn check_finders(size: usize, module: &impl Fn(usize, usize) -> bool) -> Result<(), String> {
    for (x0, y0) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        for dy in 0..7 {
            for dx in 0..7 {
                let ring = dx.min(dy).min(6 - dx).min(6 - dy);
                if module(x0 + dx, y0 + dy) != (ring != 1) {
                    return Err(format!("finder at ({x0}, {y0}) broken at +({dx}, {dy})"));
                }
            }
        }
    }
    Ok(())
}

fn bch_remainder(data: u32, data_bits: u32, generator: u32, gen_degree: u32) -> u32 {
    let mut rem = data << gen_degree;
    for bit in (gen_degree..gen_degree + data_bits).rev() {
        if rem & (1 << bit) != 0 {
            rem ^= generator << (bit - gen_degree);
        }
    }
    rem
}

fn read_format(size: usize, module: &impl Fn(usize, usize) -> bool) -> Result<(u8, u8), String> {
    // (x, y) of bit i, copy one then copy two
    let mut first = 0u32;
    let mut second = 0u32;
    for i in 0..15 {
        let (x1, y1) = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let (x2, y2) = if i < 8 { (size - 1 - i, 8) } else { (8, size - 15 + i) };
        first |= u32::from(module(x1, y1)) << i;
        second |= u32::from(module(x2, y2)) << i;
    }
    if first != second {
        return Err(format!("format copies differ: {first:015b} vs {second:015b}"));
    }
    if !module(8, size - 8) {
        return Err("dark module missing".into());
    }
    let word = first ^ 0x5412;
    let data = word >> 10;
    if bch_remainder(data, 5, 0x537, 10) != word & 0x3FF {
        return Err(format!("format BCH mismatch in {word:015b}"));
    }
    Ok(((data >> 3) as u8, (data & 7) as u8))
}

fn read_version(size: usize, version: usize, module: &impl Fn(usize, usize) -> bool) -> Result<(), String> {
    let mut lower_left = 0u32;
    let mut upper_right = 0u32;
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        upper_right |= u32::from(module(a, b)) << i;
        lower_left |= u32::from(module(b, a)) << i;
    }
    let expected = ((version as u32) << 12) | bch_remainder(version as u32, 6, 0x1F25, 12);
    if upper_right != expected || lower_left != expected {
        return Err(format!(
            "version info mismatch: {upper_right:018b} / {lower_left:018b}, expected {expected:018b}"
        ));
    }
    Ok(())
}

fn alignment_positions(version: usize, size: usize) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let numalign = version / 7 + 2;
    let step = (version * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2;
    let mut result: Vec<usize> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

/// `map[y][x]` is true for modules that carry no data.
fn function_map(size: usize, version: usize) -> Vec<Vec<bool>> {
    let mut map = vec![vec![false; size]; size];
    let mut fill = |left: usize, top: usize, width: usize, height: usize| {
        for y in top..top + height {
            for x in left..left + width {
                map[y][x] = true;
            }
        }
    };
    fill(6, 0, 1, size);
    fill(0, 6, size, 1);
    fill(0, 0, 9, 9);
    fill(size - 8, 0, 8, 9);
    fill(0, size - 8, 9, 8);
    let align = alignment_positions(version, size);
    let n = align.len();
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j + 1 == n) || (i + 1 == n && j == 0) {
                continue;
            }
            fill(cx - 2, cy - 2, 5, 5);
        }
    }
    if version >= 7 {
        fill(size - 11, 0, 3, 6);
        fill(0, size - 11, 6, 3);
    }
    map
}

fn mask_bit(mask: u8, x: usize, y: usize) -> bool {
    match mask {
        0 => (x + y) % 2 == 0,
        1 => y % 2 == 0,
        2 => x % 3 == 0,
        3 => (x + y) % 3 == 0,
        4 => (x / 3 + y / 2) % 2 == 0,
        5 => x * y % 2 + x * y % 3 == 0,
        6 => (x * y % 2 + x * y % 3) % 2 == 0,
        _ => ((x + y) % 2 + x * y % 3) % 2 == 0,
    }
}

fn read_codewords(
    size: usize,
    function: &[Vec<bool>],
    mask: u8,
    module: &impl Fn(usize, usize) -> bool,
) -> Vec<u8> {
    let mut bits: Vec<bool> = Vec::new();
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = (right - j) as usize;
                if !function[y][x] {
                    bits.push(module(x, y) ^ mask_bit(mask, x, y));
                }
            }
        }
        right -= 2;
    }
    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect()
}

fn gf_mul(x: u8, y: u8) -> u8 {
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1d);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

/// Splits interleaved codewords back into blocks, checks every block's
/// Reed-Solomon syndromes and returns the concatenated data codewords.
fn deinterleave_and_check(version: usize, codewords: &[u8]) -> Result<Vec<u8>, String> {
    let (ecc_len, num_blocks) = LEVEL_L_BLOCKS[version - 1];
    let total = codewords.len();
    let num_short = num_blocks - total % num_blocks;
    let short_len = total / num_blocks;
    let data_total = total - ecc_len * num_blocks;

    let mut blocks: Vec<Vec<u8>> = (0..num_blocks)
        .map(|i| Vec::with_capacity(short_len + usize::from(i >= num_short)))
        .collect();
    let mut it = codewords.iter().copied();
    // data part: short blocks stop one round early
    let short_data = short_len - ecc_len;
    for round in 0..=short_data {
        for (i, block) in blocks.iter_mut().enumerate() {
            if round < short_data || i >= num_short {
                block.push(it.next().ok_or("ran out of codewords")?);
            }
        }
    }
    for _ in 0..ecc_len {
        for block in blocks.iter_mut() {
            block.push(it.next().ok_or("ran out of codewords")?);
        }
    }
    if it.next().is_some() {
        return Err("unused codewords".into());
    }

    let mut data = Vec::with_capacity(data_total);
    for (bi, block) in blocks.iter().enumerate() {
        let mut root: u8 = 1;
        for k in 0..ecc_len {
            let syndrome = block.iter().fold(0u8, |acc, &c| gf_mul(acc, root) ^ c);
            if syndrome != 0 {
                return Err(format!("block {bi} syndrome {k} is {syndrome}"));
            }
            root = gf_mul(root, 2);
        }
        data.extend_from_slice(&block[..block.len() - ecc_len]);
    }
    Ok(data)
}

fn parse_byte_mode(version: usize, data: &[u8]) -> Result<Vec<u8>, String> {
    let bit = |i: usize| (data[i / 8] >> (7 - i % 8)) & 1;
    let read = |start: usize, len: usize| (start..start + len).fold(0usize, |acc, i| (acc << 1) | bit(i) as usize);
    let total_bits = data.len() * 8;

    if read(0, 4) != 0b0100 {
        return Err(format!("mode indicator {:04b}", read(0, 4)));
    }
    let count_bits = if version <= 9 { 8 } else { 16 };
    let count = read(4, count_bits);
    let mut pos = 4 + count_bits;
    if pos + count * 8 > total_bits {
        return Err(format!("count {count} overruns data"));
    }
    let payload: Vec<u8> = (0..count).map(|k| read(pos + k * 8, 8) as u8).collect();
    pos += count * 8;

    // terminator and bit padding are zero
    let pad_start = (pos + 4).min(total_bits).div_ceil(8) * 8;
    if (pos..pad_start).any(|i| bit(i) != 0) {
        return Err("non-zero terminator or bit padding".into());
    }
    for (k, &b) in data[pad_start / 8..].iter().enumerate() {
        let expected = if k % 2 == 0 { 0xEC } else { 0x11 };
        if b != expected {
            return Err(format!("pad byte {k} is {b:#04x}"));
        }
    }
    Ok(payload)
}
