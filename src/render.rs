//! Text rendering of QR codes with half-block glyphs.
//!
//! Each printed line carries two module rows: the glyph for a column is
//! chosen from the (top, bottom) module pair. The symbol is framed by a
//! two-glyph margin on the left and right and one margin line above and below.

use crate::qrcode::QrCode;
use std::fmt;
use std::str::FromStr;

/// Width of the left and right margin, in glyphs.
pub const MARGIN: usize = 2;

const FULL_BLOCK: char = '\u{2588}';
const UPPER_HALF: char = '\u{2580}';
const LOWER_HALF: char = '\u{2584}';
const SPACE: char = ' ';

/// The terminal background the symbol will be printed on.
///
/// On a dark background the printed (lit) part of a glyph stands for light
/// modules; on a light background it stands for dark modules. Either way a
/// reader sees dark modules on a light field.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Background {
    /// Dark terminal with light text.
    #[default]
    Dark,
    /// Light terminal with dark text.
    Light,
}

impl Background {
    /// Interprets a command-line style mode argument: `"light"` in any case
    /// selects [`Background::Light`], anything else is [`Background::Dark`].
    pub fn from_arg(arg: &str) -> Self {
        if arg.eq_ignore_ascii_case("light") {
            Background::Light
        } else {
            Background::Dark
        }
    }

    /// Glyph for a (top, bottom) pair of modules, `true` meaning dark.
    pub fn glyph(self, top: bool, bottom: bool) -> char {
        let glyph = match (top, bottom) {
            (true, true) => SPACE,
            (true, false) => LOWER_HALF,
            (false, true) => UPPER_HALF,
            (false, false) => FULL_BLOCK,
        };
        match self {
            Background::Dark => glyph,
            Background::Light => complement(glyph),
        }
    }

    /// Glyph used for the margins, the same as a pair of light modules.
    pub fn margin_glyph(self) -> char {
        self.glyph(false, false)
    }
}

impl FromStr for Background {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Background::from_arg(s))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Dark => write!(f, "dark"),
            Background::Light => write!(f, "light"),
        }
    }
}

/// Swaps lit and unlit halves of a block glyph.
pub fn complement(glyph: char) -> char {
    match glyph {
        SPACE => FULL_BLOCK,
        FULL_BLOCK => SPACE,
        UPPER_HALF => LOWER_HALF,
        LOWER_HALF => UPPER_HALF,
        other => other,
    }
}

/// Renders `qr` as text lines: a margin line, one line per pair of module
/// rows, and a closing margin line. Every line is `size + 4` glyphs wide.
pub fn render_lines(qr: &QrCode, background: Background) -> Vec<String> {
    let size = qr.size();
    let margin = background.margin_glyph();
    let blank: String = std::iter::repeat_n(margin, size + 2 * MARGIN).collect();

    let mut lines = Vec::with_capacity(size.div_ceil(2) + 2);
    lines.push(blank.clone());
    for y in (0..size).step_by(2) {
        let mut line = String::with_capacity((size + 2 * MARGIN) * 3);
        line.extend(std::iter::repeat_n(margin, MARGIN));
        for x in 0..size {
            let top = qr.is_dark(y, x);
            // An odd final row pairs with the light quiet zone below it
            let bottom = y + 1 < size && qr.is_dark(y + 1, x);
            line.push(background.glyph(top, bottom));
        }
        line.extend(std::iter::repeat_n(margin, MARGIN));
        lines.push(line);
    }
    lines.push(blank);
    lines
}

/// Renders `qr` as a single string, lines separated by `\n`.
pub fn render_to_string(qr: &QrCode, background: Background) -> String {
    render_lines(qr, background).join("\n")
}

/// Prints the given QR Code to the console.
pub fn print_qr(qr: &QrCode, background: Background) {
    for line in render_lines(qr, background) {
        println!("{}", line);
    }
}
