// src/font.rs - 5x7 bitmap glyphs for length labels
//
// Each glyph is seven rows; the five pixel columns sit in the top bits of
// each byte (0b10000000 is the left-most column).

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, including one column of spacing
pub const GLYPH_ADVANCE: u32 = 6;

const BLANK: [u8; 7] = [0; 7];

/// Bitmap for `c`, or `None` for characters the labels never use
pub fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        ' ' => BLANK,
        '0' => [
            0b01110000, 0b10001000, 0b10011000, 0b10101000, 0b11001000, 0b10001000, 0b01110000,
        ],
        '1' => [
            0b00100000, 0b01100000, 0b00100000, 0b00100000, 0b00100000, 0b00100000, 0b01110000,
        ],
        '2' => [
            0b01110000, 0b10001000, 0b00001000, 0b00010000, 0b00100000, 0b01000000, 0b11111000,
        ],
        '3' => [
            0b11111000, 0b00010000, 0b00100000, 0b00010000, 0b00001000, 0b10001000, 0b01110000,
        ],
        '4' => [
            0b00010000, 0b00110000, 0b01010000, 0b10010000, 0b11111000, 0b00010000, 0b00010000,
        ],
        '5' => [
            0b11111000, 0b10000000, 0b11110000, 0b00001000, 0b00001000, 0b10001000, 0b01110000,
        ],
        '6' => [
            0b00110000, 0b01000000, 0b10000000, 0b11110000, 0b10001000, 0b10001000, 0b01110000,
        ],
        '7' => [
            0b11111000, 0b00001000, 0b00010000, 0b00100000, 0b01000000, 0b01000000, 0b01000000,
        ],
        '8' => [
            0b01110000, 0b10001000, 0b10001000, 0b01110000, 0b10001000, 0b10001000, 0b01110000,
        ],
        '9' => [
            0b01110000, 0b10001000, 0b10001000, 0b01111000, 0b00001000, 0b00010000, 0b01100000,
        ],
        '.' => [0, 0, 0, 0, 0, 0b01100000, 0b01100000],
        ':' => [0, 0b01100000, 0b01100000, 0, 0b01100000, 0b01100000, 0],
        '-' => [0, 0, 0, 0b11111000, 0, 0, 0],
        'R' => [
            0b11110000, 0b10001000, 0b10001000, 0b11110000, 0b10100000, 0b10010000, 0b10001000,
        ],
        'c' => [0, 0, 0b01110000, 0b10000000, 0b10000000, 0b10001000, 0b01110000],
        'm' => [0, 0, 0b11010000, 0b10101000, 0b10101000, 0b10001000, 0b10001000],
        'o' => [0, 0, 0b01110000, 0b10001000, 0b10001000, 0b10001000, 0b01110000],
        't' => [
            0b01000000, 0b01000000, 0b11100000, 0b01000000, 0b01000000, 0b01001000, 0b00110000,
        ],
        _ => return None,
    };
    Some(rows)
}

/// Whether the pixel at `(col, row)` of a glyph is set
#[inline]
pub fn is_set(rows: &[u8; 7], col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH && row < GLYPH_HEIGHT && rows[row as usize] & (0b10000000 >> col) != 0
}
