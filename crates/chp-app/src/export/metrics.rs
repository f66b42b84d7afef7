//! Glyph metrics for the standard Helvetica faces
//!
//! Text is written with WinAnsiEncoding, so measuring and encoding share one
//! character mapping: anything outside it is replaced by `?`.

use super::page::FontFace;

const ELLIPSIS: &str = "...";
const FALLBACK: u8 = b'?';

/// Advance widths in 1/1000 em for codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map a character to its WinAnsiEncoding byte
pub fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{2022}' => 0x95,
        _ => FALLBACK,
    }
}

/// Encode a string for a text-showing operator
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn glyph_width(code: u8, font: FontFace) -> u16 {
    let table = match font {
        FontFace::Regular => &HELVETICA_WIDTHS,
        FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match code {
        32..=126 => table[(code - 32) as usize],
        0x96 => 556,
        0x97 => 1000,
        0x91 | 0x92 => match font {
            FontFace::Regular => 222,
            FontFace::Bold => 278,
        },
        0x95 => 350,
        _ => table[(FALLBACK - 32) as usize],
    }
}

/// Rendered width of `text` in points
pub fn text_width(text: &str, font: FontFace, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| glyph_width(encode_char(c), font) as u32)
        .sum();
    units as f32 * size / 1000.0
}

/// Shorten `text` to fit `max_width`.
///
/// Characters are dropped from the end until the string fits, then the last
/// three remaining characters are replaced with `...`. Text that already fits
/// is returned unchanged.
pub fn truncate_to_width(text: &str, font: FontFace, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() && width_of(&chars, font, size) > max_width {
        chars.pop();
    }
    chars.truncate(chars.len().saturating_sub(ELLIPSIS.len()));
    let mut truncated: String = chars.into_iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn width_of(chars: &[char], font: FontFace, size: f32) -> f32 {
    let units: u32 = chars
        .iter()
        .map(|&c| glyph_width(encode_char(c), font) as u32)
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "OK" in Helvetica-Bold: 778 + 722
        assert!((text_width("OK", FontFace::Bold, 10.0) - 15.0).abs() < 1e-4);
        assert!((text_width("ill", FontFace::Regular, 1000.0) - 666.0).abs() < 1e-2);
        assert_eq!(text_width("", FontFace::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_encoding_maps_dashes_and_replaces_unknown() {
        assert_eq!(encode_win_ansi("a\u{2014}b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("\u{3042}"), vec![b'?']);
        assert_eq!(
            text_width("\u{3042}", FontFace::Regular, 10.0),
            text_width("?", FontFace::Regular, 10.0)
        );
    }

    #[test]
    fn test_short_text_is_untouched() {
        let text = "Horn, defroster";
        assert_eq!(truncate_to_width(text, FontFace::Regular, 7.0, 500.0), text);
    }

    #[test]
    fn test_truncation_fits_and_ends_with_ellipsis() {
        let text = "Exhaust system, manifolds, piping, muffler-leaks and/or condition";
        let max = 100.0;
        let truncated = truncate_to_width(text, FontFace::Regular, 7.0, max);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() < text.len());
        assert!(text.starts_with(truncated.trim_end_matches("...")));
        // the ellipsis may be a little wider than the characters it replaced
        let slack = text_width("...", FontFace::Regular, 7.0);
        assert!(text_width(&truncated, FontFace::Regular, 7.0) <= max + slack);
    }

    #[test]
    fn test_truncation_of_tiny_width_is_just_ellipsis() {
        assert_eq!(truncate_to_width("Tires", FontFace::Bold, 7.0, 1.0), "...");
    }
}
