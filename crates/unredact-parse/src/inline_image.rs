//! Locating inline images (`BI ... ID ... EI`) in raw content stream bytes.
//!
//! Inline image data is binary and cannot go through the operator decoder,
//! so a content stream is split into runs of ordinary operators and the raw
//! byte ranges of each inline image. Strings and comments are skipped while
//! scanning so a `BI` inside them is not mistaken for an image.

use std::ops::Range;

use crate::error::BackendError;

/// A byte range of a content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ordinary operators, decodable on their own.
    Operators(Range<usize>),
    /// One complete inline image, from `BI` through `EI`.
    InlineImage(Range<usize>),
}

/// Token value for strings, names and delimiters; only keywords matter here.
const NOT_A_KEYWORD: &[u8] = &[];

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn skip_whitespace_and_comments(input: &[u8], pos: &mut usize) {
    while *pos < input.len() {
        if is_whitespace(input[*pos]) {
            *pos += 1;
        } else if input[*pos] == b'%' {
            while *pos < input.len() && input[*pos] != b'\n' && input[*pos] != b'\r' {
                *pos += 1;
            }
        } else {
            break;
        }
    }
}

/// Skip a literal string starting at `(`, honouring nesting and escapes.
fn skip_literal_string(input: &[u8], pos: &mut usize) -> Result<(), BackendError> {
    let mut depth = 0usize;
    while *pos < input.len() {
        match input[*pos] {
            b'\\' => *pos += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    *pos += 1;
                    return Ok(());
                }
            }
            _ => {}
        }
        *pos += 1;
    }
    Err(BackendError::Parse("unterminated literal string".to_string()))
}

/// Advance past one token and return it if it is a keyword or number.
fn next_token<'a>(input: &'a [u8], pos: &mut usize) -> Result<Option<&'a [u8]>, BackendError> {
    skip_whitespace_and_comments(input, pos);
    if *pos >= input.len() {
        return Ok(None);
    }
    match input[*pos] {
        b'(' => {
            skip_literal_string(input, pos)?;
            Ok(Some(NOT_A_KEYWORD))
        }
        b'<' if input.get(*pos + 1) != Some(&b'<') => {
            while *pos < input.len() && input[*pos] != b'>' {
                *pos += 1;
            }
            if *pos >= input.len() {
                return Err(BackendError::Parse("unterminated hex string".to_string()));
            }
            *pos += 1;
            Ok(Some(NOT_A_KEYWORD))
        }
        b'/' => {
            *pos += 1;
            while *pos < input.len() && !is_whitespace(input[*pos]) && !is_delimiter(input[*pos]) {
                *pos += 1;
            }
            Ok(Some(NOT_A_KEYWORD))
        }
        b if is_delimiter(b) => {
            *pos += 1;
            Ok(Some(NOT_A_KEYWORD))
        }
        _ => {
            let start = *pos;
            while *pos < input.len() && !is_whitespace(input[*pos]) && !is_delimiter(input[*pos]) {
                *pos += 1;
            }
            Ok(Some(&input[start..*pos]))
        }
    }
}

/// Find the end of an inline image whose `BI` keyword ends at `pos`.
///
/// Returns the position just past `EI`. The data after `ID` and one
/// whitespace byte runs to the first `EI` preceded by whitespace and followed
/// by whitespace, a delimiter or the end of the stream.
fn inline_image_end(input: &[u8], mut pos: usize) -> Result<usize, BackendError> {
    loop {
        match next_token(input, &mut pos)? {
            None => {
                return Err(BackendError::Parse(
                    "unterminated inline image (missing ID)".to_string(),
                ));
            }
            Some(b"ID") => break,
            Some(_) => {}
        }
    }
    if pos < input.len() && is_whitespace(input[pos]) {
        pos += 1;
    }

    let data_start = pos;
    while pos + 2 <= input.len() {
        if (pos == data_start || is_whitespace(input[pos - 1]))
            && &input[pos..pos + 2] == b"EI"
            && input
                .get(pos + 2)
                .is_none_or(|b| is_whitespace(*b) || is_delimiter(*b))
        {
            return Ok(pos + 2);
        }
        pos += 1;
    }
    Err(BackendError::Parse(
        "unterminated inline image (missing EI)".to_string(),
    ))
}

/// Split content stream bytes into operator runs and inline images, in
/// stream order. Empty operator runs are omitted.
///
/// # Errors
///
/// Returns [`BackendError::Parse`] for an unterminated string or inline
/// image.
pub fn split_inline_images(input: &[u8]) -> Result<Vec<Segment>, BackendError> {
    let mut segments = Vec::new();
    let mut run_start = 0;
    let mut pos = 0;

    loop {
        let Some(token) = next_token(input, &mut pos)? else {
            break;
        };
        if token != b"BI" {
            continue;
        }
        let image_start = pos - 2;
        if image_start > run_start {
            segments.push(Segment::Operators(run_start..image_start));
        }
        let image_end = inline_image_end(input, pos)?;
        segments.push(Segment::InlineImage(image_start..image_end));
        run_start = image_end;
        pos = image_end;
    }

    if run_start < input.len() {
        segments.push(Segment::Operators(run_start..input.len()));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(input: &'a [u8], segments: &[Segment]) -> Vec<(&'static str, &'a [u8])> {
        segments
            .iter()
            .map(|segment| match segment {
                Segment::Operators(range) => ("ops", &input[range.clone()]),
                Segment::InlineImage(range) => ("image", &input[range.clone()]),
            })
            .collect()
    }

    #[test]
    fn no_inline_image_is_one_run() {
        let input = b"q 0 g 10 10 50 50 re f Q";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(segments, vec![Segment::Operators(0..input.len())]);
    }

    #[test]
    fn empty_stream_has_no_segments() {
        assert!(split_inline_images(b"").unwrap().is_empty());
    }

    #[test]
    fn image_between_operators() {
        let input = b"q 0 g 10 10 50 50 re f Q\nBI\n/W 2 /H 1 /BPC 8 /CS /G\nID\nAB\nEI\nBT ET";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(
            slices(input, &segments),
            vec![
                ("ops", &b"q 0 g 10 10 50 50 re f Q\n"[..]),
                ("image", &b"BI\n/W 2 /H 1 /BPC 8 /CS /G\nID\nAB\nEI"[..]),
                ("ops", &b"\nBT ET"[..]),
            ]
        );
    }

    #[test]
    fn binary_data_containing_ei_letters() {
        let input = b"BI /W 4 /H 1 /BPC 8 /CS /G ID xEIy EI Q";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(
            slices(input, &segments),
            vec![
                ("image", &b"BI /W 4 /H 1 /BPC 8 /CS /G ID xEIy EI"[..]),
                ("ops", &b" Q"[..]),
            ]
        );
    }

    #[test]
    fn bi_inside_string_or_comment_is_ignored() {
        let input = b"BT (BI ID EI) Tj ET % BI here\n0 g";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(segments, vec![Segment::Operators(0..input.len())]);
    }

    #[test]
    fn name_starting_with_bi_is_not_an_image() {
        let input = b"/BIG gs 0 g";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(segments, vec![Segment::Operators(0..input.len())]);
    }

    #[test]
    fn two_adjacent_images() {
        let input = b"BI /W 1 ID a EI BI /W 1 ID b EI";
        let segments = split_inline_images(input).unwrap();
        assert_eq!(
            slices(input, &segments),
            vec![
                ("image", &b"BI /W 1 ID a EI"[..]),
                ("ops", &b" "[..]),
                ("image", &b"BI /W 1 ID b EI"[..]),
            ]
        );
    }

    #[test]
    fn missing_ei_is_an_error() {
        assert!(split_inline_images(b"BI /W 1 ID abc").is_err());
        assert!(split_inline_images(b"BI /W 1").is_err());
    }
}
