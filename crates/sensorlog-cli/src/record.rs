//! `ID:value` record parsing.

/// One reading addressed to a sensor by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    pub id: &'a str,
    pub value: f64,
}

/// Splits a line at its first `:` into a sensor id and a value.
///
/// Returns `None` when the line has no separator. The value is parsed with
/// [`lenient_f64`], so a malformed number becomes `0.0` instead of an error.
pub fn parse_record(line: &str) -> Option<Record<'_>> {
    let (id, value) = line.split_once(':')?;
    Some(Record {
        id,
        value: lenient_f64(value),
    })
}

/// Parses the longest decimal number at the start of `text`.
///
/// Leading whitespace is skipped and trailing garbage ignored, the way C's
/// `atof` behaves. Text with no leading number yields `0.0`.
pub fn lenient_f64(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
