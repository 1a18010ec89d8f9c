//! Conversion of a textual grade token into a numeric value.

use crate::error::ParseFailure;

/// How a modifier marker changes the remainder of the token.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Modifier {
    /// Strip every marker, parse what is left and add the offset.
    Offset(f64),
    /// `a/b`: the mean of two plain digit strings.
    Average,
}

/// Modifier rules in priority order. Only the first matching marker applies.
///
/// | Marker | Effect        |
/// |--------|---------------|
/// | `+`    | +0.25         |
/// | `-`    | -0.25         |
/// | `½`    | +0.5          |
/// | `/`    | mean of a, b  |
static MODIFIERS: &[(char, Modifier)] = &[
    ('+', Modifier::Offset(0.25)),
    ('-', Modifier::Offset(-0.25)),
    ('½', Modifier::Offset(0.5)),
    ('/', Modifier::Average),
];

/// Parses a grade token such as `"7"`, `"6,5"`, `"7+"`, `"6-"`, `"5½"` or `"7/8"`.
///
/// An absent token is treated exactly like an empty one.
///
/// # Errors
///
/// Returns a [`ParseFailure`] describing why the token has no numeric value.
pub fn parse_grade(token: Option<&str>) -> Result<f64, ParseFailure> {
    let normalized = token.unwrap_or_default().replace(',', ".");
    let normalized = normalized.trim();

    if normalized.is_empty() {
        return Err(ParseFailure::Empty);
    }

    if let Some(value) = parse_number(normalized) {
        return Ok(value);
    }

    let Some((marker, modifier)) = MODIFIERS
        .iter()
        .find(|(marker, _)| normalized.contains(*marker))
    else {
        return Err(ParseFailure::NotNumeric(normalized.to_string()));
    };

    match *modifier {
        Modifier::Offset(offset) => {
            let base = normalized.replace(*marker, "");
            parse_number(base.trim())
                .map(|value| value + offset)
                .ok_or_else(|| ParseFailure::NotNumeric(normalized.to_string()))
        }
        Modifier::Average => average_of_pair(normalized)
            .ok_or_else(|| ParseFailure::MalformedFraction(normalized.to_string())),
    }
}

/// Plain decimal parse that refuses `inf`/`nan` spellings.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn average_of_pair(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split('/').collect();
    let [a, b] = parts.as_slice() else {
        return None;
    };

    if !is_digits(a) || !is_digits(b) {
        return None;
    }

    Some((parse_number(a)? + parse_number(b)?) / 2.0)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
