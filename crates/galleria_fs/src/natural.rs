//! Natural ordering for file and folder names

use std::cmp::Ordering;

/// One run of a name: a number or a lowercased text chunk.
///
/// Numbers order before text at the same position, so "10" sorts ahead
/// of "abc".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalPart {
    Num(u128),
    Text(String),
}

/// Sort key that compares embedded numbers by value, case-insensitively
/// elsewhere: "img2.jpg" < "img10.jpg".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<NaturalPart>);

/// Build the natural sort key for a name.
pub fn natural_key(s: &str) -> NaturalKey {
    let mut parts = Vec::new();
    let mut num = String::new();
    let mut text = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                parts.push(NaturalPart::Text(text.to_lowercase()));
                text.clear();
            }
            num.push(c);
        } else {
            if !num.is_empty() {
                parts.push(number_part(&num));
                num.clear();
            }
            text.push(c);
        }
    }

    if !num.is_empty() {
        parts.push(number_part(&num));
    }
    if !text.is_empty() {
        parts.push(NaturalPart::Text(text.to_lowercase()));
    }

    NaturalKey(parts)
}

fn number_part(digits: &str) -> NaturalPart {
    match digits.parse::<u128>() {
        Ok(n) => NaturalPart::Num(n),
        // Digit runs too long for u128 keep their textual form.
        Err(_) => NaturalPart::Text(digits.to_string()),
    }
}

/// Compare two names in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort names in place in natural order.
pub fn natural_sort(names: &mut [String]) {
    names.sort_by_cached_key(|n| natural_key(n));
}
