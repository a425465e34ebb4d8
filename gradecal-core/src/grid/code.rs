//! Reducing a noisy cell to a short subject code.

/// Letters OCR commonly reads as digits.
fn lookalike_letter(c: char) -> Option<char> {
    match c {
        '0' => Some('O'),
        '1' => Some('I'),
        '5' => Some('S'),
        '8' => Some('B'),
        _ => None,
    }
}

/// Extract the subject code of a cell: the first run of ASCII letters of
/// the upper-cased value, truncated to `max_len`.
///
/// A digit wedged between two letters (`S0P`) is read as the letter it
/// resembles. Returns `None` when the cell has no letters at all.
pub fn extract_code(raw: &str, max_len: usize) -> Option<String> {
    let chars: Vec<char> = raw.to_uppercase().chars().collect();

    let repaired = chars.iter().enumerate().map(|(i, &c)| {
        let between_letters = i > 0
            && i + 1 < chars.len()
            && chars[i - 1].is_ascii_alphabetic()
            && chars[i + 1].is_ascii_alphabetic();
        match lookalike_letter(c) {
            Some(letter) if between_letters => letter,
            _ => c,
        }
    });

    let code: String = repaired
        .skip_while(|c| !c.is_ascii_alphabetic())
        .take_while(|c| c.is_ascii_alphabetic())
        .take(max_len)
        .collect();

    (!code.is_empty()).then_some(code)
}
