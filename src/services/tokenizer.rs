// src/services/tokenizer.rs

//! Single-line CSV tokenizer.
//!
//! Lenient by construction: it never fails. Unterminated quotes simply run to
//! the end of the line, and column counts are left for the materializer to
//! judge.

/// Split one CSV line into its field values.
///
/// - `"` toggles quoted mode, except that `""` emits one literal quote.
/// - `,` outside quotes ends the current field.
/// - The final field is always emitted, so an empty line yields `[""]`.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }
    fields.push(cell);
    fields
}
