//! Field text sent to Anki for a flashcard.

use crate::latex::Flashcard;

/// Escapes `&`, `<`, `>`, `"` and `'` for use inside an HTML field.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Front field: the escaped, trimmed card title.
pub fn front_text(card: &Flashcard) -> String {
    escape_html(card.front.trim())
}

/// Back field: the escaped body inside a `[latex]` block so Anki typesets it.
pub fn back_text(card: &Flashcard) -> String {
    format!("[latex]\n{}\n[/latex]\n", escape_html(&card.body))
}
