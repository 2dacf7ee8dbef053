/// Escape characters that could open markup: `< > " ' /`.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            sanitize_input(r#"<a href="/x">it's</a>"#),
            "&lt;a href=&quot;&#x2F;x&quot;&gt;it&#x27;s&lt;&#x2F;a&gt;"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize_input("Olá, mundo & co"), "Olá, mundo & co");
    }
}
