//! Markup tokenizer
//!
//! Splits markup into a flat run of tag spans and text spans in one pass.
//! No validation and no entity decoding happen here; the tokenizer never
//! fails. Tokens borrow from the input, so concatenating every token's
//! `raw()` reproduces the input exactly.

/// One span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A `<...>` span (comments are a single span even if they contain `>`)
    Tag(&'a str),
    /// Everything between tags
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// The exact slice of input this token covers.
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Tag(raw) | Token::Text(raw) => raw,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag(_))
    }
}

/// Split `markup` into tokens.
///
/// An unterminated `<` (no closing `>` before end of input) turns the rest
/// of the input into a single text token.
pub fn tokenize(markup: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < markup.len() {
        let Some(rel) = markup[i..].find('<') else {
            tokens.push(Token::Text(&markup[i..]));
            break;
        };
        let open = i + rel;

        let Some(end) = tag_end(markup, open) else {
            tokens.push(Token::Text(&markup[i..]));
            break;
        };

        if open > i {
            tokens.push(Token::Text(&markup[i..open]));
        }
        tokens.push(Token::Tag(&markup[open..end]));
        i = end;
    }

    tokens
}

/// Exclusive end offset of the tag starting at `open`, if it is terminated.
fn tag_end(markup: &str, open: usize) -> Option<usize> {
    let rest = &markup[open..];
    if rest.starts_with("<!--") {
        return rest[4..].find("-->").map(|rel| open + 4 + rel + 3);
    }
    rest.find('>').map(|rel| open + rel + 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("<p>Hello</p>");
        assert_eq!(
            tokens,
            vec![Token::Tag("<p>"), Token::Text("Hello"), Token::Tag("</p>")]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_plain_text() {
        assert_eq!(tokenize("just text"), vec![Token::Text("just text")]);
    }

    #[test]
    fn test_comment_with_angle_bracket_is_one_token() {
        let tokens = tokenize("<!-- a > b --><p>x</p>");
        assert_eq!(tokens[0], Token::Tag("<!-- a > b -->"));
        assert_eq!(tokens[1], Token::Tag("<p>"));
    }

    #[test]
    fn test_unterminated_tag_becomes_text() {
        let tokens = tokenize("<b>bold</b> a <unterminated");
        assert_eq!(tokens.last(), Some(&Token::Text(" a <unterminated")));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_unterminated_comment_becomes_text() {
        let tokens = tokenize("x<!-- never closed");
        assert_eq!(tokens, vec![Token::Text("x<!-- never closed")]);
    }

    #[test]
    fn test_tokens_reassemble_input() {
        let input = "<div class=\"a\">\n  Hi <b>there</b> &amp; 🎉\n</div><br/>tail";
        let joined: String = tokenize(input).iter().map(|t| t.raw()).collect();
        assert_eq!(joined, input);
    }
}
