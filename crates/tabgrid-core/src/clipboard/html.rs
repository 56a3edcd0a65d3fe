//! Minimal HTML table reader for clipboard fragments.
//!
//! Only understands what spreadsheets and browsers put on the clipboard: an
//! optional preamble (doctype, comments, `<html>`/`<head>`/`<body>`/`<meta>`
//! wrappers) followed by a `<table>`. Anything else is reported as "not a table"
//! so the caller can fall back to plain text.

use html_escape::decode_html_entities;

struct Tag<'a> {
    name: &'a str,
    closing: bool,
}

/// One markup item: a tag, a comment/declaration, or a run of text.
enum Token<'a> {
    Tag(Tag<'a>),
    Skip,
    Text(&'a str),
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Tokenizer { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        if !rest.starts_with('<') {
            let len = rest.find('<').unwrap_or(rest.len());
            self.pos += len;
            return Some(Token::Text(&rest[..len]));
        }
        if let Some(body) = rest.strip_prefix("<!--") {
            let len = body.find("-->").map_or(rest.len(), |end| 4 + end + 3);
            self.pos += len;
            return Some(Token::Skip);
        }
        let end = tag_end(rest);
        self.pos += end;
        let raw = &rest[1..end];
        let inner = raw.strip_suffix('>').unwrap_or(raw);
        if inner.starts_with('!') || inner.starts_with('?') {
            return Some(Token::Skip);
        }
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(stripped) => (true, stripped),
            None => (false, inner),
        };
        let name_len = inner
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(inner.len());
        Some(Token::Tag(Tag {
            name: &inner[..name_len],
            closing,
        }))
    }
}

/// Byte length of the tag starting at `s[0] == '<'`, including the closing `>`.
/// Quoted attribute values may contain `>`.
fn tag_end(s: &str) -> usize {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices().skip(1) {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '>' => return i + 1,
            None => {}
        }
    }
    s.len()
}

fn is(tag: &Tag<'_>, name: &str) -> bool {
    tag.name.eq_ignore_ascii_case(name)
}

/// Parse the fragment's root table into rows of cell text.
///
/// Returns `None` when the first meaningful element is not a `<table>`.
pub(crate) fn parse_table(html: &str) -> Option<Vec<Vec<String>>> {
    let mut tokens = Tokenizer::new(html);

    loop {
        match tokens.next_token()? {
            Token::Skip => continue,
            Token::Text(text) if text.trim().is_empty() => continue,
            Token::Text(_) => return None,
            Token::Tag(tag) if is(&tag, "table") && !tag.closing => break,
            Token::Tag(tag) if is(&tag, "head") && !tag.closing => skip_head(&mut tokens),
            Token::Tag(tag)
                if ["html", "body", "meta", "head"]
                    .iter()
                    .any(|name| is(&tag, name)) => {}
            Token::Tag(_) => return None,
        }
    }

    let mut rows = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<String> = None;
    let mut depth = 1usize;

    while let Some(token) = tokens.next_token() {
        match token {
            Token::Skip => {}
            Token::Text(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(text);
                }
            }
            Token::Tag(tag) if is(&tag, "table") => {
                if tag.closing {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                } else {
                    depth += 1;
                }
            }
            // Nested tables contribute text to the enclosing cell only.
            Token::Tag(_) if depth > 1 => {}
            Token::Tag(tag) if is(&tag, "tr") => {
                finish_cell(&mut cell, &mut row);
                if let Some(done) = row.take() {
                    rows.push(done);
                }
                if !tag.closing {
                    row = Some(Vec::new());
                }
            }
            Token::Tag(tag) if is(&tag, "td") || is(&tag, "th") => {
                finish_cell(&mut cell, &mut row);
                if !tag.closing {
                    // A cell outside any <tr> opens a row of its own.
                    row.get_or_insert_with(Vec::new);
                    cell = Some(String::new());
                }
            }
            Token::Tag(_) => {}
        }
    }

    finish_cell(&mut cell, &mut row);
    if let Some(done) = row {
        rows.push(done);
    }
    Some(rows)
}

fn skip_head(tokens: &mut Tokenizer<'_>) {
    while let Some(token) = tokens.next_token() {
        if let Token::Tag(tag) = token {
            if tag.closing && is(&tag, "head") {
                return;
            }
        }
    }
}

fn finish_cell(cell: &mut Option<String>, row: &mut Option<Vec<String>>) {
    if let (Some(text), Some(row)) = (cell.take(), row.as_mut()) {
        row.push(decode_html_entities(&text).into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let rows = parse_table("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>")
            .unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_preamble_is_skipped() {
        let html = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><style>td{}</style></head>\
                    <body><!--StartFragment--><table><tbody><tr><td>x</td></tr></tbody></table>\
                    <!--EndFragment--></body></html>";
        assert_eq!(parse_table(html).unwrap(), vec![vec!["x"]]);
    }

    #[test]
    fn test_inner_tags_stripped_and_entities_decoded() {
        let html = "<table><tr><td class=\"a>b\"><b>1 &amp; 2</b></td><td>&lt;x&gt;</td></tr></table>";
        assert_eq!(parse_table(html).unwrap(), vec![vec!["1 & 2", "<x>"]]);
    }

    #[test]
    fn test_whitespace_preserved_in_cells() {
        let html = "<table><tr><td> a </td></tr></table>";
        assert_eq!(parse_table(html).unwrap(), vec![vec![" a "]]);
    }

    #[test]
    fn test_unclosed_cells_and_rows() {
        let html = "<TABLE><TR><TH>h1<TH>h2<TR><TD>v1<TD>v2</TABLE>";
        assert_eq!(
            parse_table(html).unwrap(),
            vec![vec!["h1", "h2"], vec!["v1", "v2"]]
        );
    }

    #[test]
    fn test_cells_without_tr() {
        assert_eq!(
            parse_table("<table><td>x</td></table>").unwrap(),
            vec![vec!["x"]]
        );
        assert_eq!(
            parse_table("<table><tbody><td>a<td>b<tr><td>c</table>").unwrap(),
            vec![vec!["a", "b"], vec!["c"]]
        );
    }

    #[test]
    fn test_non_table_root() {
        assert!(parse_table("<p>hello</p>").is_none());
        assert!(parse_table("plain words").is_none());
        assert!(parse_table("<div><table><tr><td>x</td></tr></table></div>").is_none());
    }
}
