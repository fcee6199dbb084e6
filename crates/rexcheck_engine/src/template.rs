//! Replacement template expansion.
//!
//! Two formats are supported, selected by match flags:
//!
//! - ECMAScript (default): `$$`, `$&`, `` $` ``, `$'`, `$n`, `$nn`. A `$` sequence that names no group is copied
//!   literally. Groups that did not participate expand to nothing.
//! - sed (`FORMAT_SED`): `&` and `\0` for the whole match, `\1`..`\9` for groups, `\c` for a literal `c`.

use regex::Captures;

/// Template syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    EcmaScript,
    Sed,
}

/// Expand `template` for one match and append the result to `out`.
///
/// `text` is the full subject; `` $` `` and `$'` refer to the parts of it around the match.
pub fn expand(format: Format, template: &str, caps: &Captures<'_>, text: &str, out: &mut String) {
    match format {
        Format::EcmaScript => expand_ecmascript(template, caps, text, out),
        Format::Sed => expand_sed(template, caps, out),
    }
}

fn expand_ecmascript(template: &str, caps: &Captures<'_>, text: &str, out: &mut String) {
    let whole = caps.get(0);
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('&') => {
                chars.next();
                out.push_str(whole.map_or("", |m| m.as_str()));
            }
            Some('`') => {
                chars.next();
                out.push_str(whole.map_or("", |m| &text[..m.start()]));
            }
            Some('\'') => {
                chars.next();
                out.push_str(whole.map_or("", |m| &text[m.end()..]));
            }
            Some(first) if first.is_ascii_digit() => {
                chars.next();
                let d1 = digit(first);
                let two = chars.peek().copied().filter(char::is_ascii_digit).map(|second| d1 * 10 + digit(second));
                match two {
                    Some(index) if index >= 1 && index < caps.len() => {
                        chars.next();
                        push_group(caps, index, out);
                    }
                    _ if d1 >= 1 && d1 < caps.len() => push_group(caps, d1, out),
                    _ => {
                        out.push('$');
                        out.push(first);
                    }
                }
            }
            _ => out.push('$'),
        }
    }
}

fn expand_sed(template: &str, caps: &Captures<'_>, out: &mut String) {
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '&' => push_group(caps, 0, out),
            '\\' => match chars.next() {
                Some(d) if d.is_ascii_digit() => push_group(caps, digit(d), out),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            _ => out.push(ch),
        }
    }
}

fn push_group(caps: &Captures<'_>, index: usize, out: &mut String) {
    if let Some(m) = caps.get(index) {
        out.push_str(m.as_str());
    }
}

fn digit(ch: char) -> usize {
    ch.to_digit(10).map_or(0, |d| d as usize)
}
