//! String literal decoding and template-literal line tracking.

/// Decodes the escape sequences of a string or template literal body.
///
/// Unknown escapes decode to the escaped character itself, and malformed
/// numeric escapes are kept verbatim.
#[must_use]
pub fn unescape(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut index = 0;

    while let Some(&c) = chars.get(index) {
        index += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&escaped) = chars.get(index) else {
            out.push('\\');
            break;
        };
        index += 1;

        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.get(index).is_some_and(char::is_ascii_digit) => out.push('\0'),
            'x' => match read_hex(&chars, index, 2) {
                Some(code) => {
                    out.extend(char::from_u32(code));
                    index += 2;
                }
                None => out.push('x'),
            },
            'u' => match read_unicode_escape(&chars, index) {
                Some((decoded, consumed)) => {
                    out.push(decoded);
                    index += consumed;
                }
                None => out.push('u'),
            },
            // line continuation
            '\r' => {
                if chars.get(index) == Some(&'\n') {
                    index += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    out
}

/// Reads exactly `len` hex digits starting at `start`. Empty runs and
/// values that overflow `u32` give `None`.
fn read_hex(chars: &[char], start: usize, len: usize) -> Option<u32> {
    if len == 0 {
        return None;
    }
    let digits = chars.get(start..start.checked_add(len)?)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| acc.checked_mul(16)?.checked_add(c.to_digit(16)?))
}

/// Decodes the part of a `\u` escape after the `u`, returning the character
/// and how many chars were consumed. Surrogate pairs written as two `\u`
/// escapes are combined.
fn read_unicode_escape(chars: &[char], start: usize) -> Option<(char, usize)> {
    if chars.get(start) == Some(&'{') {
        let close = chars.get(start..)?.iter().position(|&c| c == '}')?;
        let code = read_hex(chars, start + 1, close.checked_sub(1)?)?;
        return char::from_u32(code).map(|c| (c, close + 1));
    }

    let high = read_hex(chars, start, 4)?;
    if (0xD800..0xDC00).contains(&high)
        && chars.get(start + 4) == Some(&'\\')
        && chars.get(start + 5) == Some(&'u')
        && let Some(low) = read_hex(chars, start + 6, 4)
        && (0xDC00..0xE000).contains(&low)
    {
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).map(|c| (c, 10));
    }

    char::from_u32(high).map(|c| (c, 4))
}

/// Counts backticks that are not preceded by a backslash.
fn count_unescaped_backticks(line: &str) -> usize {
    let mut count = 0;
    let mut previous = None;
    for c in line.chars() {
        if c == '`' && previous != Some('\\') {
            count += 1;
        }
        previous = Some(c);
    }
    count
}

/// Tracks whether a line starts inside an unterminated multi-line template
/// literal, one line at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateTracker {
    inside: bool,
}

impl TemplateTracker {
    /// True when the next line fed is template content.
    #[must_use]
    pub const fn inside_template(&self) -> bool {
        self.inside
    }

    pub fn feed(&mut self, line: &str) {
        if count_unescaped_backticks(line) % 2 == 1 {
            self.inside = !self.inside;
        }
    }
}

/// Removes up to `width` leading spaces or tabs from every line after the
/// first, leaving lines inside multi-line template literals untouched.
#[must_use]
pub fn dedent(text: &str, width: usize) -> String {
    let mut tracker = TemplateTracker::default();
    let mut lines = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if index == 0 || tracker.inside_template() {
            lines.push(line);
        } else {
            lines.push(strip_indent(line, width));
        }
        tracker.feed(line);
    }

    lines.join("\n")
}

/// Drops at most `width` leading spaces or tabs.
fn strip_indent(line: &str, width: usize) -> &str {
    let indent = line.chars().take(width).take_while(|c| *c == ' ' || *c == '\t').count();
    line.get(indent..).unwrap_or(line)
}

/// Smallest indentation among the non-blank lines after the first, skipping
/// lines that sit inside a template literal.
#[must_use]
pub fn continuation_indent(text: &str) -> usize {
    let mut tracker = TemplateTracker::default();
    let mut width: Option<usize> = None;

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 && !tracker.inside_template() && !line.trim().is_empty() {
            let indent = line.chars().take_while(|c| *c == ' ' || *c == '\t').count();
            width = Some(width.map_or(indent, |current| current.min(indent)));
        }
        tracker.feed(line);
    }

    width.unwrap_or(0)
}
