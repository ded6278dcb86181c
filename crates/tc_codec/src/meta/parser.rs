use super::Tags;

/// Extract the `@name value` tags from a block of declarative text.
///
/// The text is read line by line. A tag line starts with `@` after optional
/// whitespace and comment decoration (`*`, `/`). The name is made of ASCII
/// letters, `_` and `-`, and must be followed by whitespace or the end of the
/// line. The value is the rest of the line, trimmed.
///
/// ```
/// use tc_codec::meta::parse_tags;
///
/// let tags = parse_tags(" The user id.\n @type-signature int\n @required\n");
/// assert_eq!(tags.first("type-signature"), Some("int"));
/// assert_eq!(tags.first("required"), Some(""));
/// ```
pub fn parse_tags(text: &str) -> Tags {
    let mut tags = Tags::new();
    for line in text.lines() {
        if let Some((name, value)) = parse_line(line) {
            tags.push(name, value);
        }
    }
    tags
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let rest = line
        .trim_start_matches(|c: char| c.is_whitespace() || c == '*' || c == '/')
        .strip_prefix('@')?;

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }

    let (name, tail) = rest.split_at(name_len);
    match tail.chars().next() {
        None => Some((name, "")),
        Some(c) if c.is_whitespace() => Some((name, tail.trim())),
        Some(_) => None,
    }
}
