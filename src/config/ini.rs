use heapless::String;

pub const INI_BUFFER_SIZE: usize = 512;

pub type Value = String<INI_BUFFER_SIZE>;

#[derive(PartialEq, Debug)]
pub enum Entry<'a> {
    Section(&'a str),
    KeyValue(&'a str, Value),
    None,
}

#[inline]
fn is_blank(c: char) -> bool {
    c <= ' '
}

fn is_comment(c: char) -> bool {
    c == ';' || c == '#'
}

/// Cuts a trailing comment outside of double quotes, then trailing blanks.
fn strip_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    let mut in_string = false;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'"' if bytes.get(index + 1) == Some(&b'"') => index += 1,
            b'"' => in_string = !in_string,
            b'\\' if bytes.get(index + 1) == Some(&b'"') => index += 1,
            b';' | b'#' if !in_string => break,
            _ => (),
        }
        index += 1;
    }
    value[..index.min(bytes.len())].trim_end_matches(is_blank)
}

fn copy_truncated(value: &str, dequote: bool) -> Value {
    let mut string = Value::new();
    let mut chars = value.chars().peekable();
    while let Some(mut c) = chars.next() {
        if dequote && (c == '"' || c == '\\') && chars.peek() == Some(&'"') {
            c = '"';
            chars.next();
        }
        if string.push(c).is_err() {
            break;
        }
    }
    string
}

fn clean_value(value: &str) -> Value {
    let value = strip_comment(value.trim_start_matches(is_blank));
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return copy_truncated(&value[1..value.len() - 1], true);
    }
    copy_truncated(value, false)
}

pub fn parse_line(line: &str) -> Entry {
    let line = line.trim_start_matches(is_blank);
    match line.chars().next() {
        None => return Entry::None,
        Some(c) if is_comment(c) => return Entry::None,
        _ => (),
    }
    if line.starts_with('[') {
        if let Some(end) = line.rfind(']') {
            return Entry::Section(&line[1..end]);
        }
    }
    let index = match line.find('=').or_else(|| line.find(':')) {
        Some(index) => index,
        None => return Entry::None,
    };
    let key = line[..index].trim_end_matches(is_blank);
    Entry::KeyValue(key, clean_value(&line[index + 1..]))
}

/// Calls `callback` with section, key and value of every setting in `text`, in order,
/// until it returns false.
pub fn browse<F>(text: &str, mut callback: F)
where
    F: FnMut(&str, &str, &str) -> bool,
{
    let mut section = "";
    for line in text.lines() {
        match parse_line(line) {
            Entry::Section(name) => section = name,
            Entry::KeyValue(key, value) => {
                if !callback(section, key, value.as_str()) {
                    return;
                }
            }
            Entry::None => continue,
        }
    }
}

mod test {
    #[test]
    fn test_parse_line() {
        use super::{parse_line, Entry, Value};

        let value = |s: &str| Value::from(s);
        assert_eq!(parse_line("  [CONTACT_POINTS] "), Entry::Section("CONTACT_POINTS"));
        assert_eq!(parse_line("; comment"), Entry::None);
        assert_eq!(parse_line("# comment"), Entry::None);
        assert_eq!(parse_line("   "), Entry::None);
        assert_eq!(parse_line("no separator here"), Entry::None);
        assert_eq!(parse_line("static_cg_height = 2.5"), Entry::KeyValue("static_cg_height", value("2.5")));
        assert_eq!(parse_line("key: value ; trailing"), Entry::KeyValue("key", value("value")));
        assert_eq!(parse_line("title = \"a;b\" # note"), Entry::KeyValue("title", value("a;b")));
        assert_eq!(parse_line("quote = \"say \\\"hi\\\"\""), Entry::KeyValue("quote", value("say \"hi\"")));
        assert_eq!(parse_line("empty ="), Entry::KeyValue("empty", value("")));
    }

    #[test]
    fn test_truncate_long_value() {
        use std::string::String;

        use super::{parse_line, Entry, INI_BUFFER_SIZE};

        let line = std::format!("key = {}", String::from_utf8(std::vec![b'x'; 1000]).unwrap());
        match parse_line(&line) {
            Entry::KeyValue(_, value) => assert_eq!(value.len(), INI_BUFFER_SIZE),
            entry => panic!("Unexpected {:?}", entry),
        }
    }

    #[test]
    fn test_browse_stops_early() {
        use std::vec::Vec;

        use super::browse;

        let text = "[A]\nx = 1\ny = 2\n[B]\r\nz = 3\n";
        let mut seen = Vec::new();
        browse(text, |section, key, value| {
            seen.push(std::format!("{}.{}={}", section, key, value));
            key != "y"
        });
        assert_eq!(seen, std::vec!["A.x=1", "A.y=2"]);

        let mut seen = Vec::new();
        browse(text, |section, key, _| {
            seen.push(std::format!("{}.{}", section, key));
            true
        });
        assert_eq!(seen, std::vec!["A.x", "A.y", "B.z"]);
    }
}
