//! Comment normalization for declaration files.
//!
//! Declaration files may disable variables with either comment style. Before
//! tokenizing, every comment is rewritten as a `//` comment on its own line,
//! so a disabled declaration always looks like `// type name;`.

const LINE_MARKER: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    BlockComment,
    LineComment,
}

/// Rewrites block comments into line comments and tidies up whitespace.
///
/// * every line inside `/* ... */` becomes a `//` line, and the text following
///   a closing `*/` starts on a new line;
/// * every `//` that does not start a line is moved onto a new line;
/// * every statement inside a comment starts a `//` line of its own;
/// * leading and trailing whitespace of every line, as well as blank lines,
///   are removed.
///
/// A block comment that is never closed comments out the rest of the text.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut state = State::Code;
    // A statement ended inside a comment; the next one starts a new line.
    let mut split = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        if state != State::Code && !c.is_whitespace() && c != ';' {
            let closes = state == State::BlockComment && c == '*' && next == Some('/');
            let reopens = c == '/' && next == Some('/');
            if split && !closes && !reopens {
                out.push('\n');
                out.push_str(LINE_MARKER);
                out.push(' ');
            }
            split = false;
        }

        match (state, c, next) {
            (State::Code, '/', Some('*')) => {
                chars.next();
                out.push('\n');
                out.push_str(LINE_MARKER);
                out.push(' ');
                state = State::BlockComment;
            }
            (State::BlockComment, '*', Some('/')) => {
                chars.next();
                out.push('\n');
                state = State::Code;
            }
            (State::BlockComment, '\n', _) => {
                out.push('\n');
                out.push_str(LINE_MARKER);
                out.push(' ');
                split = false;
            }
            (_, '/', Some('/')) => {
                chars.next();
                out.push('\n');
                out.push_str(LINE_MARKER);
                if state == State::Code {
                    state = State::LineComment;
                }
            }
            (State::LineComment, '\n', _) => {
                out.push('\n');
                state = State::Code;
                split = false;
            }
            (State::Code, _, _) => out.push(c),
            (_, ';', _) => {
                out.push(c);
                split = true;
            }
            _ => out.push(c),
        }
    }

    collapse_whitespace(&out)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("\n\n  a  \n\t\n b\n"), "a\nb\n");
        assert_eq!(collapse_whitespace(" \n \n"), "");
    }

    #[test]
    fn test_empty_block_comment_leaves_no_code() {
        assert_eq!(normalize("/**/int a;"), "//\nint a;\n");
    }
}
