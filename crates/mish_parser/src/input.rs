//! Reading one command line and the `$$` substitution applied to it.

use std::io::{self, BufRead};

/// Longest accepted command line in bytes, newline excluded.
pub const MAX_LINE_LEN: usize = 2048;

/// Marker replaced by the shell's process id.
const PID_MARKER: &str = "$$";

/// Read one line from `reader` with its line terminator removed.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the read. Returns `Ok(None)` once the input is exhausted.
pub fn read_command_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    let line = match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok(Some(line))
}

/// True for lines that produce no command: empty lines and comments.
///
/// A comment is a line whose very first character is `#`.
pub fn is_blank_or_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Replace every `$$`, scanning left to right, with the decimal `pid`.
/// A lone `$` is left as it is.
pub fn expand_pid(line: &str, pid: i32) -> String {
    if !line.contains(PID_MARKER) {
        return line.to_string();
    }
    line.replace(PID_MARKER, &pid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_strips_newline_and_reports_eof() {
        let mut input = Cursor::new("ls -l\r\nstatus\nlast");
        assert_eq!(read_command_line(&mut input).unwrap().as_deref(), Some("ls -l"));
        assert_eq!(read_command_line(&mut input).unwrap().as_deref(), Some("status"));
        assert_eq!(read_command_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_command_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut input = Cursor::new(b"echo \xff\xfe\necho ok\n".to_vec());
        assert_eq!(
            read_command_line(&mut input).unwrap().as_deref(),
            Some("echo \u{fffd}\u{fffd}")
        );
        assert_eq!(read_command_line(&mut input).unwrap().as_deref(), Some("echo ok"));
        assert_eq!(read_command_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(is_blank_or_comment(""));
        assert!(is_blank_or_comment("# a comment"));
        assert!(is_blank_or_comment("#"));
        assert!(!is_blank_or_comment("echo # not a comment"));
        assert!(!is_blank_or_comment("   "));
    }

    #[test]
    fn test_expand_pid() {
        assert_eq!(expand_pid("echo $$", 4242), "echo 4242");
        assert_eq!(expand_pid("touch f$$.$$", 7), "touch f7.7");
        assert_eq!(expand_pid("a$$$b", 12), "a12$b");
        assert_eq!(expand_pid("$$$$", 5), "55");
        assert_eq!(expand_pid("cost $5", 99), "cost $5");
    }
}
