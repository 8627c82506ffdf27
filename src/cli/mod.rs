//! CLI command definitions and output rendering.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use std::io::{self, Write};

use colored::Colorize;

/// Write `key = value` lines, keys bold and values plain.
pub fn write_pairs<'a, W: Write>(
    out: &mut W,
    pairs: impl IntoIterator<Item = (&'a str, String)>,
) -> io::Result<()> {
    for (key, value) in pairs {
        writeln!(out, "{} = {}", key.bold(), value)?;
    }
    out.flush()
}

/// Write `serde_json` output followed by a newline.
pub fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_pairs_one_line_each() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_pairs(
            &mut buf,
            [("redis-host", "localhost".to_string()), ("port", "6379".to_string())],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "redis-host = localhost\nport = 6379\n"
        );
    }

    #[test]
    fn write_json_is_newline_terminated() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({ "a": 1 })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"a\": 1"));
    }
}
