//! JSON text form for the `redacted_data_json` column
//!
//! Objects and arrays use `", "` between items and `": "` between key and
//! value. With `ensure_ascii`, every character outside printable ASCII is
//! written as a `\uXXXX` escape (a surrogate pair above U+FFFF).

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use std::io;

#[derive(Debug, Clone, Copy)]
pub struct SpacedFormatter {
    ensure_ascii: bool,
}

impl SpacedFormatter {
    pub fn new(ensure_ascii: bool) -> Self {
        Self { ensure_ascii }
    }
}

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.ensure_ascii {
            return CompactFormatter.write_string_fragment(writer, fragment);
        }

        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize `value` in the spaced form
pub fn to_string<T>(value: &T, ensure_ascii: bool) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter::new(ensure_ascii));
    value.serialize(&mut serializer)?;

    // Serializer only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
