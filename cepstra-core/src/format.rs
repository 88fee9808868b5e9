//! Output rendering for word markers and frame records.
//!
//! Each record is assembled in memory and written with a single call so a
//! failing writer never receives half a line from this module.

use std::io::{self, Write};

/// Writes `word` on its own line.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// let mut buffer = Vec::new();
/// cepstra_core::write_word(&mut buffer, "apple")?;
/// assert_eq!(buffer, b"apple\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_word(mut writer: impl Write, word: &str) -> io::Result<()> {
    let mut line = String::with_capacity(word.len() + 1);
    line.push_str(word);
    line.push('\n');
    writer.write_all(line.as_bytes())
}

/// Writes a frame record as `frame_id,value1,...,valueN`.
///
/// With no values the line holds the bare frame id, without a trailing
/// comma.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// let mut buffer = Vec::new();
/// cepstra_core::write_frame(&mut buffer, "3", &["0.0", "1.0", "-0.0"])?;
/// cepstra_core::write_frame(&mut buffer, "4", &[])?;
/// assert_eq!(buffer, b"3,0.0,1.0,-0.0\n4\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_frame(mut writer: impl Write, frame_id: &str, values: &[&str]) -> io::Result<()> {
    let capacity = frame_id.len() + values.iter().map(|value| value.len() + 1).sum::<usize>() + 1;
    let mut line = String::with_capacity(capacity);
    line.push_str(frame_id);
    for value in values {
        line.push(',');
        line.push_str(value);
    }
    line.push('\n');
    writer.write_all(line.as_bytes())
}
