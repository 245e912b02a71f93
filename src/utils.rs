use std::fmt::{Formatter, Result};

/// Formats every T as `...`
///
/// Used with `derivative` to keep credentials out of `Debug` output and therefore out of traces.
pub fn mask_fmt<T>(_: &T, f: &mut Formatter) -> Result {
    f.write_str("...")
}
