// Record codec: decode a byte window into a path-keyed field map, and
// encode a partial field map back into a live window. Encoding is always
// read-modify-write so that manufacturer-reserved bits the layout does not
// model survive untouched.

use super::field::{decode_field, encode_field, Value};
use super::layout::Layout;
use super::{CodecError, Result};
use std::collections::BTreeMap;

/// Decoded record contents, keyed by field path
/// (e.g. `"scan_edges[3].freq"`).
pub type FieldMap = BTreeMap<String, Value>;

fn check_window(layout: &Layout, window: &[u8]) -> Result<()> {
    if window.len() != layout.size() {
        return Err(CodecError::Layout {
            name: layout.name().to_string(),
            expected: layout.size(),
            actual: window.len(),
        });
    }
    Ok(())
}

fn parse_into(layout: &Layout, window: &[u8], prefix: &str, out: &mut FieldMap) -> Result<()> {
    for field in layout.fields() {
        let value = decode_field(window, field)?;
        out.insert(format!("{}{}", prefix, field.name), value);
    }
    for child in layout.children() {
        match child.count {
            None => {
                let sub = &window[child.offset..child.offset + child.layout.size()];
                let prefix = format!("{}{}.", prefix, child.name);
                parse_into(child.layout, sub, &prefix, out)?;
            }
            Some(count) => {
                for i in 0..count {
                    let start = child.offset + i * child.layout.size();
                    let sub = &window[start..start + child.layout.size()];
                    let prefix = format!("{}{}[{}].", prefix, child.name, i);
                    parse_into(child.layout, sub, &prefix, out)?;
                }
            }
        }
    }
    Ok(())
}

/// Decode every declared field of `layout` from `window`.
///
/// The window length must equal the layout size exactly.
pub fn parse(layout: &Layout, window: &[u8]) -> Result<FieldMap> {
    check_window(layout, window)?;
    let mut out = FieldMap::new();
    parse_into(layout, window, "", &mut out)?;
    Ok(out)
}

/// Encode the fields present in `values` into `window`, leaving all other
/// bits of the window exactly as they were.
pub fn build(layout: &Layout, window: &mut [u8], values: &FieldMap) -> Result<()> {
    check_window(layout, window)?;
    for (path, value) in values {
        let (field, base) = layout.resolve(path)?;
        encode_field(&mut window[base..], field, value)?;
    }
    Ok(())
}
