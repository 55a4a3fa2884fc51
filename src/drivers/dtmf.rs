// DTMF autodial code translation.
//
// Stored form is one nibble per digit: 0-9 literal, 0xA-0xD for A-D,
// 0xE for '*', 0xF for '#'. An 0xFF byte is an unprogrammed slot and
// reads back as a space. High bits of stored bytes other than 0xFF are
// don't-care on read.

use super::traits::{DriverError, DriverResult};

/// Translate a DTMF string to its stored byte form, one byte per digit.
pub fn dtmf_to_radio(code: &str, len: usize) -> DriverResult<Vec<u8>> {
    if code.chars().count() > len {
        return Err(DriverError::InvalidData(format!(
            "DTMF code '{}' longer than {} digits",
            code, len
        )));
    }

    let mut out = Vec::with_capacity(len);
    for c in code.chars() {
        let b = match c.to_ascii_uppercase() {
            '0'..='9' => c as u8 - b'0',
            'A' => 0xA,
            'B' => 0xB,
            'C' => 0xC,
            'D' => 0xD,
            '*' => 0xE,
            '#' => 0xF,
            ' ' => 0xFF,
            other => {
                return Err(DriverError::InvalidData(format!(
                    "'{}' is not a DTMF digit",
                    other
                )))
            }
        };
        out.push(b);
    }
    out.resize(len, 0xFF);
    Ok(out)
}

/// Translate stored DTMF bytes back to a string.
pub fn radio_to_dtmf(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b == 0xFF {
                return ' ';
            }
            match b & 0x0F {
                d @ 0..=9 => (b'0' + d) as char,
                0xA => 'A',
                0xB => 'B',
                0xC => 'C',
                0xD => 'D',
                0xE => '*',
                _ => '#',
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_radio() {
        assert_eq!(
            dtmf_to_radio("12*3#A", 8).unwrap(),
            vec![0x1, 0x2, 0xE, 0x3, 0xF, 0xA, 0xFF, 0xFF]
        );
        assert_eq!(dtmf_to_radio("", 4).unwrap(), vec![0xFF; 4]);
        assert!(dtmf_to_radio("12345", 4).is_err());
        assert!(dtmf_to_radio("1!", 4).is_err());
    }

    #[test]
    fn test_from_radio() {
        assert_eq!(
            radio_to_dtmf(&[0x1, 0x2, 0xE, 0x3, 0xF, 0xA, 0xFF, 0xFF]),
            "12*3#A"
        );
        assert_eq!(radio_to_dtmf(&[0xFF; 4]), "    ");
        // High bits are ignored on read
        assert_eq!(radio_to_dtmf(&[0x31, 0x2E]), "1*");
    }

    #[test]
    fn test_roundtrip() {
        for code in ["911", "0123456789ABCD*#", "A1B2", "1 2 "] {
            let stored = dtmf_to_radio(code, code.len()).unwrap();
            assert_eq!(radio_to_dtmf(&stored), *code);
        }
        // Pad bytes decode as spaces, same as an explicit space digit.
        let stored = dtmf_to_radio("911", 5).unwrap();
        assert_eq!(radio_to_dtmf(&stored), "911  ");
    }

    #[test]
    fn test_lowercase_accepted() {
        assert_eq!(dtmf_to_radio("abcd", 4).unwrap(), vec![0xA, 0xB, 0xC, 0xD]);
    }
}
