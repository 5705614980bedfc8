use crate::error::ExtractError;

/// Number of hex characters in an address after the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Finds holder addresses in free-form balance sheet lines.
pub trait AddressMatcher {
    /// Leftmost address in `line`, returned exactly as written.
    fn find_first<'a>(&self, line: &'a str) -> Option<&'a str>;
}

/// Matches the first `0x` followed by 40 hex characters, whatever surrounds
/// it. CSV columns from an explorer export do not get in the way.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressMatcher;

impl AddressMatcher for HexAddressMatcher {
    fn find_first<'a>(&self, line: &'a str) -> Option<&'a str> {
        scan(line, false)
    }
}

/// Like [`HexAddressMatcher`], but a hex run longer than 40 characters
/// (a transaction hash, for example) is not taken as an address.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneAddressMatcher;

impl AddressMatcher for StandaloneAddressMatcher {
    fn find_first<'a>(&self, line: &'a str) -> Option<&'a str> {
        scan(line, true)
    }
}

fn scan(line: &str, standalone: bool) -> Option<&str> {
    let bytes = line.as_bytes();
    let full_len = 2 + ADDRESS_HEX_LEN;

    let mut start = 0;
    while start + full_len <= bytes.len() {
        if bytes[start] == b'0' && bytes[start + 1] == b'x' {
            let hex = &bytes[start + 2..start + full_len];
            let followed_by_hex = standalone
                && bytes
                    .get(start + full_len)
                    .is_some_and(|b| b.is_ascii_hexdigit());

            if hex.iter().all(u8::is_ascii_hexdigit) && !followed_by_hex {
                // All matched bytes are ASCII, so both ends are char boundaries.
                return Some(&line[start..start + full_len]);
            }
        }
        start += 1;
    }

    None
}

/// Extract the holder address of a balance sheet line.
pub fn extract_address<'a, M: AddressMatcher + ?Sized>(
    matcher: &M,
    line: &'a str,
) -> Result<&'a str, ExtractError> {
    matcher.find_first(line).ok_or(ExtractError::NoAddressFound)
}
