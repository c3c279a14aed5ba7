// file: src/resolver/address.rs
// description: private network address classification
// reference: rfc 1918 address allocation

use std::net::Ipv4Addr;

/// Strict dotted-quad parse: exactly four dot-separated decimal octets.
fn parse_octets(address: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = address.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(octets)
}

/// True for 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16. Anything that is not
/// a well-formed IPv4 address is treated as external.
pub fn is_private_address(address: &str) -> bool {
    parse_octets(address)
        .map(|octets| Ipv4Addr::from(octets).is_private())
        .unwrap_or(false)
}
