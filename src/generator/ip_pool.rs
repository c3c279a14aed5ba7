// file: src/generator/ip_pool.rs
// description: pool of returning visitor addresses mixing known companies, private and random public hosts

use crate::resolver::is_private_address;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Public addresses owned by well-known companies, so lookups resolve to
/// recognizable organizations.
pub const COMPANY_ADDRESSES: &[&str] = &[
    // Google
    "8.8.8.8",
    "8.8.4.4",
    "142.250.74.78",
    "142.250.191.78",
    // Microsoft
    "40.76.4.15",
    "40.77.226.250",
    "40.112.72.205",
    // Amazon
    "52.95.110.1",
    "54.239.28.85",
    "52.94.225.248",
    // Apple
    "17.172.224.47",
    "17.142.160.59",
    // Meta
    "31.13.71.36",
    "157.240.1.35",
];

const PUBLIC_FIRST_OCTETS: &[u8] = &[8, 17, 31, 40, 52, 54, 142, 157, 185, 199, 205, 216];

/// Build `size` distinct addresses: the company addresses, `private_count`
/// private addresses spread over the three private ranges, and random public
/// addresses for the remainder. The company list is truncated if `size` is
/// too small to hold it alongside the private addresses.
pub fn generate_ip_pool<R: Rng + ?Sized>(rng: &mut R, size: usize, private_count: usize) -> Vec<String> {
    let private_count = private_count.min(size);
    let mut pool: Vec<String> = Vec::with_capacity(size);
    let mut seen: HashSet<String> = HashSet::with_capacity(size);

    let mut push = |address: String, pool: &mut Vec<String>| {
        if seen.insert(address.clone()) {
            pool.push(address);
        }
    };

    for address in COMPANY_ADDRESSES.iter().take(size - private_count) {
        push(address.to_string(), &mut pool);
    }

    let private_target = pool.len() + private_count;
    let mut range = 0usize;
    while pool.len() < private_target {
        push(random_private_address(rng, range % 3), &mut pool);
        range += 1;
    }

    while pool.len() < size {
        let address = random_public_address(rng);
        if is_private_address(&address) {
            continue;
        }
        push(address, &mut pool);
    }

    pool
}

fn random_private_address<R: Rng + ?Sized>(rng: &mut R, range: usize) -> String {
    match range {
        0 => format!(
            "10.{}.{}.{}",
            rng.gen_range(0..=255u8),
            rng.gen_range(0..=255u8),
            rng.gen_range(1..=254u8)
        ),
        1 => format!(
            "192.168.{}.{}",
            rng.gen_range(0..=255u8),
            rng.gen_range(1..=254u8)
        ),
        _ => format!(
            "172.{}.{}.{}",
            rng.gen_range(16..=31u8),
            rng.gen_range(0..=255u8),
            rng.gen_range(1..=254u8)
        ),
    }
}

fn random_public_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = PUBLIC_FIRST_OCTETS.choose(rng).copied().unwrap_or(8);
    format!(
        "{}.{}.{}.{}",
        first,
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8),
        rng.gen_range(1..=254u8)
    )
}
