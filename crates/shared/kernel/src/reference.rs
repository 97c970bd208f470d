//! Payment reference minting.
//!
//! Format: `GC-<unix-millis>-<6 chars of 0-9A-Z>`. References minted by this process within
//! the same millisecond never repeat.

use chrono::Utc;
use gc_domain::constants::REFERENCE_PREFIX;
use parking_lot::Mutex;
use std::collections::HashSet;

const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Suffixes handed out during the current millisecond.
static ISSUED: Mutex<(i64, Option<HashSet<String>>)> = Mutex::new((0, None));

/// Mints a fresh payment reference using the current clock.
#[must_use]
pub fn payment_reference() -> String {
    payment_reference_at(Utc::now().timestamp_millis())
}

/// Mints a reference for a given timestamp.
#[must_use]
pub fn payment_reference_at(millis: i64) -> String {
    let mut issued = ISSUED.lock();
    if issued.0 != millis {
        *issued = (millis, Some(HashSet::new()));
    }
    let seen = issued.1.get_or_insert_with(HashSet::new);

    loop {
        let suffix = nanoid::nanoid!(SUFFIX_LEN, &SUFFIX_ALPHABET);
        if seen.insert(suffix.clone()) {
            return format!("{REFERENCE_PREFIX}-{millis}-{suffix}");
        }
    }
}

/// Checks the `GC-<digits>-<6 x [0-9A-Z]>` shape.
#[must_use]
pub fn is_payment_reference(candidate: &str) -> bool {
    let mut parts = candidate.splitn(3, '-');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == REFERENCE_PREFIX
        && !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}
