//! Pattern-based description strings.

use crate::generator::MAX_DESCRIPTION_LEN;
use rand::seq::IndexedRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "niaj", "olivia", "peggy", "rupert", "sybil", "trent", "victor", "walter", "yvonne",
];

const LAST_NAMES: &[&str] = &[
    "anderson", "brown", "clark", "davis", "evans", "fischer", "garcia", "harris", "ito",
    "johnson", "kowalski", "lopez", "miller", "nguyen", "okafor", "patel", "quinn", "rossi",
    "smith", "tanaka",
];

const WORDS: &[&str] = &[
    "amber", "basalt", "cinder", "delta", "ember", "fjord", "granite", "harbor", "island",
    "juniper", "kelp", "lagoon", "meadow", "nimbus", "orchid", "prairie", "quartz", "ridge",
    "summit", "tundra",
];

const DOMAINS: &[&str] = &[
    "example.com",
    "example.net",
    "example.org",
    "mail.test",
    "inbox.test",
];

/// Expand every placeholder in `pattern`.
///
/// Unknown placeholders are left untouched.
pub fn expand_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    for (placeholder, pool) in [
        ("{first}", FIRST_NAMES),
        ("{last}", LAST_NAMES),
        ("{word}", WORDS),
        ("{domain}", DOMAINS),
    ] {
        while result.contains(placeholder) {
            let pick = pool.choose(rng).copied().unwrap_or_default();
            result = result.replacen(placeholder, pick, 1);
        }
    }

    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let number = random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], number, &result[end + 1..]);
                search_from = start + number.len();
            }
            Err(_) => search_from = end + 1,
        }
    }

    result
}

/// A random number with exactly `digits` digits and no leading zero.
///
/// `digits` is capped at [`MAX_DESCRIPTION_LEN`]; anything longer would be
/// cut from the description anyway.
fn random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    let digits = digits.min(MAX_DESCRIPTION_LEN);
    let mut result = String::with_capacity(digits);
    for i in 0..digits {
        let low = if i == 0 { 1 } else { 0 };
        let digit: u8 = rng.random_range(low..10);
        result.push(char::from(b'0' + digit));
    }
    result
}
