use chrono::Utc;
use rand::RngExt;

/// Lowercase base36 digits.
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Charset for one-time credentials (62 alphanumerics).
const CREDENTIAL_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const TEMP_CREDENTIAL_LEN: usize = 8;

const ID_RANDOM_LEN: usize = 9;

pub const REQUEST_ID_PREFIX: &str = "req_";
pub const USER_ID_PREFIX: &str = "user_";
pub const CONTACT_ID_PREFIX: &str = "contact_";

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

/// `<prefix><base36 millis><9 random base36>`.
pub fn generate_id(prefix: &str) -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let mut rng = rand::rng();
    let suffix: String = (0..ID_RANDOM_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}{}{suffix}", to_base36(millis))
}

/// Eight characters drawn uniformly from the 62-character alphanumeric alphabet.
pub fn generate_temp_credential() -> String {
    let mut rng = rand::rng();
    (0..TEMP_CREDENTIAL_LEN)
        .map(|_| CREDENTIAL_CHARSET[rng.random_range(0..CREDENTIAL_CHARSET.len())] as char)
        .collect()
}
