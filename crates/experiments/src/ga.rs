//! Legacy Google Analytics Website Optimizer cookie formats.
//!
//! The consumer of these cookies is a retired analytics product whose
//! trackers are still deployed, so the formats here are frozen: the 28-bit
//! domain hash, the `$0:` separator token and the fixed `8035200` lifetime
//! literal are reproduced bit-for-bit, oddities included.

/// Variation cookie name.
pub const UTMX_COOKIE: &str = "__utmx";

/// Experiment-participation cookie name.
pub const UTMXX_COOKIE: &str = "__utmxx";

/// Both legacy cookies are valid for 60 minutes.
pub const EXPERIMENT_COOKIE_MINUTES: u32 = 60;

/// Lifetime field embedded in the `__utmxx` value (93 days in seconds;
/// the legacy trackers expect this exact literal).
pub const UTMXX_LIFETIME_SECS: u64 = 8_035_200;

/// Legacy domain hash. `None` or an empty domain hashes to 1; otherwise
/// the accumulator starts at 0 and folds the domain's UTF-16 units from
/// last to first.
pub fn generate_hash(domain: Option<&str>) -> u32 {
    let Some(domain) = domain.filter(|d| !d.is_empty()) else {
        return 1;
    };

    let units: Vec<u16> = domain.encode_utf16().collect();
    let mut hash: u32 = 0;
    for &unit in units.iter().rev() {
        let current = u32::from(unit);
        hash = ((hash << 6) & 0xFFF_FFFF) + current + (current << 14);
        let left_most7 = hash & 0xFE0_0000;
        if left_most7 != 0 {
            hash ^= left_most7 >> 21;
        }
    }
    hash
}

/// Value for the `__utmx` variation cookie:
/// `[DOMAIN_HASH].[EXPERIMENT_ID]$0:[VARIATION]`
/// e.g. `159991919.ft-5xaLPSturFXCPgoFrKg$0:1`
pub fn build_utmx_value(domain: Option<&str>, experiment_id: &str, variation_id: &str) -> String {
    format!(
        "{}.{}$0:{}",
        generate_hash(domain),
        experiment_id,
        variation_id
    )
}

/// Value for the `__utmxx` experiment-participation cookie:
/// `[DOMAIN_HASH].[EXPERIMENT_ID]$0:[TIMESTAMP]:8035200`
/// e.g. `159991919.ft-5xaLPSturFXCPgoFrKg$0:1380888455:8035200`
pub fn build_utmxx_value(domain: Option<&str>, experiment_id: &str, timestamp_secs: i64) -> String {
    format!(
        "{}.{}$0:{}:{}",
        generate_hash(domain),
        experiment_id,
        timestamp_secs,
        UTMXX_LIFETIME_SECS
    )
}
