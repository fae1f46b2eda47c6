/// The country calling code that replaces a leading `0` in payer phone numbers.
pub const KE_DIALING_PREFIX: &str = "254";

/// Normalize a payer phone number for the provider: a leading `0` is replaced with the `254` dialing prefix.
/// Anything else is passed through unchanged; the provider does its own validation.
pub fn normalize_msisdn(phone: &str) -> String {
    match phone.strip_prefix('0') {
        Some(rest) => format!("{KE_DIALING_PREFIX}{rest}"),
        None => phone.to_string(),
    }
}

/// The provider addresses merchants by the last 3 characters of the full merchant identifier.
pub fn short_merchant_id(merchant_id: &str) -> String {
    let len = merchant_id.chars().count();
    merchant_id.chars().skip(len.saturating_sub(3)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn msisdn_normalization() {
        assert_eq!(normalize_msisdn("0712345678"), "254712345678");
        assert_eq!(normalize_msisdn("254712345678"), "254712345678");
        assert_eq!(normalize_msisdn("+254712345678"), "+254712345678");
        assert_eq!(normalize_msisdn(""), "");
    }

    #[test]
    fn merchant_id_shortening() {
        assert_eq!(short_merchant_id("MER0042"), "042");
        assert_eq!(short_merchant_id("42"), "42");
        assert_eq!(short_merchant_id(""), "");
    }
}
