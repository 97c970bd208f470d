//! Field lookup and value normalization for loosely structured gateway payloads.
//!
//! Gateways do not agree on field names, so each logical value is read from an ordered list
//! of candidate keys; the first non-empty one wins.

use gc_domain::registration::PaymentStatus;
use serde_json::Value;

/// Country calling code prepended to local numbers.
pub const COUNTRY_CODE: &str = "233";

pub const STATUS_KEYS: [&str; 2] = ["status", "transaction_status"];
pub const REFERENCE_KEYS: [&str; 3] = ["reference", "payment_reference", "transactionId"];
pub const PHONE_KEYS: [&str; 3] = ["accountNumber", "phone", "msisdn"];

const COMPLETED: [&str; 4] = ["success", "completed", "successful", "approved"];
const FAILED: [&str; 4] = ["failed", "failure", "declined", "rejected"];

/// First non-empty string or number found under `keys`, trimmed.
///
/// Non-object payloads and other JSON types yield `None`.
#[must_use]
pub fn first_non_empty(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match payload.get(key)? {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_owned),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Maps a gateway status word onto a registration status. Unknown or missing means `pending`.
#[must_use]
pub fn normalize_status(raw: Option<&str>) -> PaymentStatus {
    let status = raw.unwrap_or_default().trim().to_lowercase();
    if COMPLETED.contains(&status.as_str()) {
        PaymentStatus::Completed
    } else if FAILED.contains(&status.as_str()) {
        PaymentStatus::Failed
    } else {
        PaymentStatus::Pending
    }
}

/// Reads and normalizes the status of a callback payload.
#[must_use]
pub fn payload_status(payload: &Value) -> PaymentStatus {
    normalize_status(first_non_empty(payload, &STATUS_KEYS).as_deref())
}

/// Canonical international form of a phone number, digits only.
///
/// `0241234567` and `241234567` both become `233241234567`. Returns `None` when the input
/// holds no digits.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    Some(if digits.starts_with(COUNTRY_CODE) {
        digits
    } else if let Some(local) = digits.strip_prefix('0') {
        format!("{COUNTRY_CODE}{local}")
    } else {
        format!("{COUNTRY_CODE}{digits}")
    })
}

/// Formats a stored phone may take: as received, with `233` swapped for `0`, and with a
/// leading `0` swapped for `233`. Duplicates are dropped, order is kept.
#[must_use]
pub fn phone_variants(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let candidates = [
        Some(raw.to_owned()),
        raw.strip_prefix(COUNTRY_CODE).map(|rest| format!("0{rest}")),
        raw.strip_prefix('0').map(|rest| format!("{COUNTRY_CODE}{rest}")),
    ];

    let mut variants = Vec::with_capacity(candidates.len());
    for candidate in candidates.into_iter().flatten() {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// First six characters followed by a mask, for logs.
#[must_use]
pub fn mask_account(account: &str) -> String {
    let visible: String = account.chars().take(6).collect();
    format!("{visible}****")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_synonyms() {
        for word in ["success", "Completed", " SUCCESSFUL ", "approved"] {
            assert_eq!(normalize_status(Some(word)), PaymentStatus::Completed, "{word}");
        }
        for word in ["failed", "FAILURE", "declined", "Rejected"] {
            assert_eq!(normalize_status(Some(word)), PaymentStatus::Failed, "{word}");
        }
        for word in ["pending", "processing", ""] {
            assert_eq!(normalize_status(Some(word)), PaymentStatus::Pending, "{word}");
        }
        assert_eq!(normalize_status(None), PaymentStatus::Pending);
    }

    #[test]
    fn status_falls_back_to_transaction_status() {
        assert_eq!(payload_status(&json!({"transaction_status": "declined"})), PaymentStatus::Failed);
        assert_eq!(
            payload_status(&json!({"status": "", "transaction_status": "approved"})),
            PaymentStatus::Completed
        );
        assert_eq!(payload_status(&json!(["success"])), PaymentStatus::Pending);
    }

    #[test]
    fn candidate_keys_in_priority_order() {
        let payload = json!({
            "reference": "  ",
            "payment_reference": null,
            "transactionId": 98_765,
            "msisdn": "233241234567",
            "phone": "0241234567",
        });
        assert_eq!(first_non_empty(&payload, &REFERENCE_KEYS).as_deref(), Some("98765"));
        assert_eq!(first_non_empty(&payload, &PHONE_KEYS).as_deref(), Some("0241234567"));
        assert_eq!(first_non_empty(&json!({}), &PHONE_KEYS), None);
    }

    #[test]
    fn phone_normalization() {
        for input in ["0241234567", "241234567", "233241234567", "+233 24 123 4567"] {
            assert_eq!(normalize_phone(input).as_deref(), Some("233241234567"), "{input}");
        }
        assert_eq!(normalize_phone("n/a"), None);
    }

    #[test]
    fn phone_variant_sets() {
        assert_eq!(phone_variants("233241234567"), ["233241234567", "0241234567"]);
        assert_eq!(phone_variants("0241234567"), ["0241234567", "233241234567"]);
        assert_eq!(phone_variants("241234567"), ["241234567"]);
    }

    #[test]
    fn masking() {
        assert_eq!(mask_account("0241234567"), "024123****");
        assert_eq!(mask_account("024"), "024****");
    }
}
