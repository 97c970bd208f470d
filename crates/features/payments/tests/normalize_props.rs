use gc_domain::registration::PaymentStatus;
use gc_payments::normalize::{normalize_phone, normalize_status, phone_variants};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalized_phones_are_international_digits(raw in "[0-9 +()-]{0,16}") {
        match normalize_phone(&raw) {
            Some(phone) => {
                prop_assert!(phone.starts_with("233"));
                prop_assert!(phone.chars().all(|c| c.is_ascii_digit()));
                prop_assert_eq!(normalize_phone(&phone), Some(phone.clone()));
            },
            None => prop_assert!(!raw.chars().any(|c| c.is_ascii_digit())),
        }
    }

    #[test]
    fn local_and_international_forms_agree(subscriber in "[1-9][0-9]{8}") {
        // A bare subscriber number that itself begins with the country code is ambiguous.
        prop_assume!(!subscriber.starts_with("233"));
        let international = format!("233{subscriber}");
        prop_assert_eq!(normalize_phone(&format!("0{subscriber}")), Some(international.clone()));
        prop_assert_eq!(normalize_phone(&subscriber), Some(international.clone()));
        prop_assert_eq!(normalize_phone(&international), Some(international));
    }

    #[test]
    fn variants_cover_both_stored_formats(subscriber in "[1-9][0-9]{8}") {
        let local = format!("0{subscriber}");
        let international = format!("233{subscriber}");
        for received in [&local, &international] {
            let variants = phone_variants(received);
            prop_assert_eq!(&variants[0], received);
            prop_assert!(variants.contains(&local));
            prop_assert!(variants.contains(&international));
        }
    }

    #[test]
    fn status_words_are_case_insensitive(
        word in prop::sample::select(vec!["success", "approved", "declined", "rejected"]),
        upper in any::<bool>(),
    ) {
        let input = if upper { word.to_uppercase() } else { word.to_owned() };
        prop_assert_eq!(normalize_status(Some(&input)), normalize_status(Some(word)));
    }

    #[test]
    fn unknown_words_stay_pending(word in "[a-z]{1,12}") {
        let known = [
            "success", "completed", "successful", "approved",
            "failed", "failure", "declined", "rejected",
        ];
        prop_assume!(!known.contains(&word.as_str()));
        prop_assert_eq!(normalize_status(Some(&word)), PaymentStatus::Pending);
    }
}
