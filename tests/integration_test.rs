//! End-to-end tests of the public sanitizer API.

use fieldsan::{
    FieldRecord, Gender, GenderCodes, Operation, SanitizeError, Sanitizer, SanitizerConfig,
};

mod common;
use common::*;

mod phone {
    use super::*;

    #[test]
    fn test_fixture_table() {
        let mut sanitizer = Sanitizer::new();
        for &(input, country, expected) in PHONE_CASES {
            assert_sanitized(sanitizer.phone(input, Some(country)), input, expected);
            assert_eq!(sanitizer.last_failed(), Some(false));
        }
    }

    #[test]
    fn test_country_code_is_case_insensitive() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(sanitizer.phone("21234567", Some("NZ")), "21234567", "021234567");
        assert_sanitized(sanitizer.phone("412345678", Some(" Au ")), "412345678", "0412345678");
    }

    #[test]
    fn test_whitespace_stripped_before_numeric_rules() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(
            sanitizer.phone(" 4 1 2\t345\n678 ", Some("au")),
            "spaced",
            "0412345678",
        );
    }

    #[test]
    fn test_ten_digit_au_unaffected_by_nine_digit_rule() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(sanitizer.phone("1412345678", Some("au")), "1412345678", "1412345678");
    }

    #[test]
    fn test_default_country_from_config() {
        let config = SanitizerConfig::default().with_default_country("nz");
        let mut sanitizer = Sanitizer::with_config(config);
        assert_sanitized(sanitizer.phone("21234567", None), "21234567", "021234567");
    }

    #[test]
    fn test_unsupported_country_is_permissive_by_default() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(sanitizer.phone("555 0100", Some("us")), "555 0100", "555 0100");
        assert_eq!(sanitizer.last_failed(), Some(false));
        assert_eq!(sanitizer.session().rule_set().map(|r| r.len()), Some(0));
    }

    #[test]
    fn test_unsupported_country_strict() {
        let config = SanitizerConfig::default().with_strict_country(true);
        let mut sanitizer = Sanitizer::with_config(config);
        let result = sanitizer.phone("555 0100", Some("us"));
        let err = assert_failed(&sanitizer, result, "555 0100");
        assert!(matches!(err, SanitizeError::UnsupportedCountry { ref country } if country == "us"));
    }

    #[test]
    fn test_time_and_zone_formats() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(
            sanitizer.date("1/2/2003", Some("%Y-%m-%d %H:%M")),
            "1/2/2003",
            "2003-02-01 00:00",
        );

        let result = sanitizer.date("1/2/2003", Some("%Y-%m-%d %z"));
        let err = assert_failed(&sanitizer, result, "1/2/2003");
        assert!(matches!(err, SanitizeError::InvalidInput { .. }));

        let out = sanitizer.invoke_named("date", &["1/2/2003", "%H%M%S"]).unwrap();
        assert_eq!(out, "000000");
    }

    #[test]
    fn test_year_range_boundary() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(sanitizer.date("31/12/9999", None), "31/12/9999", "9999-12-31");
        let result = sanitizer.date("25/12/10000", None);
        assert_failed(&sanitizer, result, "25/12/10000");
    }

    #[test]
    fn test_idempotent() {
        let mut sanitizer = Sanitizer::new();
        for &(input, country, _) in PHONE_CASES {
            assert_idempotent(|v| sanitizer.phone(v, Some(country)), input);
        }
    }
}

mod records {
    use super::*;

    #[test]
    fn test_record_country_overrides_argument() {
        let mut sanitizer = Sanitizer::new();
        let record = FieldRecord {
            value: "21234567".to_string(),
            country: Some("NZ".to_string()),
            ..Default::default()
        };
        assert_sanitized(sanitizer.phone(record, Some("au")), "21234567", "021234567");
        assert_eq!(sanitizer.session().country(), Some("nz"));
    }

    #[test]
    fn test_custom_rules_replace_country_table() {
        let mut sanitizer = Sanitizer::new();
        let record = FieldRecord {
            value: "412 345 678".to_string(),
            country: Some("au".to_string()),
            search_pattern: Some(vec![r"\s+".to_string()]),
            replace_pattern: Some(vec!["-".to_string()]),
            kind: Some("mobile".to_string()),
        };
        assert_sanitized(sanitizer.phone(record, None), "412 345 678", "412-345-678");
        assert_eq!(sanitizer.session().tag(), Some("mobile"));
    }

    #[test]
    fn test_custom_rule_bad_backreference_fails() {
        let mut sanitizer = Sanitizer::new();
        let record = FieldRecord {
            value: "1234".to_string(),
            search_pattern: Some(vec![r"^(\d+)$".to_string()]),
            replace_pattern: Some(vec!["0$2".to_string()]),
            ..Default::default()
        };
        let result = sanitizer.postal(record, None);
        let err = assert_failed(&sanitizer, result, "1234");
        assert!(err.is_sanitization_failure());
    }

    #[test]
    fn test_custom_rule_needs_both_sequences() {
        let mut sanitizer = Sanitizer::new();
        let record = FieldRecord {
            value: "1234".to_string(),
            search_pattern: Some(vec![r"\d".to_string()]),
            ..Default::default()
        };
        let result = sanitizer.postal(record, None);
        assert_failed(&sanitizer, result, "1234");
    }
}

mod postal {
    use super::*;

    #[test]
    fn test_fixture_table() {
        let mut sanitizer = Sanitizer::new();
        for &(input, country, expected) in POSTAL_CASES {
            assert_sanitized(sanitizer.postal(input, Some(country)), input, expected);
        }
    }

    #[test]
    fn test_idempotent() {
        let mut sanitizer = Sanitizer::new();
        for &(input, country, _) in POSTAL_CASES {
            assert_idempotent(|v| sanitizer.postal(v, Some(country)), input);
        }
    }
}

mod date {
    use super::*;

    #[test]
    fn test_day_first_then_year_first() {
        let mut sanitizer = Sanitizer::new();
        assert_sanitized(sanitizer.date("25/12/2020", None), "25/12/2020", "2020-12-25");
        assert_sanitized(sanitizer.date("2020/12/25", None), "2020/12/25", "2020-12-25");
        assert_sanitized(sanitizer.date("25.12.2020", None), "25.12.2020", "2020-12-25");
    }

    #[test]
    fn test_neither_reading_valid() {
        let mut sanitizer = Sanitizer::new();
        let result = sanitizer.date("13/13/2020", None);
        let err = assert_failed(&sanitizer, result, "13/13/2020");
        assert!(matches!(err, SanitizeError::UnparsableDate { .. }));
    }

    #[test]
    fn test_no_three_part_split() {
        let mut sanitizer = Sanitizer::new();
        let result = sanitizer.date("25122020", None);
        assert_failed(&sanitizer, result, "25122020");
    }

    #[test]
    fn test_output_format() {
        let config = SanitizerConfig::default().with_date_format("%d/%m/%Y");
        let mut sanitizer = Sanitizer::with_config(config);
        assert_sanitized(sanitizer.date("2021-3-5", None), "2021-3-5", "05/03/2021");
        assert_sanitized(
            sanitizer.date("2021-3-5", Some("%Y%m%d")),
            "2021-3-5",
            "20210305",
        );
    }

    #[test]
    fn test_idempotent() {
        let mut sanitizer = Sanitizer::new();
        assert_idempotent(|v| sanitizer.date(v, None), "1/2/1999");
    }
}

mod email {
    use super::*;

    #[test]
    fn test_invalid_dropped_order_preserved() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(
            sanitizer.email("a@x.com,not-an-email;b@y.com"),
            "a@x.com;b@y.com"
        );
        assert_eq!(sanitizer.last_failed(), Some(false));
    }

    #[test]
    fn test_empty_result_is_not_failure() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.email("junk, more junk"), "");
        assert_eq!(sanitizer.last_failed(), Some(false));
    }

    #[test]
    fn test_idempotent() {
        let mut sanitizer = Sanitizer::new();
        let once = sanitizer.email("b@y.com, a@x.com;bad");
        assert_eq!(sanitizer.email(&once), once);
    }

    #[test]
    fn test_injected_validator() {
        let mut sanitizer =
            Sanitizer::new().with_email_validator(Box::new(|a: &str| a.ends_with(".org")));
        assert_eq!(sanitizer.email("a@x.com;b@y.org"), "b@y.org");
    }
}

mod gender {
    use super::*;

    #[test]
    fn test_labels() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.gender("Female"), sanitizer.gender("f"));
        assert_eq!(sanitizer.gender("Female"), "F");
        assert_eq!(sanitizer.gender(" MALE "), "M");
        assert_eq!(sanitizer.gender("unknown"), "U");
        assert_eq!(sanitizer.gender_of("m"), Gender::Male);
    }

    #[test]
    fn test_configured_codes() {
        let codes = GenderCodes {
            female: "2".to_string(),
            male: "1".to_string(),
            default: "0".to_string(),
        };
        let config = SanitizerConfig::default().with_gender_codes(codes);
        let mut sanitizer = Sanitizer::with_config(config);
        assert_eq!(sanitizer.gender("female"), "2");
        assert_eq!(sanitizer.gender("x"), "0");
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn test_every_operation_by_name() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.invoke_named("phone", &["412345678"]).unwrap(), "0412345678");
        assert_eq!(sanitizer.invoke_named("postal", &["7", "nz"]).unwrap(), "0007");
        assert_eq!(sanitizer.invoke_named("date", &["2020/12/25"]).unwrap(), "2020-12-25");
        assert_eq!(sanitizer.invoke_named("email", &["a@x.com"]).unwrap(), "a@x.com");
        assert_eq!(sanitizer.invoke_named("GENDER", &["f"]).unwrap(), "F");
    }

    #[test]
    fn test_session_kind_follows_dispatch() {
        let mut sanitizer = Sanitizer::new();
        sanitizer.invoke(Operation::Postal, &["9"]).unwrap();
        assert_eq!(sanitizer.session().kind(), Some(Operation::Postal));
    }

    #[test]
    fn test_unknown_operation() {
        let mut sanitizer = Sanitizer::new();
        let err = sanitizer.invoke_named("fax", &["1"]).unwrap_err();
        assert!(matches!(err, SanitizeError::UnknownOperation { .. }));
    }
}

mod session {
    use super::*;

    #[test]
    fn test_state_never_leaks_between_calls() {
        let mut sanitizer = Sanitizer::new();
        sanitizer.phone("21234567", Some("nz")).unwrap();
        assert_eq!(sanitizer.session().country(), Some("nz"));

        sanitizer.gender("f");
        let session = sanitizer.session();
        assert_eq!(session.kind(), Some(Operation::Gender));
        assert_eq!(session.country(), None);
        assert!(session.rule_set().is_none());
        assert_eq!(session.error_log(), &[false]);
    }

    #[test]
    fn test_independent_sanitizers_across_threads() {
        let handles: Vec<_> = PHONE_CASES
            .iter()
            .map(|&(input, country, expected)| {
                std::thread::spawn(move || {
                    let mut sanitizer = Sanitizer::new();
                    assert_eq!(sanitizer.phone(input, Some(country)).unwrap(), expected);
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }
    }
}
