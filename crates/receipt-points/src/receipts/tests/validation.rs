use super::common::*;
use crate::config::ValidationConfig;
use crate::receipts::domain::{Item, Receipt};
use crate::receipts::validation::{validate, ReceiptValidator, ValidationIssue};

#[test]
fn well_formed_receipts_pass() {
    for receipt in [target_receipt(), candy_receipt(), record_store_receipt()] {
        assert!(validate(&receipt).is_empty());
    }
}

#[test]
fn missing_retailer_and_items_yield_exactly_two_errors() {
    let receipt = Receipt {
        retailer: String::new(),
        items: Vec::new(),
        ..target_receipt()
    };

    let errors = validate(&receipt);

    assert_eq!(
        errors.issues(),
        &[
            ValidationIssue::FieldMissing("retailer"),
            ValidationIssue::NoItems,
        ]
    );
}

#[test]
fn missing_retailer_and_items_ignore_other_field_states() {
    let receipt = Receipt {
        retailer: String::new(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "13:01".to_string(),
        items: Vec::new(),
        total: "0".to_string(),
    };

    assert_eq!(validate(&receipt).len(), 2);
}

#[test]
fn empty_receipt_reports_every_field_in_order() {
    let errors = validate(&Receipt::default());

    assert_eq!(
        errors.messages(),
        vec![
            "field 'retailer' is required",
            "field 'purchaseDate' is required",
            "field 'purchaseTime' is required",
            "at least one item is required",
            "field 'total' is required",
        ]
    );
}

#[test]
fn a_single_item_can_yield_two_errors() {
    let receipt = Receipt {
        items: vec![Item::new("", ""), Item::new("Dasani", "1.40")],
        ..target_receipt()
    };

    assert_eq!(
        validate(&receipt).issues(),
        &[
            ValidationIssue::ItemFieldMissing("shortDescription"),
            ValidationIssue::ItemFieldMissing("price"),
        ]
    );
}

#[test]
fn malformed_date_and_time_are_rejected() {
    let receipt = Receipt {
        purchase_date: "01/02/2022".to_string(),
        purchase_time: "2pm".to_string(),
        ..target_receipt()
    };

    assert_eq!(
        validate(&receipt).messages(),
        vec![
            "'purchaseDate' format is invalid, expected 'YYYY-MM-DD'",
            "'purchaseTime' format is invalid, expected 'HH:MM'",
        ]
    );
}

#[test]
fn near_miss_dates_are_rejected() {
    for raw in ["2022-1-1", " 2022-01-01", "+2022-01-01", "22-01-01"] {
        let receipt = Receipt {
            purchase_date: raw.to_string(),
            ..target_receipt()
        };

        assert_eq!(
            validate(&receipt).issues(),
            &[ValidationIssue::FieldMalformed {
                field: "purchaseDate",
                expected: "YYYY-MM-DD",
            }],
            "{raw:?} should be malformed"
        );
    }
}

#[test]
fn near_miss_times_are_rejected() {
    for raw in ["14:5", "15: 30", " 15:30", "15:30:00"] {
        let receipt = Receipt {
            purchase_time: raw.to_string(),
            ..target_receipt()
        };

        assert_eq!(
            validate(&receipt).issues(),
            &[ValidationIssue::FieldMalformed {
                field: "purchaseTime",
                expected: "HH:MM",
            }],
            "{raw:?} should be malformed"
        );
    }
}

#[test]
fn single_digit_hour_is_accepted() {
    let receipt = Receipt {
        purchase_time: "8:13".to_string(),
        ..target_receipt()
    };

    assert!(validate(&receipt).is_empty());
}

#[test]
fn oversized_amounts_are_reported_as_out_of_range() {
    let receipt = Receipt {
        items: vec![Item::new("Dasani", "100000000000000000000")],
        total: "1e30".to_string(),
        ..target_receipt()
    };

    assert_eq!(
        validate(&receipt).messages(),
        vec![
            "'price' for item 'Dasani' is outside the supported amount range",
            "'total' is outside the supported amount range",
        ]
    );
}

#[test]
fn relaxed_formats_only_check_presence() {
    let receipt = Receipt {
        purchase_date: "01/02/2022".to_string(),
        purchase_time: "2pm".to_string(),
        ..target_receipt()
    };
    let validator = ReceiptValidator::new(ValidationConfig {
        strict_formats: false,
    });

    assert!(validator.validate(&receipt).is_empty());
}

#[test]
fn unparseable_amounts_fail_validation_in_any_mode() {
    let receipt = Receipt {
        items: vec![Item::new("Dasani", "1.40 USD")],
        total: "one dollar".to_string(),
        ..target_receipt()
    };
    let relaxed = ReceiptValidator::new(ValidationConfig {
        strict_formats: false,
    });

    for errors in [validate(&receipt), relaxed.validate(&receipt)] {
        assert_eq!(
            errors.messages(),
            vec![
                "'price' for item 'Dasani' is not a valid amount",
                "'total' is not a valid amount",
            ]
        );
    }
}

#[test]
fn validation_errors_serialize_as_messages() {
    let errors = validate(&Receipt {
        total: String::new(),
        ..target_receipt()
    });

    assert_eq!(
        serde_json::to_value(&errors).expect("serializes"),
        serde_json::json!(["field 'total' is required"])
    );
}
