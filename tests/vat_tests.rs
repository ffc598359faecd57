use ustid::vat::*;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_removes_interior_spaces() {
    assert_eq!(normalize("DE 302 210 417"), "DE302210417");
}

#[test]
fn normalize_uppercases_prefix() {
    assert_eq!(normalize("de302210417"), "DE302210417");
}

#[test]
fn normalize_tabs_and_newlines() {
    assert_eq!(normalize("\tDE302210417\r\n"), "DE302210417");
}

#[test]
fn normalize_empty() {
    assert_eq!(normalize("   "), "");
}

// ---------------------------------------------------------------------------
// Format validation
// ---------------------------------------------------------------------------

#[test]
fn de_valid() {
    assert!(is_german_vat("DE302210417"));
}

#[test]
fn bare_number_valid() {
    assert!(is_german_vat("302210417"));
}

#[test]
fn non_german_prefix_invalid() {
    assert!(!is_german_vat("FM402210417"));
    assert!(!is_german_vat("NL302210417"));
    assert!(!is_german_vat("AT302210417"));
}

#[test]
fn lowercase_prefix_accepted_without_normalizing() {
    assert!(is_german_vat("de302210417"));
}

#[test]
fn too_short() {
    assert!(!is_german_vat("DE30221041"));
    assert!(!is_german_vat("30221041"));
}

#[test]
fn too_long() {
    assert!(!is_german_vat("DE3022104170"));
    assert!(!is_german_vat("3022104170"));
}

#[test]
fn separators_rejected() {
    assert!(!is_german_vat("302.210.41"));
    assert!(!is_german_vat("DE302-10417"));
}

#[test]
fn sign_rejected() {
    assert!(!is_german_vat("+12345678"));
    assert!(!is_german_vat("DE+12345678"));
}

#[test]
fn unnormalized_input_rejected() {
    // The validator expects normalized input.
    assert!(!is_german_vat("DE 302210417"));
}

// ---------------------------------------------------------------------------
// Cache key derivation
// ---------------------------------------------------------------------------

#[test]
fn key_strips_prefix() {
    assert_eq!(cache_key("DE302210417"), "302210417");
}

#[test]
fn key_empty_for_bare_number() {
    // Bare numbers skip the cache entirely.
    assert_eq!(cache_key("302210417"), "");
    assert_eq!(numeric_body("302210417"), "302210417");
}

#[test]
fn key_empty_for_garbage() {
    assert_eq!(cache_key("HELLO"), "");
    assert_eq!(numeric_body("HELLO"), "");
}

// ---------------------------------------------------------------------------
// VatId
// ---------------------------------------------------------------------------

#[test]
fn vat_id_round_trip_display() {
    let id = VatId::parse(" de 302 210 417 ").unwrap();
    assert_eq!(id.to_string(), "DE302210417");
    assert_eq!(id.number(), "302210417");
}

#[test]
fn vat_id_rejects_foreign() {
    let err = VatId::parse("fm402210417").unwrap_err();
    assert_eq!(err.value, "FM402210417");
}

#[test]
fn vat_id_equality_ignores_formatting() {
    assert_eq!(
        VatId::parse("DE302210417").unwrap(),
        VatId::parse("302 210 417").unwrap()
    );
}

#[test]
fn constants() {
    assert_eq!(GERMAN_COUNTRY_CODE, "DE");
    assert_eq!(VAT_NUMBER_LEN, 9);
    assert_eq!(PREFIXED_VAT_ID_LEN, 11);
}
