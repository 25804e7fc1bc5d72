use ferrous_dig_domain::RecordType;
use std::str::FromStr;

#[test]
fn test_codes_round_trip() {
    for code in [1u16, 2, 5, 6, 12, 15, 16, 28, 33, 41, 65, 257] {
        let rt = RecordType::from_u16(code).expect("known code");
        assert_eq!(rt.to_u16(), code);
    }
    assert!(RecordType::from_u16(99).is_none());
}

#[test]
fn test_from_str_is_case_insensitive() {
    assert_eq!(RecordType::from_str("aaaa").unwrap(), RecordType::AAAA);
    assert_eq!(RecordType::from_str("Mx").unwrap(), RecordType::MX);
    assert!(RecordType::from_str("BOGUS").is_err());
}

#[test]
fn test_queryable_subset() {
    let queryable = RecordType::queryable();
    assert_eq!(queryable.len(), 7);
    assert!(queryable.iter().all(RecordType::is_queryable));
    assert!(!RecordType::SOA.is_queryable());
    assert!(!RecordType::SRV.is_queryable());
}

#[test]
fn test_name_for_code() {
    assert_eq!(RecordType::name_for_code(28), "AAAA");
    assert_eq!(RecordType::name_for_code(64), "TYPE64");
}
