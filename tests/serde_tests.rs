#![cfg(feature = "serde")]

use holidate::{CalendarDate, HolidayKind, HolidayRule, ResolveOptions, Resolved, Resolver};

#[test]
fn test_rule_from_json_row() {
    let row = r#"{
        "id": 7,
        "year": "2015-",
        "special": "{{easter}}-2 days",
        "region": "DE",
        "kind": 3
    }"#;
    let rule: HolidayRule = serde_json::from_str(row).unwrap();
    assert_eq!(rule.id, 7);
    assert_eq!(rule.month, None);
    assert_eq!(rule.except_year, "");
    assert_eq!(rule.kind, HolidayKind::OFFICIAL | HolidayKind::BANK);
    assert_eq!(
        rule.resolve(&Resolver::default(), 2018, 1, 1),
        Ok(Resolved::Date(CalendarDate::new(2018, 3, 30)))
    );
}

#[test]
fn test_options_fill_missing_fields() {
    let opts: ResolveOptions = serde_json::from_str(r#"{"default_day": 24}"#).unwrap();
    assert_eq!(opts, ResolveOptions::new(1, 24));
}

#[test]
fn test_calendar_date_serializes() {
    let json = serde_json::to_value(CalendarDate::new(2018, 3, 30)).unwrap();
    assert_eq!(json["year"], 2018);
    assert_eq!(json["month"], 3);
    assert_eq!(json["day"], 30);
}
