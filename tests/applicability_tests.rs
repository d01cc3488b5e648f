use holidate::applies;
use holidate::year_spec::{YearItem, YearSpec};

#[test]
fn test_empty_spec_applies_every_year() {
    assert!(applies("", "", 2020));
    assert!(applies("", "", 1600));
    assert!(applies("  ", "", 2020));
}

#[test]
fn test_exact_year() {
    assert!(applies("2018", "", 2018));
    assert!(!applies("2018", "", 2019));
}

#[test]
fn test_open_ranges() {
    assert!(!applies("2018-", "", 2017));
    assert!(applies("2018-", "", 2018));
    assert!(applies("2018-", "", 2019));

    assert!(!applies("-2018", "", 2019));
    assert!(applies("-2018", "", 2018));
    assert!(applies("-2018", "", 1900));
}

#[test]
fn test_closed_range() {
    assert!(!applies("2017-2019", "", 2016));
    for year in 2017..=2019 {
        assert!(applies("2017-2019", "", year));
    }
    assert!(!applies("2017-2019", "", 2020));
}

#[test]
fn test_mixed_list() {
    let spec = "2010,2015-2017, 2020";
    for year in [2010, 2015, 2016, 2017, 2020] {
        assert!(applies(spec, "", year), "{year}");
    }
    for year in [2011, 2014, 2018, 2021] {
        assert!(!applies(spec, "", year), "{year}");
    }
}

#[test]
fn test_except_years() {
    assert!(!applies("", "2018", 2018));
    assert!(applies("", "2018", 2019));
    assert!(!applies("2015-", "2017-2019", 2018));
    assert!(applies("2015-", "2017-2019", 2020));
    assert!(!applies("", "2016,2030", 2030));
}

#[test]
fn test_wildcard_never_applies() {
    for year_spec in ["", "2018", "2018-", "-2018", "2017-2019"] {
        assert!(!applies(year_spec, "*", 2018), "{year_spec}");
    }
}

#[test]
fn test_malformed_specs_are_inert() {
    assert!(!applies("20l8", "", 2018));
    assert!(!applies("2018,", "", 2018));
    assert!(!applies("", "abc", 2018));
    // A reversed range names no year
    assert!(!applies("2019-2017", "", 2018));
}

#[test]
fn test_parse_year_spec() {
    assert_eq!(YearSpec::parse(""), YearSpec::Unconstrained);
    assert_eq!(YearSpec::parse("*"), YearSpec::Wildcard);
    assert_eq!(YearSpec::parse("2018"), YearSpec::Exact(2018));
    assert_eq!(YearSpec::parse("2018-"), YearSpec::From(2018));
    assert_eq!(YearSpec::parse("-2018"), YearSpec::Until(2018));
    assert_eq!(
        YearSpec::parse("2015,2017-2019"),
        YearSpec::List(vec![YearItem::Single(2015), YearItem::Range(2017, 2019)])
    );
    assert_eq!(YearSpec::parse("18"), YearSpec::Malformed);
}
