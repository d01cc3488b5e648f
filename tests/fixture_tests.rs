//! Table-driven rule resolution tests
//!
//! Each case in `fixtures/rules.json` is a rule record, a year and the
//! expected ISO date, or `null` if the rule does not apply in that year.

use holidate::{HolidayRule, Resolved, Resolver};
use serde_json::Value;

#[derive(Debug)]
struct TestCase {
    rule: HolidayRule,
    year: i32,
    expected: Option<String>,
}

fn text(rule: &Value, key: &str) -> String {
    rule.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn number(rule: &Value, key: &str) -> Option<u32> {
    rule.get(key).and_then(Value::as_u64).map(|n| n as u32)
}

fn load_test_cases() -> Vec<TestCase> {
    let json_data = include_str!("fixtures/rules.json");
    let tests: Vec<Value> = serde_json::from_str(json_data).expect("Failed to parse rules.json");

    tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let rule = &test["rule"];
            TestCase {
                rule: HolidayRule {
                    id: i as u32 + 1,
                    year: text(rule, "year"),
                    except_year: text(rule, "except_year"),
                    month: number(rule, "month"),
                    day: number(rule, "day"),
                    special: text(rule, "special"),
                    ..Default::default()
                },
                year: test["year"].as_i64().expect("year") as i32,
                expected: test["expected"].as_str().map(str::to_string),
            }
        })
        .collect()
}

#[test]
fn test_rule_fixtures() {
    let test_cases = load_test_cases();
    assert!(!test_cases.is_empty());

    let resolver = Resolver::default();
    let mut failures = Vec::new();

    for test in &test_cases {
        let resolved = test
            .rule
            .resolve(&resolver, test.year, 1, 1)
            .expect("fixtures only use registered extensions");
        let got = match resolved {
            Resolved::Date(date) => Some(date.to_string()),
            Resolved::NotApplicable => None,
        };
        if got != test.expected {
            failures.push(format!(
                "rule #{} (year='{}', except='{}', special='{}') in {}: expected {:?}, got {:?}",
                test.rule.id,
                test.rule.year,
                test.rule.except_year,
                test.rule.special,
                test.year,
                test.expected,
                got
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixtures failed:\n{}",
        failures.len(),
        test_cases.len(),
        failures.join("\n")
    );
}
