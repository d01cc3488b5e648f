use holidate::ast::{Fragment, Modifier, Placeholder};
use holidate::{ModifierChain, ParseError, RuleCode};

#[test]
fn test_parse_plain_expression() {
    let code = RuleCode::parse("first monday of may");
    assert_eq!(code.fragments(), &[Fragment::Text("first monday of may".to_string())]);
    assert_eq!(code.extension(), None);
    assert_eq!(code.inline_list(), None);
}

#[test]
fn test_parse_all_placeholders() {
    let code = RuleCode::parse("{{year}}{{month}}{{day}}{{easter}}{{easter_o}}{{passover}}");
    let placeholders: Vec<Placeholder> = code
        .fragments()
        .iter()
        .filter_map(|f| match f {
            Fragment::Placeholder(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(
        placeholders,
        vec![
            Placeholder::Year,
            Placeholder::Month,
            Placeholder::Day,
            Placeholder::Easter,
            Placeholder::EasterOrthodox,
            Placeholder::Passover,
        ]
    );
}

#[test]
fn test_parse_extension_and_conditions() {
    let code = RuleCode::parse("{{hebrew}}|{{?D=Tue}}+1 Day|{{?D=Fri}}-1 Day");
    assert_eq!(code.extension(), Some("hebrew"));
    assert_eq!(code.fragments().len(), 2);
}

#[test]
fn test_fragment_source_round_trips() {
    let source = "{{2018:2018-05-01,2019-05-03}}|{{?D=Sat,Sun}}next monday";
    let code = RuleCode::parse(source);
    let rebuilt: String = code.fragments().iter().map(Fragment::source).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn test_unbalanced_braces_stay_text() {
    let code = RuleCode::parse("{{easter|+1 day");
    assert_eq!(code.fragments(), &[Fragment::Text("{{easter|+1 day".to_string())]);

    let code = RuleCode::parse("{{x {{easter}}");
    assert_eq!(
        code.fragments(),
        &[
            Fragment::Text("{{x ".to_string()),
            Fragment::Placeholder(Placeholder::Easter)
        ]
    );
}

#[test]
fn test_parse_chain() {
    let chain = ModifierChain::parse("2018-05-05|{{?D=Sat,sun}}next Monday|{{?D=Mon}}").unwrap();
    assert_eq!(chain.modifiers.len(), 3);
    assert!(matches!(chain.modifiers[0], Modifier::Plain(_)));
    assert!(matches!(
        &chain.modifiers[1],
        Modifier::Conditional { then: Some(_), .. }
    ));
    assert!(matches!(
        &chain.modifiers[2],
        Modifier::Conditional { then: None, .. }
    ));
}

#[test]
fn test_parse_chain_errors() {
    assert!(matches!(
        ModifierChain::parse("{{?D=Sat"),
        Err(ParseError::InvalidCondition { position: 0, .. })
    ));
    assert!(matches!(
        ModifierChain::parse("+1 day|{{?=Sat}}"),
        Err(ParseError::InvalidCondition { position: 10, .. })
    ));
    assert!(matches!(
        ModifierChain::parse("{{?D=}}"),
        Err(ParseError::InvalidCondition { .. })
    ));
    assert!(matches!(
        ModifierChain::parse("{{?D=Sat}}soon"),
        Err(ParseError::InvalidExpression { position: 10, .. })
    ));
}
