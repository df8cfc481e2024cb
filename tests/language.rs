use std::fs::{self};

use reckon::{
    calculate,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        calculator::Calculator,
        options::{ErrorPolicy, Options},
        token::TokenKind,
    },
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, (code, expected)) in extract_reckon_blocks(&content).into_iter().enumerate() {
            count += 1;
            let mut calculator = Calculator::new();
            let mut last = None;
            for line in code.lines().filter(|l| !l.trim().is_empty()) {
                match calculator.calculate(line) {
                    Ok(value) => last = Some(value),
                    Err(e) => panic!("Example {} in {:?} failed:\n{}\nError: {:?}",
                                     i + 1,
                                     path,
                                     code,
                                     e),
                }
            }
            if let Some(expected) = expected {
                let actual = last.unwrap_or_else(|| panic!("Example {} in {path:?} is empty", i + 1));
                assert_same(actual, expected, &code);
            }
        }
    }

    assert!(count > 0, "No reckon examples found in book/src");
}

/// Collects ```` ```reckon <expected> ```` blocks with their optional expected
/// result.
fn extract_reckon_blocks(content: &str) -> Vec<(String, Option<f64>)> {
    let mut blocks = Vec::new();
    let mut inside = None;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if let Some(info) = trimmed.strip_prefix("```reckon") {
            let expected = match info.trim() {
                "" => None,
                ".nan" => Some(f64::NAN),
                ".inf" => Some(f64::INFINITY),
                text => Some(text.parse().unwrap_or_else(|e| panic!("Bad expected value {text:?}: {e}"))),
            };
            inside = Some(expected);
            buf.clear();
            continue;
        }
        if let Some(expected) = inside
           && trimmed.starts_with("```")
        {
            inside = None;
            blocks.push((buf.clone(), expected));
            continue;
        }
        if inside.is_some() {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_same(actual: f64, expected: f64, src: &str) {
    assert!(actual == expected || (actual.is_nan() && expected.is_nan()),
            "{src:?} evaluated to {actual}, expected {expected}");
}

fn assert_value(src: &str, expected: f64) {
    match calculate(src) {
        Ok(actual) => assert_same(actual, expected, src),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match calculate(src) {
        Ok(value) => panic!("{src:?} evaluated to {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("1 + 2", 3.0);
    assert_value("7 * 9", 63.0);
    assert_value("8 - 5", 3.0);
    assert_value("10 / 4", 2.5);
    assert_value(" \t2\t*\t( 3 + 4 ) ", 14.0);
}

#[test]
fn left_associativity() {
    assert_value("8-3-2", 3.0);
    assert_value("100/10/5", 2.0);
}

#[test]
fn left_fold_exponent_chaining() {
    assert_value("2^3^2", 64.0);
    assert_value("x = 2; x^x^x", 16.0);
}

#[test]
fn implicit_multiplication() {
    assert_value("3(4+1)", 15.0);
    assert_value("3 3", 9.0);
    assert_value("r = 2; 2 r r", 8.0);
}

#[test]
fn assignment_is_an_expression_and_persists() {
    let mut calculator = Calculator::new();
    assert_eq!(calculator.calculate("x=4;x*2").unwrap(), 8.0);
    assert_eq!(calculator.calculate("x").unwrap(), 4.0);
    assert_eq!(calculator.calculate("y = (x = 1) + 1").unwrap(), 2.0);
    assert_eq!(calculator.calculate("x").unwrap(), 1.0);
}

#[test]
fn special_literals() {
    assert_value(".nan", f64::NAN);
    assert_value(".inf", f64::INFINITY);
    assert_value("1/.inf", 0.0);
    assert_value("-.inf", f64::NEG_INFINITY);
}

#[test]
fn leading_dot_numbers() {
    assert_value(".5 + .25", 0.75);
    assert_value("2.5 .5", 1.25);
}

#[test]
fn syntax_error_names_expected_and_actual_tokens() {
    match assert_failure("*5") {
        Error::Parse(ParseError::UnexpectedToken { expected, found, offset }) => {
            assert_eq!(expected, [TokenKind::Id, TokenKind::Num, TokenKind::LParen]);
            assert_eq!(found, TokenKind::Mul);
            assert_eq!(offset, 0);
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn trailing_input_is_an_error() {
    assert!(matches!(assert_failure("3 )"),
                     Error::Parse(ParseError::TrailingInput { found: TokenKind::RParen,
                                                              offset: 2 })));
    assert!(matches!(assert_failure("4 >> 1"),
                     Error::Parse(ParseError::TrailingInput { found: TokenKind::Shr, .. })));
}

#[test]
fn unknown_variable_is_error() {
    assert!(matches!(assert_failure("foo + 1"),
                     Error::Runtime(RuntimeError::UndefinedVariable { ref name, offset: 0 }) if name == "foo"));
}

#[test]
fn unknown_character_is_error() {
    assert!(matches!(assert_failure("1 # 2"),
                     Error::Parse(ParseError::UnexpectedCharacter { .. })));
}

#[test]
fn error_messages_carry_offsets() {
    assert_eq!(assert_failure("2 + foo").to_string(),
               "Error at offset 4: Unknown variable 'foo'.");
    assert_eq!(assert_failure("(1").to_string(),
               "Error at offset 2: Unexpected end of input, expected ')'.");
}

#[test]
fn recovering_calculator_reports_once_and_continues() {
    let options = Options::default().with_error_policy(ErrorPolicy::SubstituteNan);
    let mut calculator = Calculator::with_options(options);

    let value = calculator.calculate("a = *; b = 2; b").unwrap();
    assert_eq!(value, 2.0);
    assert!(calculator.environment().get("a").is_some_and(f64::is_nan));
    assert!(matches!(calculator.last_diagnostic(),
                     Some(ParseError::UnexpectedToken { found: TokenKind::Mul, offset: 4, .. })));
}

#[test]
fn calculators_are_independent_across_threads() {
    let handles: Vec<_> = (1..=4).map(|n| {
                                     std::thread::spawn(move || {
                                         let mut calculator = Calculator::new();
                                         calculator.calculate(&format!("x = {n}")).unwrap();
                                         calculator.calculate("x x").unwrap()
                                     })
                                 })
                                 .collect();
    let squares: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(squares, [1.0, 4.0, 9.0, 16.0]);
}
