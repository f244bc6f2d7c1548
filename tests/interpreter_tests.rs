use tipsi::errors::{TipsError, TipsResult};
use tipsi::interpreter::Interpreter;
use tipsi::lexer::scan;
use tipsi::parser::Parser;
use tipsi::symboltable::SymbolTable;
use tipsi::value::Value;
use tipsi::LineNumber;

/// Parse and run a program, feeding it `input` and capturing its output.
fn run_program(source: &str, input: &str) -> TipsResult<String> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    let mut table = SymbolTable::new();
    let mut parser = Parser::new(&tokens);
    let program = parser.parse(&mut table)?;
    let mut output = Vec::new();
    Interpreter::new(&mut table, input.as_bytes(), &mut output).run(&program)?;
    Ok(String::from_utf8(output).expect("interpreter output is valid UTF-8"))
}

/// Same, but also return the symbol table for inspecting final values.
fn run_with_table(source: &str, input: &str) -> TipsResult<(String, SymbolTable)> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    let mut table = SymbolTable::new();
    let mut parser = Parser::new(&tokens);
    let program = parser.parse(&mut table)?;
    let mut output = Vec::new();
    Interpreter::new(&mut table, input.as_bytes(), &mut output).run(&program)?;
    Ok((String::from_utf8(output).expect("interpreter output is valid UTF-8"), table))
}

#[test]
fn test_write_string_literal() -> TipsResult<()> {
    let output = run_program("PROGRAM p; BEGIN WRITE('hello world') END", "")?;
    assert_eq!(output, "hello world\n");
    Ok(())
}

#[test]
fn test_empty_compound_is_a_no_op() -> TipsResult<()> {
    let output = run_program("PROGRAM p; BEGIN END", "")?;
    assert_eq!(output, "");
    Ok(())
}

#[test]
fn test_int_division_yields_real() -> TipsResult<()> {
    let source = "PROGRAM p; VAR q : REAL; BEGIN q := 7 / 2; WRITE(q) END";
    assert_eq!(run_program(source, "")?, "3.5000\n");
    Ok(())
}

#[test]
fn test_mixed_assignment_end_to_end() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; y : REAL; \
                  BEGIN x := 5; y := x / 2; WRITE(y) END";
    assert_eq!(run_program(source, "")?, "2.5000\n");
    Ok(())
}

#[test]
fn test_real_to_int_assignment_truncates_toward_zero() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; y : INTEGER; \
                  BEGIN x := 7 / 2; y := -7 / 2; WRITE(x); WRITE(y) END";
    assert_eq!(run_program(source, "")?, "3\n-3\n");
    Ok(())
}

#[test]
fn test_int_to_real_assignment_widens() -> TipsResult<()> {
    let source = "PROGRAM p; VAR y : REAL; BEGIN y := 3; WRITE(y) END";
    assert_eq!(run_program(source, "")?, "3.0000\n");
    Ok(())
}

#[test]
fn test_integer_arithmetic_stays_integer() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 2 + 3 * 4 - 1; WRITE(x) END";
    assert_eq!(run_program(source, "")?, "13\n");
    Ok(())
}

#[test]
fn test_integer_overflow_wraps() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 2147483647 + 1; WRITE(x) END";
    assert_eq!(run_program(source, "")?, "-2147483648\n");
    Ok(())
}

#[test]
fn test_power_is_right_associative() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 2 ^^ 3 ^^ 2; WRITE(x) END";
    assert_eq!(run_program(source, "")?, "512\n");
    Ok(())
}

#[test]
fn test_integer_power_overflow_wraps() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 2 ^^ 31; WRITE(x) END";
    assert_eq!(run_program(source, "")?, "-2147483648\n");
    Ok(())
}

#[test]
fn test_zero_exponent() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 9 ^^ 0; WRITE(x) END";
    assert_eq!(run_program(source, "")?, "1\n");
    Ok(())
}

#[test]
fn test_negative_exponent_goes_real() -> TipsResult<()> {
    let source = "PROGRAM p; VAR r : REAL; BEGIN r := 2 ^^ -1; WRITE(r) END";
    assert_eq!(run_program(source, "")?, "0.5000\n");
    Ok(())
}

#[test]
fn test_real_power() -> TipsResult<()> {
    let source = "PROGRAM p; VAR r : REAL; BEGIN r := 2.25 ^^ 2; WRITE(r) END";
    assert_eq!(run_program(source, "")?, "5.0625\n");
    Ok(())
}

#[test]
fn test_mod_normalizes_to_divisor_sign() -> TipsResult<()> {
    let source = "PROGRAM p; VAR a : INTEGER; b : INTEGER; \
                  BEGIN a := -7 MOD 3; b := 7 MOD -3; WRITE(a); WRITE(b) END";
    assert_eq!(run_program(source, "")?, "2\n-2\n");
    Ok(())
}

#[test]
fn test_mod_requires_integers() {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 7.5 MOD 2 END";
    let result = run_program(source, "");
    assert!(matches!(result, Err(TipsError::TypeError { .. })));
}

#[test]
fn test_mod_by_zero() {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 7 MOD 0 END";
    assert!(matches!(run_program(source, ""), Err(TipsError::DivisionByZero)));
}

#[test]
fn test_division_by_zero() {
    let source = "PROGRAM p; VAR x : REAL; BEGIN x := 7 / 0 END";
    assert!(matches!(run_program(source, ""), Err(TipsError::DivisionByZero)));
}

#[test]
fn test_division_by_zero_valued_variable() {
    let source = "PROGRAM p; VAR y : REAL; x : REAL; BEGIN x := 7 / y END";
    assert!(matches!(run_program(source, ""), Err(TipsError::DivisionByZero)));
}

#[test]
fn test_unary_minus_preserves_kind() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; r : REAL; \
                  BEGIN x := -5; r := -2.5; WRITE(x); WRITE(r) END";
    assert_eq!(run_program(source, "")?, "-5\n-2.5000\n");
    Ok(())
}

#[test]
fn test_pre_increment_side_effect() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; y : INTEGER; \
                  BEGIN x := 5; y := ++x + ++x; WRITE(x); WRITE(y) END";
    // Left to right: first ++x yields 6, second yields 7.
    assert_eq!(run_program(source, "")?, "7\n13\n");
    Ok(())
}

#[test]
fn test_pre_decrement_on_real_uses_real_unit() -> TipsResult<()> {
    let source = "PROGRAM p; VAR r : REAL; s : REAL; \
                  BEGIN r := 1.5; s := --r; WRITE(r); WRITE(s) END";
    assert_eq!(run_program(source, "")?, "0.5000\n0.5000\n");
    Ok(())
}

#[test]
fn test_read_integer() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN READ(x); WRITE(x) END";
    assert_eq!(run_program(source, "42\n")?, "42\n");
    Ok(())
}

#[test]
fn test_read_real() -> TipsResult<()> {
    let source = "PROGRAM p; VAR r : REAL; BEGIN READ(r); WRITE(r) END";
    assert_eq!(run_program(source, "3.14\n")?, "3.1400\n");
    Ok(())
}

#[test]
fn test_read_multiple_values_on_one_line() -> TipsResult<()> {
    let source = "PROGRAM p; VAR a : INTEGER; b : INTEGER; \
                  BEGIN READ(a); READ(b); WRITE(a); WRITE(b) END";
    assert_eq!(run_program(source, "1 2\n")?, "1\n2\n");
    Ok(())
}

#[test]
fn test_read_rejects_malformed_integer() {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN READ(x) END";
    let result = run_program(source, "abc\n");
    if let Err(TipsError::InputFormatError { name, expected }) = result {
        assert_eq!(name, "x");
        assert_eq!(expected, "INTEGER");
    } else {
        panic!("Expected InputFormatError, but got: {:?}", result);
    }
}

#[test]
fn test_read_rejects_real_token_for_integer_target() {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN READ(x) END";
    assert!(matches!(
        run_program(source, "3.5\n"),
        Err(TipsError::InputFormatError { .. })
    ));
}

#[test]
fn test_read_on_exhausted_input() {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN READ(x) END";
    assert!(matches!(run_program(source, ""), Err(TipsError::InputFormatError { .. })));
}

#[test]
fn test_statements_execute_in_order() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; \
                  BEGIN x := 1; WRITE(x); x := 2; WRITE(x); BEGIN x := 3; WRITE(x) END END";
    assert_eq!(run_program(source, "")?, "1\n2\n3\n");
    Ok(())
}

#[test]
fn test_output_stops_at_failing_statement() {
    let source = "PROGRAM p; VAR x : REAL; \
                  BEGIN WRITE('before'); x := 1 / 0; WRITE('after') END";
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source).unwrap();
    let mut table = SymbolTable::new();
    let mut parser = Parser::new(&tokens);
    let program = parser.parse(&mut table).unwrap();
    let mut output = Vec::new();
    let result = Interpreter::new(&mut table, "".as_bytes(), &mut output).run(&program);
    assert!(matches!(result, Err(TipsError::DivisionByZero)));
    assert_eq!(String::from_utf8(output).unwrap(), "before\n");
}

#[test]
fn test_table_kind_never_changes() -> TipsResult<()> {
    let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 2.9 END";
    let (_, table) = run_with_table(source, "")?;
    assert_eq!(table.get("x"), Some(Value::Int(2)));
    Ok(())
}

#[test]
fn test_evaluate_promotes_mixed_operands() -> TipsResult<()> {
    let source = "PROGRAM p; VAR r : REAL; BEGIN r := 1 + 0.5; WRITE(r) END";
    assert_eq!(run_program(source, "")?, "1.5000\n");
    Ok(())
}
