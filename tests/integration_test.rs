// ABOUTME: End-to-end tests driving parse -> read -> eval against a fresh
// environment with builtins and the prelude installed

use lispy::builtins::register_builtins;
use lispy::driver::{eval_source, load_prelude};
use lispy::env::Environment;
use std::rc::Rc;

fn setup() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    load_prelude(&env).expect("prelude should load");
    env
}

/// Evaluate one line of source and return the printed result
fn run(env: &Rc<Environment>, source: &str) -> String {
    eval_source(env, source, "<test>").to_string()
}

#[test]
fn test_arithmetic() {
    let env = setup();
    assert_eq!(run(&env, "(+ 1 2 3)"), "6");
    assert_eq!(run(&env, "(- 10 3 2)"), "5");
    assert_eq!(run(&env, "(* 2 3 4)"), "24");
    assert_eq!(run(&env, "(+ 1 2.5)"), "3.5");
    assert_eq!(run(&env, "(^ 2 10)"), "1024");
    assert_eq!(run(&env, "(% 17 5)"), "2");
}

#[test]
fn test_division_by_zero() {
    let env = setup();
    assert_eq!(run(&env, "(/ 10 0)"), "Error: Division by zero!");
    assert_eq!(run(&env, "(/ 10.0 0)"), "Error: Division by zero!");
    assert_eq!(run(&env, "(% 10 0)"), "Error: Division by zero!");
}

#[test]
fn test_define_then_use() {
    let env = setup();
    assert_eq!(run(&env, "(def {x} 41)"), "()");
    assert_eq!(run(&env, "(+ x 1)"), "42");
}

#[test]
fn test_lambda_application() {
    let env = setup();
    assert_eq!(run(&env, "((\\ {x y} {+ x y}) 3 4)"), "7");
}

#[test]
fn test_partial_application() {
    let env = setup();
    assert_eq!(run(&env, "((\\ {x y} {+ x y}) 3)"), "(\\ {y} {+ x y})");
    assert_eq!(run(&env, "(((\\ {x y} {+ x y}) 3) 4)"), "7");

    run(&env, "(def {add-part} ((\\ {x y} {+ x y}) 3))");
    assert_eq!(run(&env, "(add-part 4)"), "7");
    assert_eq!(run(&env, "(add-part 10)"), "13");
}

#[test]
fn test_if_branching() {
    let env = setup();
    assert_eq!(run(&env, "(if (== 1 1) {10} {20})"), "10");
    assert_eq!(run(&env, "(if (!= 1 1) {10} {20})"), "20");
    assert_eq!(run(&env, "(if false {1} {2})"), "2");
}

#[test]
fn test_list_and_string_operations() {
    let env = setup();
    assert_eq!(run(&env, "(head {1 2 3})"), "{1}");
    assert_eq!(run(&env, "(tail \"abc\")"), "\"bc\"");
    assert_eq!(run(&env, "(len {a b c})"), "3");
    assert_eq!(run(&env, "(len \"abcd\")"), "4");
    assert_eq!(run(&env, "(list 1 2 3)"), "{1 2 3}");
    assert_eq!(run(&env, "(join {1 2} {3})"), "{1 2 3}");
    assert_eq!(run(&env, "(join \"ab\" \"cd\")"), "\"abcd\"");
}

#[test]
fn test_eval_bridges_quoted_code() {
    let env = setup();
    assert_eq!(run(&env, "(eval {+ 1 2})"), "3");
    assert_eq!(run(&env, "(eval {})"), "()");
}

#[test]
fn test_variadic_formals() {
    let env = setup();
    assert_eq!(run(&env, "((\\ {& xs} {xs}) 1 2 3)"), "{1 2 3}");
    assert_eq!(run(&env, "((\\ {x & xs} {xs}) 1)"), "{}");
}

#[test]
fn test_empty_sexpr_is_identity() {
    let env = setup();
    assert_eq!(run(&env, "()"), "()");
}

#[test]
fn test_unary_minus_negates() {
    let env = setup();
    assert_eq!(run(&env, "(- 5)"), "-5");
    assert_eq!(run(&env, "(- 2.5)"), "-2.5");
}

#[test]
fn test_min_max_ties_return_the_left_operand() {
    let env = setup();
    assert_eq!(run(&env, "(min 1 1.0)"), "1");
    assert_eq!(run(&env, "(max 2.0 2)"), "2");
    assert_eq!(run(&env, "(min 4 2 6)"), "2");
    assert_eq!(run(&env, "(max 4 2 6)"), "6");
}

#[test]
fn test_join_of_mixed_types_is_an_error() {
    let env = setup();
    assert_eq!(
        run(&env, "(join {1} \"a\")"),
        "Error: Function 'join' passed incorrect type. Got String, Expected Q-Expression."
    );
}

#[test]
fn test_cons_and_init_boundaries() {
    let env = setup();
    assert_eq!(run(&env, "(cons 1 {})"), "{1}");
    assert_eq!(run(&env, "(init {1})"), "{}");
    assert_eq!(run(&env, "(init {})"), "Error: Function 'init' passed {}!");
}

#[test]
fn test_error_is_a_first_class_value() {
    let env = setup();
    assert_eq!(run(&env, "(error \"boom\")"), "Error: boom");
}

#[test]
fn test_mismatched_binding_arity() {
    let env = setup();
    assert_eq!(
        run(&env, "(= {x y} 1 2 3)"),
        "Error: Function '=' cannot define incorrect number of values to symbols"
    );
}

#[test]
fn test_macro_arguments_are_wrapped_not_evaluated() {
    let env = setup();
    run(&env, "(def {quote-it} (\\! {a} {a}))");
    assert_eq!(run(&env, "(quote-it foo)"), "{foo}");
    assert_eq!(run(&env, "(quote-it (+ 1 2))"), "{(+ 1 2)}");
}

#[test]
fn test_error_absorption() {
    let env = setup();
    assert_eq!(run(&env, "(+ 1 (/ 1 0) nope)"), "Error: Division by zero!");
    assert_eq!(run(&env, "((/ 1 0) 1 2)"), "Error: Division by zero!");
    assert_eq!(run(&env, "(+ 1 nope (/ 1 0))"), "Error: Unbound symbol 'nope'!");
}

#[test]
fn test_not_a_function_error() {
    let env = setup();
    assert_eq!(
        run(&env, "(1 2 3)"),
        "Error: S-expression does not start with function!. Got Integer."
    );
    assert_eq!(
        run(&env, "(\"f\" 2)"),
        "Error: S-expression does not start with function!. Got String."
    );
}

#[test]
fn test_def_is_global_and_put_is_local() {
    let env = setup();
    run(&env, "(def {hide} (\\ {x} {= {hidden} x}))");
    run(&env, "(hide 5)");
    assert_eq!(run(&env, "hidden"), "Error: Unbound symbol 'hidden'!");

    run(&env, "(def {reveal} (\\ {x} {def {revealed} x}))");
    run(&env, "(reveal 7)");
    assert_eq!(run(&env, "revealed"), "7");
}

#[test]
fn test_structural_equality() {
    let env = setup();
    assert_eq!(run(&env, "(== 1 1.0)"), "true");
    assert_eq!(run(&env, "(== {1 2} {1 2})"), "true");
    assert_eq!(run(&env, "(== {1 2} {1 3})"), "false");
    assert_eq!(run(&env, "(== + +)"), "true");
    assert_eq!(run(&env, "(== + -)"), "false");
    assert_eq!(run(&env, "(== (\\ {x} {x}) (\\ {x} {x}))"), "true");
    assert_eq!(run(&env, "(== (error \"a\") (error \"a\"))"), "true");
}

#[test]
fn test_read_parses_source_strings() {
    let env = setup();
    assert_eq!(run(&env, "(read \"(+ 1 2)\")"), "{(+ 1 2)}");
    assert_eq!(run(&env, "(eval (fst (read \"(+ 1 2)\")))"), "3");
}

#[test]
fn test_print_and_show_return_the_empty_sexpr() {
    let env = setup();
    assert_eq!(run(&env, "(print \"a\" 1 {2})"), "()");
    assert_eq!(run(&env, "(show \"a\" \"b\")"), "()");
    assert_eq!(
        run(&env, "(show 1)"),
        "Error: Function 'show' passed incorrect type. Got Integer, Expected String."
    );
}

#[test]
fn test_string_escapes_round_trip() {
    let env = setup();
    assert_eq!(run(&env, "\"a\\nb\""), "\"a\\nb\"");
    assert_eq!(run(&env, "(head \"\\\"quoted\\\"\")"), "\"\\\"\"");
}

#[test]
fn test_comments_are_ignored() {
    let env = setup();
    assert_eq!(run(&env, "(+ 1 2) ; adds them up"), "3");
}

#[test]
fn test_curried_builtin_over_a_computed_list() {
    let env = setup();
    run(&env, "(def {args} {5 6 7})");
    assert_eq!(run(&env, "(unpack + args)"), "18");
}
