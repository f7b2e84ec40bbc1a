//! End-to-end tests for the pcs reader and writer against a realistic
//! SVM-style parameter file.

use rstest::rstest;

use paramspace::format::{FormatError, pcs};
use paramspace::{Categorical, Condition, ConfigurationSpace, ForbiddenClause, Hyperparameter};

const SVM_PCS: &str = concat!(
        "# kernel choice drives which tuning knobs are active\n",
        "kernel categorical {rbf, poly, sigmoid} [rbf]\n",
        "C real [0.03125, 32768] [1]log\n",
        "gamma real [0.0001, 8] [0.1]log\n",
        "degree integer [1, 5] [3]\n",
        "coef0 real [-0.5, 0.5] [0]\n",
        "shrinking categorical {true, false} [true]\n",
        "seed {42} [42]\n",
        "\n",
        "degree | kernel == poly\n",
        "coef0 | kernel in {poly, sigmoid}\n",
        "gamma | kernel != sigmoid\n",
        "\n",
        "{kernel=poly, degree=1}\n",
        "{kernel=sigmoid, shrinking=false}\n",
);

#[test]
fn reads_the_whole_file() {
    let space = pcs::read(SVM_PCS).unwrap();
    assert_eq!(space.len(), 7);
    assert_eq!(space.conditions().len(), 3);
    assert_eq!(space.forbidden_clauses().len(), 2);

    match space.hyperparameter("C").unwrap() {
        Hyperparameter::Continuous(p) => {
            assert_eq!(p.lower(), 0.03125);
            assert_eq!(p.upper(), 32768.0);
            assert!(p.is_log());
            assert!(!p.is_integer());
        }
        other => panic!("unexpected variant: {other:?}"),
    }
    match space.hyperparameter("coef0").unwrap() {
        Hyperparameter::Continuous(p) => assert_eq!(p.lower(), -0.5),
        other => panic!("unexpected variant: {other:?}"),
    }
    match space.hyperparameter("seed").unwrap() {
        Hyperparameter::Constant(p) => assert_eq!(p.value(), "42"),
        other => panic!("unexpected variant: {other:?}"),
    }

    assert_eq!(
        space.condition_for("degree").unwrap(),
        &Condition::equals("degree", "kernel", "poly").unwrap()
    );
    assert_eq!(
        space.condition_for("coef0").unwrap(),
        &Condition::in_set("coef0", "kernel", ["poly", "sigmoid"]).unwrap()
    );
    assert_eq!(
        space.condition_for("gamma").unwrap(),
        &Condition::not_equals("gamma", "kernel", "sigmoid").unwrap()
    );
}

#[test]
fn written_text_parses_back_to_the_same_space() {
    let space = pcs::read(SVM_PCS).unwrap();
    let text = pcs::write(&space).unwrap();
    assert_eq!(pcs::read(&text).unwrap(), space);
}

#[test]
fn writer_emits_parameters_conditions_then_forbidden() {
    let space = pcs::read(SVM_PCS).unwrap();
    let text = pcs::write(&space).unwrap();
    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("kernel categorical {rbf, poly, sigmoid} [rbf]"));
    assert!(blocks[1].lines().all(|l| l.contains('|')));
    assert_eq!(
        blocks[2].lines().collect::<Vec<_>>(),
        ["{kernel=poly, degree=1}", "{kernel=sigmoid, shrinking=false}"]
    );
}

#[test]
fn empty_input_gives_an_empty_space() {
    let space = pcs::read("").unwrap();
    assert!(space.is_empty());
    assert_eq!(pcs::write(&space).unwrap(), "");
}

#[rstest]
#[case::missing_brackets("lr real 0.001, 1.0]\n", 1)]
#[case::missing_default("depth integer [1, 16]\n", 1)]
#[case::bad_number("lr real [a, 1.0] [0.5]\n", 1)]
#[case::second_line("ok real [0, 1] [0.5]\nbroken integer [1,]\n", 2)]
fn malformed_parameters_report_their_line(#[case] input: &str, #[case] line: usize) {
    match pcs::read(input).unwrap_err() {
        FormatError::UnparsableParameter { line: reported, .. } => assert_eq!(reported, line),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::unknown_child("a categorical {x} [x]\nnope | a == x\n")]
#[case::unknown_parent("a categorical {x} [x]\nb real [0, 1] [0.5]\nb | nope == x\n")]
fn conditions_on_unknown_names_are_rejected(#[case] input: &str) {
    assert!(matches!(
        pcs::read(input).unwrap_err(),
        FormatError::Space(_)
    ));
}

#[test]
fn forbidden_clauses_resolve_against_later_declarations() {
    // the literal precedes the declarations it references
    let input = concat!(
        "{a=x, b=1}\n",
        "a categorical {x, y} [x]\n",
        "b integer [1, 4] [2]\n",
    );
    let space = pcs::read(input).unwrap();
    assert_eq!(space.forbidden_clauses().len(), 1);
}

#[test]
fn duplicate_declarations_are_rejected() {
    let input = "x real [0, 1] [0.5]\nx integer [1, 4] [2]\n";
    assert!(matches!(
        pcs::read(input).unwrap_err(),
        FormatError::Space(_)
    ));
}

#[test]
fn lines_without_closing_brackets_are_skipped_not_rejected() {
    let input = "x real [0, 1] [0.5]\nlr real [0.001, 1.0\n";
    let space = pcs::read(input).unwrap();
    assert_eq!(space.len(), 1);
    assert!(!space.contains("lr"));
}

#[test]
fn unreadable_section_headers_are_skipped() {
    let input = concat!(
        "Parameters:\n",
        "x real [0, 1] [0.5]\n",
        "Conditionals:\n",
        "Forbidden:\n",
    );
    let space = pcs::read(input).unwrap();
    assert_eq!(space.len(), 1);
}

#[test]
fn membership_forbidden_clauses_expand_on_write() {
    let mut space = ConfigurationSpace::new();
    space
        .add_hyperparameter(Categorical::new("a", ["1", "2"], "1").unwrap())
        .unwrap();
    space
        .add_hyperparameter(Categorical::new("b", ["x", "y"], "x").unwrap())
        .unwrap();
    space
        .add_forbidden_clause(
            ForbiddenClause::and(vec![
                ForbiddenClause::in_set("a", ["1", "2"]).unwrap(),
                ForbiddenClause::equals("b", "y"),
            ])
            .unwrap(),
        )
        .unwrap();
    let text = pcs::write(&space).unwrap();
    let tail: Vec<&str> = text.split("\n\n").last().unwrap().lines().collect();
    assert_eq!(tail, ["{a=1, b=y}", "{a=2, b=y}"]);
}
