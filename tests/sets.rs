mod common;

use common::{assume, compile_str, pin_bools, pin_set, set_var, subsets, Oracle};
use fzncnf::decode::Value;

/// Checks that `pred(x, y, r)` determines `r = f(x, y)` for all subsets of
/// `1..=5`
fn check_operation<F>(pred: &str, f: F)
where
    F: Fn(&[i64], &[i64]) -> Vec<i64>,
{
    let mut comp = compile_str(&format!(
        "var set of 1..5: x;\nvar set of 1..5: y;\nvar set of 1..5: r;\n\
         constraint {pred}(x, y, r);"
    ));
    let r = set_var(&comp, "r");
    let mut oracle = Oracle::new(&comp);
    let all = subsets(&[1, 2, 3, 4, 5]);
    for xs in &all {
        for ys in &all {
            let mut pins = pin_set(&mut comp, "x", xs);
            pins.extend(pin_set(&mut comp, "y", ys));
            let expected = f(xs, ys);
            let sol = oracle.solution(&comp, &pins).unwrap();
            assert_eq!(
                sol.get("r"),
                Some(&Value::Set(expected.clone())),
                "{pred}({xs:?}, {ys:?})"
            );
            for elem in 1..=5 {
                let flipped = if expected.contains(&elem) {
                    !r.member(elem)
                } else {
                    r.member(elem)
                };
                let mut lits = assume(&comp, &[flipped]).unwrap();
                lits.extend(&pins);
                assert!(!oracle.solve(&lits), "{pred}({xs:?}, {ys:?}) is not unique");
            }
        }
    }
}

#[test]
fn set_union() {
    check_operation("set_union", |xs, ys| {
        (1..=5)
            .filter(|e| xs.contains(e) || ys.contains(e))
            .collect()
    });
}

#[test]
fn set_intersect() {
    check_operation("set_intersect", |xs, ys| {
        xs.iter().copied().filter(|e| ys.contains(e)).collect()
    });
}

#[test]
fn set_diff() {
    check_operation("set_diff", |xs, ys| {
        xs.iter().copied().filter(|e| !ys.contains(e)).collect()
    });
}

#[test]
fn set_symdiff() {
    check_operation("set_symdiff", |xs, ys| {
        (1..=5)
            .filter(|e| xs.contains(e) != ys.contains(e))
            .collect()
    });
}

/// Checks reified binary set relations against a predicate on sorted
/// element lists
fn check_relation<F>(pred: &str, rel: F)
where
    F: Fn(&[i64], &[i64]) -> bool,
{
    let mut comp = compile_str(&format!(
        "var set of 1..3: x;\nvar set of 2..4: y;\nvar bool: r;\n\
         constraint {pred}_reif(x, y, r);"
    ));
    let mut oracle = Oracle::new(&comp);
    for xs in subsets(&[1, 2, 3]) {
        for ys in subsets(&[2, 3, 4]) {
            let mut pins = pin_set(&mut comp, "x", &xs);
            pins.extend(pin_set(&mut comp, "y", &ys));
            let expected = rel(&xs, &ys);
            let sol = oracle.solution(&comp, &pins).unwrap();
            assert_eq!(sol.bool("r"), Some(expected), "{pred}({xs:?}, {ys:?})");
            pins.extend(pin_bools(&mut comp, &[("r", !expected)]));
            assert!(!oracle.solve(&pins), "{pred}({xs:?}, {ys:?}) is not unique");
        }
    }
}

#[test]
fn set_eq_and_ne() {
    check_relation("set_eq", |xs, ys| xs == ys);
    check_relation("set_ne", |xs, ys| xs != ys);
}

#[test]
fn set_subset_and_superset() {
    check_relation("set_subset", |xs, ys| xs.iter().all(|e| ys.contains(e)));
    check_relation("set_superset", |xs, ys| ys.iter().all(|e| xs.contains(e)));
}

#[test]
fn set_lex_order() {
    check_relation("set_le", |xs, ys| xs <= ys);
    check_relation("set_lt", |xs, ys| xs < ys);
}

#[test]
fn set_element_selects() {
    let mut comp = compile_str(
        "var set of 1..3: a;\nvar set of 1..3: b;\nvar 1..2: i;\nvar set of 1..3: z;\n\
         constraint array_set_element(i, [a, b], z);",
    );
    let mut oracle = Oracle::new(&comp);
    let mut pins = pin_set(&mut comp, "a", &[1]);
    pins.extend(pin_set(&mut comp, "b", &[2, 3]));
    for (idx, expected) in [(1, vec![1]), (2, vec![2, 3])] {
        let mut lits = pins.clone();
        lits.extend(common::pin_ints(&mut comp, &[("i", idx)]).unwrap());
        let sol = oracle.solution(&comp, &lits).unwrap();
        assert_eq!(sol.get("z"), Some(&Value::Set(expected)));
    }
}
