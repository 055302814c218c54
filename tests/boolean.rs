mod common;

use common::{compile_str, pin_bools, pin_ints, Oracle};

fn bits(mask: u8, n: usize) -> Vec<bool> {
    (0..n).map(|bit| mask & (1 << bit) != 0).collect()
}

#[test]
fn array_bool_xor_parity() {
    let mut comp = compile_str(
        "var bool: a;\nvar bool: b;\nvar bool: c;\nconstraint array_bool_xor([a, b, c]);",
    );
    let mut oracle = Oracle::new(&comp);
    for mask in 0..8 {
        let vals = bits(mask, 3);
        let lits = pin_bools(&mut comp, &[("a", vals[0]), ("b", vals[1]), ("c", vals[2])]);
        let odd = vals.iter().filter(|val| **val).count() % 2 == 1;
        assert_eq!(oracle.solve(&lits), odd, "{vals:?}");
    }
}

#[test]
fn gates_define_outputs() {
    let gates: [(&str, fn(bool, bool) -> bool); 6] = [
        ("bool_and", |a, b| a && b),
        ("bool_or", |a, b| a || b),
        ("bool_xor", |a, b| a != b),
        ("bool_eq_reif", |a, b| a == b),
        ("bool_le_reif", |a, b| !a || b),
        ("bool_lt_reif", |a, b| !a && b),
    ];
    for (pred, gate) in gates {
        let mut comp = compile_str(&format!(
            "var bool: a;\nvar bool: b;\nvar bool: r;\nconstraint {pred}(a, b, r);"
        ));
        let mut oracle = Oracle::new(&comp);
        for mask in 0..4 {
            let vals = bits(mask, 2);
            let mut lits = pin_bools(&mut comp, &[("a", vals[0]), ("b", vals[1])]);
            let expected = gate(vals[0], vals[1]);
            let sol = oracle.solution(&comp, &lits).unwrap();
            assert_eq!(sol.bool("r"), Some(expected), "{pred}{vals:?}");
            lits.extend(pin_bools(&mut comp, &[("r", !expected)]));
            assert!(!oracle.solve(&lits), "{pred}{vals:?}");
        }
    }
}

#[test]
fn array_gates_define_outputs() {
    for (pred, all) in [("array_bool_and", true), ("array_bool_or", false)] {
        let mut comp = compile_str(&format!(
            "var bool: a;\nvar bool: b;\nvar bool: c;\nvar bool: r;\n\
             constraint {pred}([a, b, c], r);"
        ));
        let mut oracle = Oracle::new(&comp);
        for mask in 0..8 {
            let vals = bits(mask, 3);
            let lits = pin_bools(&mut comp, &[("a", vals[0]), ("b", vals[1]), ("c", vals[2])]);
            let expected = if all {
                vals.iter().all(|val| *val)
            } else {
                vals.iter().any(|val| *val)
            };
            let sol = oracle.solution(&comp, &lits).unwrap();
            assert_eq!(sol.bool("r"), Some(expected), "{pred}{vals:?}");
        }
    }
}

#[test]
fn bool2int_channels() {
    let mut comp = compile_str("var bool: b;\nvar 0..1: x;\nconstraint bool2int(b, x);");
    let mut oracle = Oracle::new(&comp);
    for val in [false, true] {
        let lits = pin_bools(&mut comp, &[("b", val)]);
        let sol = oracle.solution(&comp, &lits).unwrap();
        assert_eq!(sol.int("x"), Some(i64::from(val)));
    }
}

#[test]
fn bool_lin_le_weights() {
    let mut comp = compile_str(
        "var bool: a;\nvar bool: b;\nvar bool: c;\n\
         constraint bool_lin_le([2, 3, -1], [a, b, c], 2);",
    );
    let mut oracle = Oracle::new(&comp);
    for mask in 0..8 {
        let vals = bits(mask, 3);
        let lits = pin_bools(&mut comp, &[("a", vals[0]), ("b", vals[1]), ("c", vals[2])]);
        let sum = 2 * i64::from(vals[0]) + 3 * i64::from(vals[1]) - i64::from(vals[2]);
        assert_eq!(oracle.solve(&lits), sum <= 2, "{vals:?}");
    }
}

#[test]
fn int_element_selects() {
    let mut comp = compile_str(
        "array [1..3] of int: a = [5, 7, 9];\nvar 0..4: i;\nvar 0..10: z;\n\
         constraint array_int_element(i, a, z);",
    );
    let mut oracle = Oracle::new(&comp);
    let table = [5, 7, 9];
    for idx in 0..=4 {
        for val in 0..=10 {
            let lits = pin_ints(&mut comp, &[("i", idx), ("z", val)]).unwrap();
            let expected = (1..=3).contains(&idx) && table[(idx - 1) as usize] == val;
            assert_eq!(oracle.solve(&lits), expected, "a[{idx}] = {val}");
        }
    }
}

#[test]
fn var_int_element_selects() {
    let mut comp = compile_str(
        "var 0..3: p;\nvar 0..3: q;\nvar 1..2: i;\nvar 0..3: z;\n\
         constraint array_var_int_element(i, [p, q], z);",
    );
    let mut oracle = Oracle::new(&comp);
    for (idx, p, q) in [(1, 2, 3), (2, 2, 3), (1, 0, 1), (2, 3, 0)] {
        let lits = pin_ints(&mut comp, &[("i", idx), ("p", p), ("q", q)]).unwrap();
        let sol = oracle.solution(&comp, &lits).unwrap();
        assert_eq!(sol.int("z"), Some(if idx == 1 { p } else { q }));
    }
}

#[test]
fn var_bool_element_selects() {
    let mut comp = compile_str(
        "var bool: a;\nvar bool: b;\nvar 1..2: i;\nvar bool: z;\n\
         constraint array_var_bool_element(i, [a, b], z);",
    );
    let mut oracle = Oracle::new(&comp);
    for idx in 1..=2 {
        for mask in 0..4 {
            let vals = bits(mask, 2);
            let mut lits = pin_bools(&mut comp, &[("a", vals[0]), ("b", vals[1])]);
            lits.extend(pin_ints(&mut comp, &[("i", idx)]).unwrap());
            let sol = oracle.solution(&comp, &lits).unwrap();
            assert_eq!(sol.bool("z"), Some(vals[usize::from(idx == 2)]));
        }
    }
}
