use pscan::{values, CompareOp, Condition, ConditionalRepeat, ParamSet, Scan};

fn counts(scan: &Scan) -> Vec<(i64, usize)> {
    let mut out: Vec<(i64, usize)> = Vec::new();
    for point in scan.params() {
        let x = point.params.get_i64("x").unwrap();
        if let Some((last, n)) = out.last_mut() {
            if *last == x {
                *n += 1;
                continue;
            }
        }
        out.push((x, 1));
    }
    out
}

fn base() -> Scan {
    let mut scan = Scan::new();
    scan.add_params([("x", values([1, 2, 3]))]).unwrap();
    scan
}

#[test]
fn default_repeats_apply_without_rules() {
    let scan = base().with_default_repeats(3);
    assert_eq!(counts(&scan), vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn later_rules_override_earlier() {
    let mut scan = base();
    scan.add_count(|_| Some(2));
    scan.add_count(|p| (p.get_i64("x") == Some(3)).then_some(5));
    assert_eq!(counts(&scan), vec![(1, 2), (2, 2), (3, 5)]);
}

#[test]
fn none_and_zero_defer_to_previous() {
    let mut scan = base();
    scan.add_count(|_| Some(4));
    scan.add_count(|p| if p.get_i64("x") == Some(1) { Some(0) } else { None });
    assert_eq!(counts(&scan), vec![(1, 4), (2, 4), (3, 4)]);
}

#[test]
fn zero_default_skips_unless_rule_applies() {
    let mut scan = base().with_default_repeats(0);
    scan.add_count(|p| (p.get_i64("x") == Some(2)).then_some(1));
    assert_eq!(counts(&scan), vec![(2, 1)]);
}

#[test]
fn declarative_rules_match_closures() {
    let mut with_closures = base();
    with_closures.add_count(|_| Some(2));
    with_closures.add_count(|p| if p.get_i64("x")? >= 2 { Some(1) } else { None });

    let mut with_rules = base();
    with_rules.add_rule(ConditionalRepeat::always(2));
    with_rules.add_rule(ConditionalRepeat::when(
        Condition::new("x", CompareOp::Ge, 2),
        1,
    ));

    assert_eq!(counts(&with_closures), counts(&with_rules));
    assert_eq!(counts(&with_rules), vec![(1, 2), (2, 1), (3, 1)]);
}

#[test]
fn repeat_count_is_queryable() {
    let mut scan = base();
    scan.add_count(|p| if p.get_i64("x")? > 1 { Some(7) } else { None });

    let mut p = ParamSet::new();
    p.insert("x", 1);
    assert_eq!(scan.repeat_count(&p), 1);
    p.insert("x", 2);
    assert_eq!(scan.repeat_count(&p), 7);
}

#[test]
fn try_run_stops_at_first_error() {
    let scan = base().with_default_repeats(2);
    let mut calls = 0;
    let result = scan.try_run(|p| {
        calls += 1;
        if p.get_i64("x") == Some(2) {
            Err("boom")
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err("boom"));
    assert_eq!(calls, 3);

    let ok: Result<usize, &str> = scan.try_run(|_| Ok(()));
    assert_eq!(ok, Ok(6));
}
