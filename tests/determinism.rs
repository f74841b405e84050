use pscan::checkpoint::ScanState;
use pscan::{values, ParamSet, ParamSetKey, ParamValue, Scan, ScanPoint};

#[test]
fn param_set_key_ignores_insertion_order() {
    let mut a = ParamSet::new();
    a.insert("alpha", 1);
    a.insert("beta", 2.5);

    let mut b = ParamSet::new();
    b.insert("beta", 2.5);
    b.insert("alpha", 1);

    assert_eq!(ParamSetKey::from_params(&a), ParamSetKey::from_params(&b));
    assert!(ParamSetKey::from_params(&a).as_str().starts_with("sha256:"));
    assert_eq!(ParamSetKey::from_params(&a).as_str().len(), 7 + 64);
}

#[test]
fn param_set_key_distinguishes_types_and_names() {
    let key = |name: &str, v: ParamValue| {
        let mut p = ParamSet::new();
        p.insert(name, v);
        ParamSetKey::from_params(&p)
    };

    assert_ne!(key("x", ParamValue::Int(1)), key("x", ParamValue::Float(1.0)));
    assert_ne!(key("x", ParamValue::Int(1)), key("y", ParamValue::Int(1)));
    assert_ne!(
        key("x", ParamValue::Str("1".into())),
        key("x", ParamValue::Int(1))
    );

    // no ambiguity when a name runs into its value
    let mut ab = ParamSet::new();
    ab.insert("ab", "c");
    let mut a = ParamSet::new();
    a.insert("a", "bc");
    assert_ne!(ParamSetKey::from_params(&ab), ParamSetKey::from_params(&a));
}

#[test]
fn negative_zero_shares_key_with_zero() {
    let mut pos = ParamSet::new();
    pos.insert("x", 0.0);
    let mut neg = ParamSet::new();
    neg.insert("x", -0.0);

    assert_eq!(pos, neg);
    assert_eq!(ParamSetKey::from_params(&pos), ParamSetKey::from_params(&neg));
}

#[test]
fn fingerprint_depends_on_axis_order() {
    let xy = Scan::from_params(
        [("x", values([1, 2])), ("y", values([3, 4]))],
        Vec::<Vec<&str>>::new(),
    )
    .unwrap();
    let yx = Scan::from_params(
        [("y", values([3, 4])), ("x", values([1, 2]))],
        Vec::<Vec<&str>>::new(),
    )
    .unwrap();

    assert_ne!(xy.fingerprint(), yx.fingerprint());
    assert_eq!(
        xy.fingerprint(),
        Scan::from_params(
            [("x", values([1, 2])), ("y", values([3, 4]))],
            Vec::<Vec<&str>>::new(),
        )
        .unwrap()
        .fingerprint()
    );
}

#[test]
fn joint_and_combinatorial_fingerprints_differ() {
    let comb = Scan::from_params(
        [("x", values([1, 2])), ("y", values([3, 4]))],
        Vec::<Vec<&str>>::new(),
    )
    .unwrap();
    let joint = Scan::from_params([("x", values([1, 2])), ("y", values([3, 4]))], [["x", "y"]])
        .unwrap();

    assert_ne!(comb.fingerprint(), joint.fingerprint());
}

#[test]
fn repeated_expansion_is_identical() {
    let mut scan = Scan::from_params(
        [
            ("a", values([1, 2, 3])),
            ("b", values([0.5, 1.5, 2.5])),
            ("mode", values(["x", "y"])),
        ],
        [["a", "b"]],
    )
    .unwrap();
    scan.add_count(|p| (p.get_str("mode") == Some("y")).then_some(2));

    let first: Vec<ScanPoint> = scan.params().collect();
    let second: Vec<ScanPoint> = scan.params().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3 + 6);
}

#[test]
fn golden_point_serialization() {
    let mut params = ParamSet::new();
    params.insert("b", 0.5);
    params.insert("a", 1);
    params.insert("mode", "fast");
    params.insert("on", true);

    let point = ScanPoint {
        combination: 4,
        repeat: 1,
        repeats: 2,
        params,
    };

    let json = serde_json::to_string(&point).unwrap();
    assert_eq!(
        json,
        r#"{"combination":4,"repeat":1,"repeats":2,"params":{"a":1,"b":0.5,"mode":"fast","on":true}}"#
    );

    let back: ScanPoint = serde_json::from_str(&json).unwrap();
    assert_eq!(back, point);
}

#[test]
fn golden_checkpoint_key_order() {
    let scan = Scan::new();
    let mut state = ScanState::new(scan.fingerprint());

    let mut p = ParamSet::new();
    p.insert("x", 1);
    state.record(ParamSetKey::from_params(&p));
    state.record(ParamSetKey::from_params(&p));

    let json = serde_json::to_string_pretty(&state).unwrap();

    let fp_pos = json.find("\"scan_fingerprint\":").unwrap();
    let ca_pos = json.find("\"created_at\":").unwrap();
    let ua_pos = json.find("\"updated_at\":").unwrap();
    let c_pos = json.find("\"completed\":").unwrap();
    assert!(fp_pos < ca_pos);
    assert!(ca_pos < ua_pos);
    assert!(ua_pos < c_pos);

    let back: ScanState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.completed(&ParamSetKey::from_params(&p)), 2);
}
