//! End-to-end condition scenarios over typed and dynamic sequences.

use std::collections::HashMap;
use std::sync::Arc;

use condmap::{
    and, check, deep_eq, eq, field_check, len, look_after_all, look_after_any, look_before_all,
    look_before_any, lookaround, Condition, ConditionError, ConditionExt, Lookaround,
    LookaroundOptions, SharedCondition, ToValue, Value,
};
use condmap_macros::Inspect;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

const INTS: [i64; 10] = [399, 391, 71, 439, 136, 37, 71, 24, 371, 245];

#[derive(Debug, Clone, Inspect)]
struct Outer {
    #[inspect(rename = "Field1")]
    first: Option<Box<Inner>>,
    #[inspect(rename = "Field2")]
    second: Option<Box<Nested>>,
    #[inspect(rename = "Field3")]
    long_text: String,
    #[inspect(rename = "Field4")]
    short_text: String,
}

#[derive(Debug, Clone, Inspect)]
struct Inner {
    #[inspect(rename = "Field1")]
    label: String,
    #[inspect(rename = "Field2")]
    code: i64,
    #[inspect(rename = "Field3")]
    extra: Option<i64>,
}

#[derive(Debug, Clone, Inspect)]
struct Nested {
    #[inspect(rename = "Field1")]
    pair: Pair,
    #[inspect(rename = "Field2")]
    tag: String,
}

#[derive(Debug, Clone, Inspect)]
struct Pair {
    #[inspect(rename = "Field1")]
    left: String,
    #[inspect(rename = "Field2")]
    right: String,
}

#[derive(Debug, Clone, Inspect)]
struct Rogue {
    #[inspect(rename = "RogueField")]
    rogue_field: String,
}

fn outers() -> Vec<Outer> {
    let long_text = "verylongstring-verylongstring".to_string();
    let short_text = "short".to_string();
    vec![
        Outer {
            first: Some(Box::new(Inner {
                label: "example".into(),
                code: 420,
                extra: None,
            })),
            second: Some(Box::new(Nested {
                pair: Pair {
                    left: "subvalue1".into(),
                    right: "subvalue2".into(),
                },
                tag: "testing".into(),
            })),
            long_text: long_text.clone(),
            short_text: short_text.clone(),
        },
        Outer {
            first: Some(Box::new(Inner {
                label: "empty".into(),
                code: 34,
                extra: Some(50),
            })),
            second: None,
            long_text: long_text.clone(),
            short_text: short_text.clone(),
        },
        Outer {
            first: None,
            second: None,
            long_text,
            short_text,
        },
    ]
}

fn rogue() -> Rogue {
    Rogue {
        rogue_field: "invalid".into(),
    }
}

fn less_than(limit: i64) -> impl Fn(&i64) -> bool + Send + Sync {
    move |x| *x < limit
}

// ============================================================================
// Element checks
// ============================================================================

#[test]
fn check_deep_eq_on_structs() {
    let values = outers();
    let cond = check(deep_eq(values[0].to_value()));
    assert_eq!(cond.positions(&values[..2]), vec![0]);
}

#[test]
fn check_eq_on_strings() {
    let values = ["dummy value 1", "dummy value 2 (but very long)"];
    let cond = check(eq("dummy value 1"));
    assert_eq!(cond.positions(&values), vec![0]);
}

#[test]
fn check_len_on_mixed_values() {
    let values = vec![
        outers().to_value(),
        vec!["dummy value 1", "dummy value 2 (but very long)"].to_value(),
        INTS.to_vec().to_value(),
        rogue().to_value(),
    ];
    let cond = check(len(3));
    assert_eq!(cond.positions(&values), vec![0]);
}

#[test]
fn check_closure_on_mixed_values() {
    let values = vec![
        Value::from("dummy value 1"),
        Value::from("dummy value 2 (but very long)"),
        Value::from(INTS[0]),
    ];
    let cond = check(|v: &Value| v.as_str().is_some_and(|s| s.len() > 15));
    assert_eq!(cond.positions(&values), vec![1]);
}

// ============================================================================
// Field checks
// ============================================================================

#[test]
fn field_check_eq_through_structs_and_maps() {
    let mut values: Vec<Value> = outers().iter().map(ToValue::to_value).collect();
    values.push(Value::from(json!({"Field1": {"Field2": 420}})));
    values.push(rogue().to_value());

    let cond = field_check("Field1.Field2", eq(420i64));
    assert_eq!(cond.positions(&values), vec![0, 3]);
}

#[test]
fn field_check_closure_skips_missing_fields() {
    let mut values: Vec<Value> = outers().iter().map(ToValue::to_value).collect();
    values.push(rogue().to_value());

    let cond = field_check("Field1.Field3", |v: &Value| {
        v.as_number().is_some_and(|n| n.to_f64() < 60.0)
    });
    assert_eq!(cond.positions(&values), vec![1]);
}

#[test]
fn field_check_on_typed_sequence() {
    let values = outers();
    let cond = field_check("Field2.Field1.Field2", eq("subvalue2"));
    assert_eq!(cond.positions(&values), vec![0]);

    let cond = field_check(Outer::FIELD4, eq("short"));
    assert_eq!(cond.count(&values), 3);
}

#[test]
fn field_check_on_hash_maps() {
    let values: Vec<HashMap<String, i64>> = vec![
        HashMap::from([("code".to_string(), 500)]),
        HashMap::from([("other".to_string(), 500)]),
    ];
    let cond = field_check("code", eq(500i64));
    assert_eq!(cond.positions(&values), vec![0]);
}

#[test]
fn field_check_follows_shared_pointers() {
    let shared = Arc::new(Value::from(json!({"code": 7})));
    let values = vec![
        Value::Map([("inner".to_string(), Value::from(Arc::clone(&shared)))].into()),
        Value::Map([("inner".to_string(), Value::null_pointer())].into()),
    ];

    let cond = field_check("inner.code", eq(7i64));
    assert_eq!(cond.positions(&values), vec![0]);

    let same = field_check("inner", eq(Value::from(Arc::clone(&shared))));
    assert_eq!(same.positions(&values), vec![0]);

    let copy = Arc::new(Value::from(json!({"code": 7})));
    let identity = field_check("inner", eq(Value::from(Arc::clone(&copy))));
    let structure = field_check("inner", deep_eq(Value::from(copy)));
    assert!(identity.positions(&values).is_empty());
    assert_eq!(structure.positions(&values), vec![0]);
}

// ============================================================================
// Lookaround scenarios
// ============================================================================

#[test]
fn look_before_any_finds_earlier_match() {
    let cond = look_before_any(check(eq(INTS[4])));
    assert_eq!(cond.positions(&INTS), vec![5, 6, 7, 8, 9]);
}

#[test]
fn look_before_all_requires_every_earlier_match() {
    let cond = look_before_all(check(|x: &i64| *x > 300));
    assert_eq!(cond.positions(&INTS), vec![1, 2]);
}

#[test]
fn look_after_any_finds_later_match() {
    let cond = look_after_any(check(eq(INTS[5])));
    assert_eq!(cond.positions(&INTS), vec![0, 1, 2, 3, 4]);
}

#[test]
fn look_after_all_requires_every_later_match() {
    let cond = look_after_all(check(|x: &i64| *x > 200));
    assert_eq!(cond.positions(&INTS), vec![7, 8]);
}

#[test]
fn backward_with_max_distance() {
    let values = [1000i64, 300, 70, 70, 300, 70, 300, 300, 70];
    let cond = and([
        check(eq(70i64)).boxed(),
        Lookaround::before()
            .max_dist(2)
            .build(check(less_than(200)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![3, 5]);
}

#[test]
fn backward_with_start_distance() {
    let values = [1000i64, 300, 70, 70, 300, 70, 300, 300, 70];
    let cond = and([
        check(eq(70i64)).boxed(),
        Lookaround::before()
            .start_dist(3)
            .build(check(less_than(200)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![5, 8]);
}

#[test]
fn backward_with_window_and_all() {
    let values = [70i64, 1000, 300, 70, 70, 300, 300, 70, 70, 300, 1000];
    let cond = and([
        check(eq(300i64)).boxed(),
        Lookaround::before()
            .max_dist(3)
            .start_dist(2)
            .all(true)
            .build(check(eq(70i64)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![2, 6]);
}

#[test]
fn forward_with_max_distance() {
    let values = [70i64, 300, 300, 70, 300, 70, 70, 300, 1000, 50];
    let cond = and([
        check(eq(70i64)).boxed(),
        Lookaround::after()
            .max_dist(2)
            .build(check(less_than(200)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![3, 5]);
}

#[test]
fn forward_with_start_distance() {
    let values = [70i64, 300, 300, 70, 300, 70, 70, 300, 1000];
    let cond = and([
        check(eq(70i64)).boxed(),
        Lookaround::after()
            .start_dist(3)
            .build(check(less_than(200)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![0, 3]);
}

#[test]
fn forward_with_window_and_all() {
    let values = [70i64, 70, 300, 300, 70, 70, 300, 1000];
    let cond = and([
        check(eq(70i64)).boxed(),
        Lookaround::after()
            .max_dist(3)
            .start_dist(2)
            .all(true)
            .build(check(eq(300i64)))
            .unwrap()
            .boxed(),
    ])
    .unwrap();
    assert_eq!(cond.positions(&values), vec![0]);
}

#[test]
fn anchored_lookaround_compares_with_current_element() {
    // A code seen again within the previous three entries.
    let values = [5i64, 3, 5, 1, 3, 9];
    let repeated = Lookaround::before()
        .max_dist(3)
        .build_anchored(|current: &i64| check(eq(*current)).shared())
        .unwrap();
    assert_eq!(repeated.positions(&values), vec![2, 4]);
}

#[test]
fn lookaround_shares_inner_condition() {
    let inner: SharedCondition<i64> = check(eq(71i64)).shared();
    let before = look_before_any(Arc::clone(&inner));
    let after = look_after_any(inner);

    assert_eq!(before.positions(&INTS), vec![3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(after.positions(&INTS), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn invalid_lookarounds_are_rejected() {
    let zero = lookaround::<i64, _>(check(eq(0)), 0);
    assert!(matches!(zero, Err(ConditionError::InvalidInterval)));

    let negative_max = Lookaround::<i64>::after().max_dist(-10).build(check(eq(0)));
    assert!(matches!(
        negative_max,
        Err(ConditionError::InvalidMaxDistance)
    ));

    let negative_start = Lookaround::<i64>::after()
        .start_dist(-10)
        .build(check(eq(0)));
    assert!(matches!(
        negative_start,
        Err(ConditionError::InvalidStartDistance)
    ));

    let start_first = Lookaround::<i64>::after()
        .start_dist(10)
        .max_dist(5)
        .build(check(eq(0)));
    let max_first = Lookaround::<i64>::after()
        .max_dist(5)
        .start_dist(10)
        .build(check(eq(0)));
    assert!(matches!(
        start_first,
        Err(ConditionError::InvalidMaxOrStartDistance)
    ));
    assert!(matches!(
        max_first,
        Err(ConditionError::InvalidMaxOrStartDistance)
    ));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn lookaround_options_from_yaml() {
    let options: LookaroundOptions = serde_yaml::from_str(
        "interval: -1\nmax_dist: 3\nstart_dist: 2\nall: true\n",
    )
    .unwrap();

    let cond = Lookaround::from_options(options, check(eq(70i64))).unwrap();
    assert_eq!(cond.options(), options);

    let values = [70i64, 1000, 300, 70, 70, 300, 300, 70, 70, 300, 1000];
    let both = and([check(eq(300i64)).boxed(), cond.boxed()]).unwrap();
    assert_eq!(both.positions(&values), vec![2, 6]);
}

#[test]
fn invalid_options_from_json_fail_at_build() {
    let options: LookaroundOptions =
        serde_json::from_str(r#"{"interval": 1, "max_dist": 2, "start_dist": 4}"#).unwrap();
    let result = Lookaround::<i64>::from_options(options, check(eq(0)));
    assert!(matches!(
        result,
        Err(ConditionError::InvalidMaxOrStartDistance)
    ));
}

#[test]
fn conditions_are_shareable_across_threads() {
    let cond: SharedCondition<i64> = look_before_any(check(eq(INTS[4]))).shared();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cond = Arc::clone(&cond);
            std::thread::spawn(move || cond.positions(&INTS))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![5, 6, 7, 8, 9]);
    }
}

#[test]
fn condition_trait_object_can_be_tested_directly() {
    let cond: &dyn Condition<i64> = &check(eq(71i64));
    assert!(cond.test_at(&INTS, 2));
    assert!(!cond.test_at(&INTS, 3));
}
