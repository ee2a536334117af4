use smolopt::{none, some, Option};
use std::cell::Cell;

#[test]
fn test_presence() {
    for v in &[i64::MIN, -1, 0, 1, i64::MAX] {
        let o = some(*v);
        assert!(o.is_some());
        assert!(!o.is_none());
        assert_eq!(o.unwrap(), *v);
        assert_eq!(o.expect("present"), *v);
    }
    let n = none::<i64>();
    assert!(n.is_none());
    assert!(!n.is_some());
    assert_eq!(n.unwrap_or(42), 42);
    assert_eq!(n.unwrap_or_zero(), 0);
    assert_eq!(n, Option::default());
}

#[test]
fn test_predicates() {
    let calls = Cell::new(0);
    let is_even = |v: &i32| {
        calls.set(calls.get() + 1);
        v % 2 == 0
    };
    assert!(some(2).is_some_and(is_even));
    assert!(!some(3).is_some_and(is_even));
    assert!(!none::<i32>().is_some_and(is_even));
    assert_eq!(calls.get(), 2);

    assert!(none::<i32>().is_none_or(is_even));
    assert!(some(4).is_none_or(is_even));
    assert!(!some(5).is_none_or(is_even));
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_lazy_fallbacks() {
    let calls = Cell::new(0);
    let fallback = || {
        calls.set(calls.get() + 1);
        7
    };
    assert_eq!(some(1).unwrap_or_else(fallback), 1);
    assert_eq!(some(1).map_or_else(fallback, |v| v * 10), 10);
    assert_eq!(calls.get(), 0);
    assert_eq!(none().unwrap_or_else(fallback), 7);
    assert_eq!(none::<i32>().map_or_else(fallback, |v| v * 10), 7);
    assert_eq!(calls.get(), 2);

    assert_eq!(some(2).or_else(|| panic!("not called")), some(2));
    assert_eq!(none().or_else(|| some(3)), some(3));
}

#[test]
#[should_panic(expected = "called Unwrap on a None value")]
fn test_unwrap_none() {
    none::<i32>().unwrap();
}

#[test]
#[should_panic(expected = "config must be loaded")]
fn test_expect_none() {
    none::<String>().expect("config must be loaded");
}

#[test]
fn test_as_slice() {
    let o = some(String::from("x"));
    let s = o.as_slice();
    assert_eq!(s.len(), 1);
    assert!(std::ptr::eq(&s[0], o.as_ref().unwrap()));
    assert!(none::<String>().as_slice().is_empty());
    assert_eq!(o.iter().count(), 1);
    assert_eq!((&none::<u8>()).into_iter().count(), 0);
}

#[test]
fn test_filter_and_inspect() {
    assert_eq!(some(5).filter(|_| true), some(5));
    assert_eq!(some(5).filter(|_| false), none());
    assert_eq!(none::<i32>().filter(|_| true), none());

    let seen = Cell::new(None);
    assert_eq!(some(9).inspect(|v| seen.set(Some(*v))), some(9));
    assert_eq!(seen.get(), Some(9));
    seen.set(None);
    assert_eq!(none::<i32>().inspect(|v| seen.set(Some(*v))), none());
    assert_eq!(seen.get(), None);
}

#[test]
fn test_map_changes_type() {
    let len: Option<usize> = some("four").map(str::len);
    assert_eq!(len, some(4));
    assert_eq!(none::<&str>().map(str::len), none());
    assert_eq!(some(3).map_or(String::new(), |v| v.to_string()), "3");
    assert_eq!(none::<u8>().map_or("-".to_string(), |v| v.to_string()), "-");

    let parse = |s: &str| -> Option<u32> { s.parse::<u32>().ok().into() };
    assert_eq!(some("12").and_then(parse), some(12));
    assert_eq!(some("x").and_then(parse), none());
    assert_eq!(none::<&str>().and_then(parse), none());
}

#[test]
fn test_logic_tables() {
    assert_eq!(some(1).xor(some(2)), none());
    assert_eq!(some(1).xor(none()), some(1));
    assert_eq!(none().xor(some(2)), some(2));
    assert_eq!(none::<i32>().xor(none()), none());

    assert_eq!(some(1).and(some(2)), some(2));
    assert_eq!(some(1).and(none::<i32>()), none());
    assert_eq!(none::<i32>().and(some(2)), none());
    assert_eq!(some(1).and(some("other type")), some("other type"));

    assert_eq!(some(1).or(some(2)), some(1));
    assert_eq!(some(1).or(none()), some(1));
    assert_eq!(none().or(some(2)), some(2));
    assert_eq!(none::<i32>().or(none()), none());
}

#[test]
fn test_std_conversions() {
    let o: Option<u8> = Some(3u8).into();
    assert_eq!(o, some(3));
    let o: Option<u8> = None::<u8>.into();
    assert_eq!(o, none());
    let back: core::option::Option<u8> = some(3u8).into();
    assert_eq!(back, Some(3));
    assert_eq!(none::<u8>().into_std(), None);
}

#[test]
fn test_equality_ignores_absent_slot() {
    use std::collections::HashSet;
    let set: HashSet<Option<i32>> = vec![none(), some(1), none(), some(1), some(2)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 3);
}
