use mapext::map::MapExt;
use mapext::map::Slot;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::collections::HashMap;

fn bump(c: &Cell<u32>) {
  c.set(c.get() + 1);
}

#[test]
fn test_get_or_add_with_absent() {
  let calls = Cell::new(0);
  let mut t = BTreeMap::from([("a", 1), ("b", 2)]);

  let v = *t.get_or_add_with("c", || { bump(&calls); 99 });

  assert_eq!(v, 99);
  assert_eq!(calls.get(), 1);
  assert_eq!(t.get("c"), Some(&99));
  assert_eq!(t.len(), 3);
}

#[test]
fn test_get_or_add_with_present() {
  let calls = Cell::new(0);
  let mut t = HashMap::from([("a", 1), ("b", 2)]);
  let before = t.clone();

  let v = *t.get_or_add_with("a", || { bump(&calls); 99 });

  assert_eq!(v, 1);
  assert_eq!(calls.get(), 0);
  assert_eq!(t, before);
}

#[test]
fn test_get_or_receives_key() {
  let mut t = HashMap::<u32, u32>::new();
  let seen = Cell::new(0);

  assert_eq!(*t.get_or(7, |k| { seen.set(*k); k * 10 }), 70);
  assert_eq!(seen.get(), 7);
  assert_eq!(*t.get_or(7, |_| unreachable!()), 70);
}

#[test]
fn test_contains_short_circuit() {
  let t = HashMap::from([("a", 1), ("b", 2)]);
  let seen = Cell::new(0);

  let keys = ["a", "x", "b"].into_iter().inspect(|_| bump(&seen));
  assert!(!t.contains_all_keys(keys));
  assert_eq!(seen.get(), 2);

  seen.set(0);
  let keys = ["x", "a", "b"].into_iter().inspect(|_| bump(&seen));
  assert!(t.contains_any_key(keys));
  assert_eq!(seen.get(), 2);

  assert!(t.contains_all_keys(std::iter::empty::<&str>()));
  assert!(!t.contains_any_key(std::iter::empty::<&str>()));
}

#[test]
fn test_update_or_add_with_absent_skips_update() {
  let updates = Cell::new(0);
  let creates = Cell::new(0);
  let mut t = HashMap::<&str, u32>::new();

  t.update_or_add_with("k", |v| { bump(&updates); *v += 1 }, || { bump(&creates); 5 });

  assert_eq!(t["k"], 5);
  assert_eq!(updates.get(), 0);
  assert_eq!(creates.get(), 1);
}

#[test]
fn test_update_or_add_with_present_skips_create() {
  let updates = Cell::new(0);
  let creates = Cell::new(0);
  let mut t = HashMap::from([("k", 5u32)]);

  t.update_or_add_with("k", |v| { bump(&updates); *v += 1 }, || { bump(&creates); 0 });

  assert_eq!(t["k"], 6);
  assert_eq!(updates.get(), 1);
  assert_eq!(creates.get(), 0);
}

#[test]
fn test_update_or_add_default_absent_applies_update() {
  let updates = Cell::new(0);
  let mut t = BTreeMap::<&str, Vec<&str>>::new();

  t.update_or_add_default("k", |v| { bump(&updates); v.push("first") });

  assert_eq!(t["k"], vec!["first"]);
  assert_eq!(updates.get(), 1);
}

#[test]
fn test_try_get_or_add_with() {
  let mut t = HashMap::<u32, u32>::new();

  let r: Result<&mut u32, &str> = t.try_get_or_add_with(1, || Err("boom"));
  assert_eq!(r, Err("boom"));
  assert!(t.is_empty());

  assert_eq!(t.try_get_or_add_with(1, || Ok::<_, &str>(5)), Ok(&mut 5));
  assert_eq!(t.try_get_or_add_with(1, || Err("unused")), Ok(&mut 5));
}

#[test]
fn test_try_get_or() {
  let mut t = HashMap::<&str, u32>::new();

  assert_eq!(t.try_get_or("12", |k| k.parse::<u32>()).copied(), Ok(12));
  assert!(t.try_get_or("zz", |k| k.parse::<u32>()).is_err());
  assert!(!t.contains_key("zz"));
  assert_eq!(t.len(), 1);
}

#[test]
fn test_slot() {
  let mut t = HashMap::<u32, u32>::new();

  assert!(t.slot(1, |_| 1).is_inserted());
  assert!(!t.slot(1, |_| 2).is_inserted());
  assert_eq!(t.slot(1, |_| 3), Slot::Existing(&mut 1));
  assert_eq!(t.slot(2, |k| k + 1), Slot::Inserted(&mut 3));
  assert_eq!(t.upsert(2, 4), Some(3));
  assert_eq!(t.upsert(9, 9), None);
}
