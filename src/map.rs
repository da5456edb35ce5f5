//! This module provides `MapExt`: multi-key membership queries, and
//! get-or-insert and update-or-insert operations for `HashMap` and
//! `BTreeMap`.
//!
//! Every operation is a provided method built on two primitives that each
//! container implements through its own entry API: `try_slot`, which probes
//! a key and inserts a produced value if it is absent, and `upsert`.

use core::convert::Infallible;
use core::hash::BuildHasher;
use core::hash::Hash;
use log::trace;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map;
use std::collections::hash_map;

use crate::key::KeyLookup;

/// The result of probing a map for a key.

#[derive(Debug, PartialEq, Eq)]
pub enum Slot<'a, V> {
  /// The key was already present.
  Existing(&'a mut V),
  /// The key was absent and this value was just inserted.
  Inserted(&'a mut V),
}

impl<'a, V> Slot<'a, V> {
  /// Returns whether the probe inserted a new value.

  #[inline(always)]
  #[must_use]
  pub fn is_inserted(&self) -> bool {
    return matches!(self, Slot::Inserted(_));
  }

  /// Converts the slot into a reference to the stored value.

  #[inline(always)]
  #[must_use]
  pub fn into_mut(self) -> &'a mut V {
    return match self { Slot::Existing(v) | Slot::Inserted(v) => v };
  }
}

/// Extension operations for maps.
///
/// Callbacks are `FnOnce` and are called at most once per operation. A
/// factory is only called when the key is absent. Queries never change the
/// map, and only the insert paths documented on each method add keys.

pub trait MapExt {
  type Key;
  type Value;

  /// Probes `key`. If it is absent, calls `make` with the key and inserts
  /// the value it produces.
  ///
  /// If `make` fails, the map is left unchanged and its error is returned.

  fn try_slot<E, F>(&mut self, key: Self::Key, make: F) -> Result<Slot<'_, Self::Value>, E>
  where
    F: FnOnce(&Self::Key) -> Result<Self::Value, E>;

  /// Inserts `value` under `key`, returning the value it replaced.

  fn upsert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

  /// Probes `key`. If it is absent, calls `make` with the key and inserts
  /// the value it produces.

  fn slot<F>(&mut self, key: Self::Key, make: F) -> Slot<'_, Self::Value>
  where
    F: FnOnce(&Self::Key) -> Self::Value,
  {
    return match self.try_slot(key, |k| Ok::<_, Infallible>(make(k))) {
      Ok(slot) => slot,
      Err(never) => match never {},
    };
  }

  /// Returns whether every key in `keys` is present.
  ///
  /// Returns `true` for an empty sequence. Stops at the first missing key.

  fn contains_all_keys<'q, Q, I>(&self, keys: I) -> bool
  where
    Self: KeyLookup<Q>,
    Q: ?Sized + 'q,
    I: IntoIterator<Item = &'q Q>,
  {
    return keys.into_iter().all(|key| self.has_key(key));
  }

  /// Same as `contains_all_keys`.

  #[inline(always)]
  fn contains_keys<'q, Q, I>(&self, keys: I) -> bool
  where
    Self: KeyLookup<Q>,
    Q: ?Sized + 'q,
    I: IntoIterator<Item = &'q Q>,
  {
    return self.contains_all_keys(keys);
  }

  /// Returns whether at least one key in `keys` is present.
  ///
  /// Returns `false` for an empty sequence. Stops at the first present key.

  fn contains_any_key<'q, Q, I>(&self, keys: I) -> bool
  where
    Self: KeyLookup<Q>,
    Q: ?Sized + 'q,
    I: IntoIterator<Item = &'q Q>,
  {
    return keys.into_iter().any(|key| self.has_key(key));
  }

  /// Returns the value stored under `key`, first inserting the result of
  /// `factory` if the key is absent.

  fn get_or_add_with<F>(&mut self, key: Self::Key, factory: F) -> &mut Self::Value
  where
    F: FnOnce() -> Self::Value,
  {
    return self.slot(key, |_| factory()).into_mut();
  }

  /// Returns the value stored under `key`, first inserting the default value
  /// if the key is absent.

  fn get_or_add_default(&mut self, key: Self::Key) -> &mut Self::Value
  where
    Self::Value: Default,
  {
    return self.slot(key, |_| Default::default()).into_mut();
  }

  /// Returns the value stored under `key`, first inserting `value` if the
  /// key is absent. Otherwise `value` is dropped.

  fn get_or_add(&mut self, key: Self::Key, value: Self::Value) -> &mut Self::Value {
    return self.slot(key, |_| value).into_mut();
  }

  /// Returns the value stored under `key`, first inserting `callback(&key)`
  /// if the key is absent.

  fn get_or<F>(&mut self, key: Self::Key, callback: F) -> &mut Self::Value
  where
    F: FnOnce(&Self::Key) -> Self::Value,
  {
    return self.slot(key, callback).into_mut();
  }

  /// Fallible `get_or_add_with`. Nothing is inserted if `factory` fails.

  fn try_get_or_add_with<E, F>(&mut self, key: Self::Key, factory: F) -> Result<&mut Self::Value, E>
  where
    F: FnOnce() -> Result<Self::Value, E>,
  {
    return Ok(self.try_slot(key, |_| factory())?.into_mut());
  }

  /// Fallible `get_or`. Nothing is inserted if `callback` fails.

  fn try_get_or<E, F>(&mut self, key: Self::Key, callback: F) -> Result<&mut Self::Value, E>
  where
    F: FnOnce(&Self::Key) -> Result<Self::Value, E>,
  {
    return Ok(self.try_slot(key, callback)?.into_mut());
  }

  /// Calls `update` on the value stored under `key`, or inserts the result
  /// of `create` if the key is absent.
  ///
  /// `update` is not called on a newly created value. Compare
  /// `update_or_add_default`.

  fn update_or_add_with<U, C>(&mut self, key: Self::Key, update: U, create: C)
  where
    U: FnOnce(&mut Self::Value),
    C: FnOnce() -> Self::Value,
  {
    if let Slot::Existing(value) = self.slot(key, |_| create()) {
      update(value);
    }
  }

  /// Fallible `update_or_add_with`. Nothing is inserted if `create` fails.

  fn try_update_or_add_with<E, U, C>(&mut self, key: Self::Key, update: U, create: C) -> Result<(), E>
  where
    U: FnOnce(&mut Self::Value),
    C: FnOnce() -> Result<Self::Value, E>,
  {
    if let Slot::Existing(value) = self.try_slot(key, |_| create())? {
      update(value);
    }
    return Ok(());
  }

  /// Overwrites the value stored under `key`, or inserts `value` if the key
  /// is absent.

  fn update_or_add(&mut self, key: Self::Key, value: Self::Value) {
    let _ = self.upsert(key, value);
  }

  /// Calls `update` on the value stored under `key`. If the key is absent,
  /// inserts the default value first and then calls `update` on it.

  fn update_or_add_default<U>(&mut self, key: Self::Key, update: U)
  where
    U: FnOnce(&mut Self::Value),
    Self::Value: Default,
  {
    update(self.slot(key, |_| Default::default()).into_mut());
  }
}

impl<K, V, S> MapExt for HashMap<K, V, S>
where
  K: Eq + Hash,
  S: BuildHasher,
{
  type Key = K;
  type Value = V;

  fn try_slot<E, F>(&mut self, key: K, make: F) -> Result<Slot<'_, V>, E>
  where
    F: FnOnce(&K) -> Result<V, E>,
  {
    return match self.entry(key) {
      hash_map::Entry::Occupied(o) => Ok(Slot::Existing(o.into_mut())),
      hash_map::Entry::Vacant(v) => {
        let value = make(v.key())?;
        trace!("HashMap: inserting value for vacant key");
        Ok(Slot::Inserted(v.insert(value)))
      }
    };
  }

  #[inline(always)]
  fn upsert(&mut self, key: K, value: V) -> Option<V> {
    return self.insert(key, value);
  }
}

impl<K, V> MapExt for BTreeMap<K, V>
where
  K: Ord,
{
  type Key = K;
  type Value = V;

  fn try_slot<E, F>(&mut self, key: K, make: F) -> Result<Slot<'_, V>, E>
  where
    F: FnOnce(&K) -> Result<V, E>,
  {
    return match self.entry(key) {
      btree_map::Entry::Occupied(o) => Ok(Slot::Existing(o.into_mut())),
      btree_map::Entry::Vacant(v) => {
        let value = make(v.key())?;
        trace!("BTreeMap: inserting value for vacant key");
        Ok(Slot::Inserted(v.insert(value)))
      }
    };
  }

  #[inline(always)]
  fn upsert(&mut self, key: K, value: V) -> Option<V> {
    return self.insert(key, value);
  }
}
