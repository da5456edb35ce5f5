//! Key lookup shared by the multi-key queries.

use core::borrow::Borrow;
use core::hash::BuildHasher;
use core::hash::Hash;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// A container that can answer whether it holds a key equal to a borrowed
/// `Q`.
///
/// It is implemented by `HashMap` for `Q: Hash + Eq` and by `BTreeMap` for
/// `Q: Ord`, in both cases with the same `Borrow` rules as the container's
/// own `contains_key`, so that `&str` can be looked up in a map keyed by
/// `String`.

pub trait KeyLookup<Q: ?Sized> {
  /// Returns whether the container holds the given key.

  fn has_key(&self, key: &Q) -> bool;
}

impl<K, V, S, Q> KeyLookup<Q> for HashMap<K, V, S>
where
  K: Eq + Hash + Borrow<Q>,
  Q: ?Sized + Eq + Hash,
  S: BuildHasher,
{
  #[inline(always)]
  fn has_key(&self, key: &Q) -> bool {
    return self.contains_key(key);
  }
}

impl<K, V, Q> KeyLookup<Q> for BTreeMap<K, V>
where
  K: Ord + Borrow<Q>,
  Q: ?Sized + Ord,
{
  #[inline(always)]
  fn has_key(&self, key: &Q) -> bool {
    return self.contains_key(key);
  }
}
