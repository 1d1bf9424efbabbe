//! Slice-level assertions.

use std::fmt::Debug;

/// Panics unless `a` and `b` have the same length and equal elements.
#[track_caller]
pub fn slice_eq<T: PartialEq + Debug>(a: &[T], b: &[T]) {
    if a.len() != b.len() {
        panic!(
            "slice lengths differ: {} != {}\n  a: {:?}\n  b: {:?}",
            a.len(),
            b.len(),
            a,
            b
        );
    }
    if let Some(i) = a.iter().zip(b).position(|(x, y)| x != y) {
        panic!("slices differ at index {}: {:?} != {:?}", i, a[i], b[i]);
    }
}

/// Panics unless `value` is an element of `s`.
#[track_caller]
pub fn slice_contains<T: PartialEq + Debug>(s: &[T], value: &T) {
    if !s.contains(value) {
        panic!("{:?} not found in {:?}", value, s);
    }
}

/// Panics unless `s` is sorted in ascending order. Equal neighbours are allowed.
#[track_caller]
pub fn slice_sorted<T: PartialOrd + Debug>(s: &[T]) {
    if let Some(i) = s.windows(2).position(|w| w[1] < w[0]) {
        panic!(
            "slice not sorted at index {}, {}: {:?} > {:?}",
            i,
            i + 1,
            s[i],
            s[i + 1]
        );
    }
}
