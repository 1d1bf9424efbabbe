//! Assertion helpers for test code.
//!
//! Every helper panics when its expectation does not hold, with a message
//! stating the relation that was expected, e.g. `3 > 5` for a failed
//! [`gt(3, 5)`](gt). All helpers are `#[track_caller]`, so the panic points at
//! the call site rather than at this module.
//!
//! Each helper has a `_msg` twin taking a context string that is put in front
//! of the panic text, so a failing row of a table test names itself:
//! `gt_msg(1, 2, "row 3")` panics with `row 3: 1 > 2`. An empty context is
//! the same as none.
//!
//! Ordering helpers are written in terms of the relation that must hold, so
//! unordered values such as `f64::NAN` always fail.

use std::any::Any;
use std::cmp::Ordering;
use std::error::Error as StdError;
use std::fmt::{self, Debug};
use std::panic::{self, AssertUnwindSafe};

pub mod catch;
pub mod slice;

pub use catch::{Panicked, catch, catch_as};
pub use slice::{slice_contains, slice_eq, slice_sorted};

#[track_caller]
fn fail(msg: &str, base: fmt::Arguments<'_>) -> ! {
    if msg.is_empty() {
        panic!("{}", base)
    } else {
        panic!("{}: {}", msg, base)
    }
}

#[track_caller]
fn fail_cmp<A: Debug + ?Sized, B: Debug + ?Sized>(msg: &str, op: &str, a: &A, b: &B) -> ! {
    fail(msg, format_args!("{:?} {} {:?}", a, op, b))
}

/// Panics unless `a == b`.
#[track_caller]
pub fn eq<A, B>(a: A, b: B)
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    eq_msg(a, b, "")
}

/// [`eq`] with a context prefix.
#[track_caller]
pub fn eq_msg<A, B>(a: A, b: B, msg: &str)
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    if a != b {
        fail_cmp(msg, "==", &a, &b);
    }
}

/// Panics if `a == b`.
#[track_caller]
pub fn not_eq<A, B>(a: A, b: B)
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    not_eq_msg(a, b, "")
}

/// [`not_eq`] with a context prefix.
#[track_caller]
pub fn not_eq_msg<A, B>(a: A, b: B, msg: &str)
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    if a == b {
        fail_cmp(msg, "!=", &a, &b);
    }
}

/// Panics unless `a > b`.
#[track_caller]
pub fn gt<T: PartialOrd + Debug>(a: T, b: T) {
    gt_msg(a, b, "")
}

/// [`gt`] with a context prefix.
#[track_caller]
pub fn gt_msg<T: PartialOrd + Debug>(a: T, b: T, msg: &str) {
    if !matches!(a.partial_cmp(&b), Some(Ordering::Greater)) {
        fail_cmp(msg, ">", &a, &b);
    }
}

/// Panics unless `a < b`.
#[track_caller]
pub fn lt<T: PartialOrd + Debug>(a: T, b: T) {
    lt_msg(a, b, "")
}

/// [`lt`] with a context prefix.
#[track_caller]
pub fn lt_msg<T: PartialOrd + Debug>(a: T, b: T, msg: &str) {
    if !matches!(a.partial_cmp(&b), Some(Ordering::Less)) {
        fail_cmp(msg, "<", &a, &b);
    }
}

/// Panics unless `a >= b`.
#[track_caller]
pub fn gte<T: PartialOrd + Debug>(a: T, b: T) {
    gte_msg(a, b, "")
}

/// [`gte`] with a context prefix.
#[track_caller]
pub fn gte_msg<T: PartialOrd + Debug>(a: T, b: T, msg: &str) {
    if !matches!(a.partial_cmp(&b), Some(Ordering::Greater | Ordering::Equal)) {
        fail_cmp(msg, ">=", &a, &b);
    }
}

/// Panics unless `a <= b`.
#[track_caller]
pub fn lte<T: PartialOrd + Debug>(a: T, b: T) {
    lte_msg(a, b, "")
}

/// [`lte`] with a context prefix.
#[track_caller]
pub fn lte_msg<T: PartialOrd + Debug>(a: T, b: T, msg: &str) {
    if !matches!(a.partial_cmp(&b), Some(Ordering::Less | Ordering::Equal)) {
        fail_cmp(msg, "<=", &a, &b);
    }
}

/// Panics unless `low < a < high`.
#[track_caller]
pub fn between<T: PartialOrd + Debug>(a: T, low: T, high: T) {
    between_msg(a, low, high, "")
}

/// [`between`] with a context prefix.
#[track_caller]
pub fn between_msg<T: PartialOrd + Debug>(a: T, low: T, high: T, msg: &str) {
    gt_msg(&a, &low, msg);
    lt_msg(&a, &high, msg);
}

/// Panics unless `low <= a <= high`.
#[track_caller]
pub fn between_inclusive<T: PartialOrd + Debug>(a: T, low: T, high: T) {
    between_inclusive_msg(a, low, high, "")
}

/// [`between_inclusive`] with a context prefix.
#[track_caller]
pub fn between_inclusive_msg<T: PartialOrd + Debug>(a: T, low: T, high: T, msg: &str) {
    gte_msg(&a, &low, msg);
    lte_msg(&a, &high, msg);
}

/// Panics if `value` is `Some`.
#[track_caller]
pub fn none<T: Debug>(value: &Option<T>) {
    none_msg(value, "")
}

/// [`none`] with a context prefix.
#[track_caller]
pub fn none_msg<T: Debug>(value: &Option<T>, msg: &str) {
    if let Some(v) = value {
        fail(msg, format_args!("{:?} != None", v));
    }
}

/// Returns the contents of `value`, panicking on `None`.
#[track_caller]
pub fn some<T>(value: Option<T>) -> T {
    some_msg(value, "")
}

/// [`some`] with a context prefix.
#[track_caller]
pub fn some_msg<T>(value: Option<T>, msg: &str) -> T {
    match value {
        Some(v) => v,
        None => fail(msg, format_args!("expected Some, got None")),
    }
}

/// Returns the success value of `result`, panicking with the error otherwise.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    must_msg(result, "")
}

/// [`must`] with a context prefix.
#[track_caller]
pub fn must_msg<T, E: Debug>(result: Result<T, E>, msg: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => fail(msg, format_args!("expected Ok, got Err({:?})", e)),
    }
}

/// Returns `value` as a `T`, panicking when it holds another type.
#[track_caller]
pub fn is<T: Any>(value: &dyn Any) -> &T {
    is_msg(value, "")
}

/// [`is`] with a context prefix.
#[track_caller]
pub fn is_msg<'a, T: Any>(value: &'a dyn Any, msg: &str) -> &'a T {
    match value.downcast_ref::<T>() {
        Some(v) => v,
        None => fail(
            msg,
            format_args!("value is not a {}", std::any::type_name::<T>()),
        ),
    }
}

/// Panics unless `err` or something in its source chain is an `E`.
#[track_caller]
pub fn err_is<E: StdError + 'static>(err: &(dyn StdError + 'static)) {
    err_is_msg::<E>(err, "")
}

/// [`err_is`] with a context prefix.
#[track_caller]
pub fn err_is_msg<E: StdError + 'static>(err: &(dyn StdError + 'static), msg: &str) {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<E>() {
            return;
        }
        current = e.source();
    }
    fail(
        msg,
        format_args!("{} is not {}", err, std::any::type_name::<E>()),
    );
}

/// Panics unless `f` panics.
#[track_caller]
pub fn panics<F: FnOnce()>(f: F) {
    panics_msg(f, "")
}

/// [`panics`] with a context prefix.
#[track_caller]
pub fn panics_msg<F: FnOnce()>(f: F, msg: &str) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_ok() {
        fail(
            msg,
            format_args!(
                "expected {} to panic but it did not",
                std::any::type_name::<F>()
            ),
        );
    }
}
