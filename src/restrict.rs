//! # Ready-made restrictor predicates.
//!
//! Factories for the predicates a [`Requirement`](crate::Requirement)
//! applies to an already-parsed value. All of them are pure and stateless:
//! each call returns a fresh `impl Fn(&T) -> bool` that can be handed to
//! [`Requirement::restrict`](crate::Requirement::restrict).
//!
//! ```
//! use menuflow::restrict;
//!
//! let adult = restrict::in_range(18_i64, 130);
//! assert!(adult(&42));
//! assert!(!adult(&7));
//!
//! let yes_no = restrict::one_of_ignore_case(vec!["yes".into(), "no".into()]);
//! assert!(yes_no(&"YES".to_string()));
//! ```

/// Accepts values in `[lo, hi]` (both inclusive).
///
/// # Panics
/// Panics if `lo > hi`: an impossible range is an author bug, not an
/// input problem.
pub fn in_range<T>(lo: T, hi: T) -> impl Fn(&T) -> bool
where
    T: PartialOrd + Copy,
{
    assert!(lo <= hi, "in_range: lo must not exceed hi");
    move |x| lo <= *x && *x <= hi
}

/// Accepts values greater than or equal to `lo`.
pub fn min<T>(lo: T) -> impl Fn(&T) -> bool
where
    T: PartialOrd + Copy,
{
    move |x| *x >= lo
}

/// Accepts values less than or equal to `hi`.
pub fn max<T>(hi: T) -> impl Fn(&T) -> bool
where
    T: PartialOrd + Copy,
{
    move |x| *x <= hi
}

/// Accepts values equal to one of `allowed`.
pub fn one_of<T>(allowed: Vec<T>) -> impl Fn(&T) -> bool
where
    T: PartialEq,
{
    move |x| allowed.iter().any(|a| a == x)
}

/// Accepts strings matching one of `allowed`, ignoring ASCII case.
pub fn one_of_ignore_case(allowed: Vec<String>) -> impl Fn(&String) -> bool {
    move |x| allowed.iter().any(|a| a.eq_ignore_ascii_case(x))
}

/// Accepts strings starting with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> impl Fn(&String) -> bool {
    let prefix = prefix.into();
    move |x| x.starts_with(&prefix)
}

/// Accepts strings ending with `suffix`.
pub fn ends_with(suffix: impl Into<String>) -> impl Fn(&String) -> bool {
    let suffix = suffix.into();
    move |x| x.ends_with(&suffix)
}

/// Accepts strings containing none of `forbidden`.
pub fn not_containing(forbidden: Vec<String>) -> impl Fn(&String) -> bool {
    move |x| !forbidden.iter().any(|f| x.contains(f.as_str()))
}

/// Accepts strings of at least `len` characters.
pub fn min_len(len: usize) -> impl Fn(&String) -> bool {
    move |x| x.chars().count() >= len
}

/// Accepts strings of at most `len` characters.
pub fn max_len(len: usize) -> impl Fn(&String) -> bool {
    move |x| x.chars().count() <= len
}
