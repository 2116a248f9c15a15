mod macros;

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use folio_utils::Apply;
    /// fn with_suffix(s: String, suffix: Option<&str>) -> String {
    ///     s.apply_map(suffix, |s, suffix| s + suffix)
    /// }
    /// assert_eq!(with_suffix("folio".into(), None), "folio");
    /// assert_eq!(with_suffix("folio".into(), Some(".rs")), "folio.rs");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}
