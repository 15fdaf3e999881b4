//! Shared test infrastructure for the inventory crates.
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic names and codes
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let nombre = builder.name("categoria", "main");
//!     let codigo = builder.codigo("a");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded generator so repeated runs of a test produce the same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the hash of a test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_producto");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`, short enough for a 100-char name column.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).name("marca", "main");
    /// assert_eq!(name, "test-marca-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Product code unique per seed and suffix, within the 3..=50 char limit.
    pub fn codigo(&self, suffix: &str) -> String {
        format!("P{:06}-{}", self.seed % 1_000_000, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap `value`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `items` is sorted by `key`.
    pub fn assert_sorted_by<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K, context: &str) {
        let sorted = items.windows(2).all(|w| key(&w[0]) <= key(&w[1]));
        assert!(sorted, "{}: items are not sorted", context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.name("categoria", "x"), b.name("categoria", "x"));
        assert_eq!(a.codigo("x"), b.codigo("x"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.name("marca", "main"), b.name("marca", "main"));
    }

    #[test]
    fn test_codigo_fits_column() {
        let codigo = TestDataBuilder::new(u64::MAX).codigo("suffix");
        assert!((3..=50).contains(&codigo.len()));
    }

    #[test]
    fn test_assert_sorted_by() {
        assertions::assert_sorted_by(&[1, 2, 2, 5], |n| *n, "numbers");
    }

    #[test]
    #[should_panic(expected = "expected Some")]
    fn test_assert_some_panics_on_none() {
        assertions::assert_some::<i32>(None, "missing");
    }
}
