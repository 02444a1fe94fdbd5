#[cfg(feature = "threadsafe")]
pub(crate) mod inner {
    use std::sync::OnceLock;

    /// Compute-once cell; concurrent initializers block until the first completes.
    #[derive(Default)]
    pub(crate) struct Once<T>(OnceLock<T>);

    impl<T> Once<T> {
        pub(crate) fn new() -> Self {
            Self(OnceLock::new())
        }

        pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
            self.0.get_or_init(init)
        }
    }
}

#[cfg(not(feature = "threadsafe"))]
pub(crate) mod inner {
    use std::cell::OnceCell;

    #[derive(Default)]
    pub(crate) struct Once<T>(OnceCell<T>);

    impl<T> Once<T> {
        pub(crate) fn new() -> Self {
            Self(OnceCell::new())
        }

        pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
            self.0.get_or_init(init)
        }
    }
}

pub(crate) use inner::Once;
