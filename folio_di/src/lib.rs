#[cfg(test)]
extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

/// A container that knows how to construct services and caches every
/// instance it builds, so each service exists at most once per provider.
pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    provider! {
        TestProvider {
            counter: Arc<AtomicUsize>,
        }
    }

    #[derive(Clone)]
    struct Counted(usize);

    impl Build<TestProvider> for Counted {
        fn build(provider: &mut TestProvider) -> Self {
            if let Some(cached) = provider.cache().get::<Self>() {
                return cached.clone();
            }
            let counter: Arc<AtomicUsize> = provider.provide();
            let value = Self(counter.fetch_add(1, Ordering::SeqCst));
            provider.cache().insert(value.clone());
            value
        }
    }

    #[derive(Clone, Build)]
    struct Service {
        a: Counted,
        b: Counted,
        #[state]
        state: Arc<()>,
    }

    #[test]
    fn builds_each_dependency_once() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            counter: Default::default(),
        };

        let service: Service = provider.provide();

        assert_eq!(service.a.0, 0);
        assert_eq!(service.b.0, 0);
        assert_eq!(provider.counter.load(Ordering::SeqCst), 1);
    }
}
