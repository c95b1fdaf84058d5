//! The caster abstraction.
//!
//! A [`Caster`] turns `(context, phrase)` into a [`CastResult`]. Every caster
//! returns a boxed future, so callers always `.await` regardless of whether
//! the caster performs I/O. Synchronous casters are wrapped in a ready future
//! by [`sync_caster`].
//!
//! Any async closure with the right shape is a caster:
//!
//! ```rust,ignore
//! use castkit_framework::{caster_fn, sync_caster, Value};
//!
//! let shout = sync_caster(|_ctx, phrase| {
//!     Ok((!phrase.is_empty()).then(|| Value::String(format!("{phrase}!"))))
//! });
//!
//! let remote = caster_fn(|ctx, phrase| async move {
//!     Ok(ctx.client().fetch_invite(&phrase).await.ok().map(Value::Invite))
//! });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use castkit_core::CastContext;

use crate::error::CastResult;

/// A type-erased argument caster.
pub trait Caster: Send + Sync + 'static {
    /// Casts `phrase` within `ctx`.
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult>;
}

/// A shared, type-erased caster as stored in the registry.
pub type BoxedCaster = Arc<dyn Caster>;

/// Adapter for async closures.
pub struct CasterFn<F> {
    f: F,
}

impl<F, Fut> Caster for CasterFn<F>
where
    F: Fn(Arc<CastContext>, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CastResult> + Send + 'static,
{
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        (self.f)(ctx, phrase).boxed()
    }
}

impl<F> fmt::Debug for CasterFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CasterFn")
    }
}

/// Adapter for synchronous functions.
pub struct SyncCaster<F> {
    f: F,
}

impl<F> Caster for SyncCaster<F>
where
    F: Fn(&CastContext, &str) -> CastResult + Send + Sync + 'static,
{
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready((self.f)(&ctx, &phrase)).boxed()
    }
}

impl<F> fmt::Debug for SyncCaster<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncCaster")
    }
}

/// Wraps an async closure into a [`BoxedCaster`].
pub fn caster_fn<F, Fut>(f: F) -> BoxedCaster
where
    F: Fn(Arc<CastContext>, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CastResult> + Send + 'static,
{
    Arc::new(CasterFn { f })
}

/// Wraps a synchronous function into a [`BoxedCaster`] returning a ready future.
pub fn sync_caster<F>(f: F) -> BoxedCaster
where
    F: Fn(&CastContext, &str) -> CastResult + Send + Sync + 'static,
{
    Arc::new(SyncCaster { f })
}

/// Erases a concrete [`Caster`] implementation.
pub fn into_caster<C: Caster>(caster: C) -> BoxedCaster {
    Arc::new(caster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dm_context, guild_context};
    use crate::value::Value;

    #[tokio::test]
    async fn test_sync_caster_is_ready() {
        let caster = sync_caster(|_ctx, phrase| Ok(Some(Value::String(phrase.repeat(2)))));
        let result = caster.cast(dm_context(), "ab".into()).await.unwrap();
        assert_eq!(result.unwrap().as_string().map(String::as_str), Some("abab"));
    }

    #[tokio::test]
    async fn test_caster_fn_reads_context() {
        let caster = caster_fn(|ctx, _phrase| async move {
            Ok(ctx.guild().map(|g| Value::String(g.name.clone())))
        });
        let in_guild = caster.cast(guild_context(), String::new()).await.unwrap();
        assert!(in_guild.is_some());

        let in_dm = caster.cast(dm_context(), String::new()).await.unwrap();
        assert!(in_dm.is_none());
    }

    #[test]
    fn test_into_caster_custom_impl() {
        struct Always;

        impl Caster for Always {
            fn cast(
                &self,
                _ctx: Arc<CastContext>,
                _phrase: String,
            ) -> BoxFuture<'static, CastResult> {
                future::ready(Ok(Some(Value::Integer(7)))).boxed()
            }
        }

        let caster = into_caster(Always);
        let value = tokio_test::block_on(caster.cast(dm_context(), "x".into())).unwrap();
        assert_eq!(value.and_then(|v| v.as_integer().copied()), Some(7));
    }
}
