//! Cancellation Capability
//!
//! The single-use right to stop a live push subscription and release whatever
//! backs it (listeners, sockets, channels).

/// A cancellation capability handed out by a subscription API.
///
/// `unsubscribe` consumes the box, so it can run at most once. Errors are
/// opaque to the registry; it logs them and treats the subscription as
/// cancelled anyway.
pub trait Unsubscribe: Send {
    fn unsubscribe(self: Box<Self>) -> anyhow::Result<()>;
}

impl<F> Unsubscribe for F
where
    F: FnOnce() -> anyhow::Result<()> + Send,
{
    fn unsubscribe(self: Box<Self>) -> anyhow::Result<()> {
        (*self)()
    }
}

/// Boxes an infallible closure as a cancellation capability.
pub fn unsubscribe_fn<F>(f: F) -> Box<dyn Unsubscribe>
where
    F: FnOnce() + Send + 'static,
{
    Box::new(move || {
        f();
        Ok::<(), anyhow::Error>(())
    })
}

/// Boxes a fallible closure as a cancellation capability.
pub fn try_unsubscribe_fn<F>(f: F) -> Box<dyn Unsubscribe>
where
    F: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    Box::new(f)
}
