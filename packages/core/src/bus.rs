//! The service bus: ordered handler chains, one per request kind.
//!
//! Handlers are registered from low level to high level. A dispatch starts
//! at the most recently registered handler for the request's kind; each
//! handler either answers, or passes the request (possibly rewritten) to the
//! handler registered before it through [`Next`]. When the chain runs out the
//! dispatch fails with [`Error::UnhandledRequest`].
//!
//! ```text
//! register: WriteFile(plain), WriteFile(gzip)
//! dispatch: gzip --next--> plain --next--> UnhandledRequest
//! ```
//!
//! The bus is built once through [`ServiceBusBuilder`] and is immutable
//! afterwards; share it behind an `Arc`.

use std::any::{Any, TypeId};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::request::{Request, RequestKind, Response};
use crate::Error;

/// Nested dispatches allowed on one thread before the bus gives up.
pub const MAX_DISPATCH_DEPTH: usize = 10;

/// Serves requests of kind `K`.
///
/// # Object Safety
///
/// This trait is object-safe: the bus stores `Box<dyn Handler<K>>`.
pub trait Handler<K: RequestKind>: Send + Sync {
    /// Human readable description, shown by [`ServiceBus::handlers`].
    fn description(&self) -> &str;

    /// Answer `request`, or hand it to `next`.
    ///
    /// `bus` is the bus performing the dispatch, for delegating to a
    /// different request kind.
    fn handle(&self, request: Request<K>, next: Next<'_, K>, bus: &ServiceBus) -> Response<K>;
}

/// The rest of a handler chain.
pub struct Next<'a, K: RequestKind> {
    remaining: &'a [Box<dyn Handler<K>>],
    bus: &'a ServiceBus,
}

impl<K: RequestKind> Next<'_, K> {
    /// Pass the request to the next handler in the chain.
    pub fn run(self, request: Request<K>) -> Response<K> {
        match self.remaining.split_last() {
            Some((handler, rest)) => {
                trace!(kind = K::NAME, handler = handler.description(), "consulting handler");
                let next = Next {
                    remaining: rest,
                    bus: self.bus,
                };
                handler.handle(request, next, self.bus)
            }
            None => {
                let url = request.url().map(|url| url.to_string());
                warn!(kind = K::NAME, url = ?url, "no handler claimed the request");
                Err(Error::UnhandledRequest { kind: K::NAME, url })
            }
        }
    }

    /// Number of handlers still reachable through this continuation.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

/// Registration record, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerInfo {
    pub kind: &'static str,
    pub description: String,
}

/// Adapts a closure into a [`Handler`].
pub struct FnHandler<K, F> {
    description: String,
    f: F,
    _kind: PhantomData<fn() -> K>,
}

/// Build a handler from a closure.
///
/// ```rust
/// use urlio_core::{handler_fn, Inflate, ServiceBus};
///
/// let mut builder = ServiceBus::builder();
/// builder.register(handler_fn::<Inflate, _>("echo", |request, _next, _bus| {
///     Ok(String::from_utf8_lossy(&request.params.data).into_owned())
/// }));
/// let bus = builder.build();
/// assert_eq!(bus.handlers().len(), 1);
/// ```
pub fn handler_fn<K, F>(description: impl Into<String>, f: F) -> FnHandler<K, F>
where
    K: RequestKind,
    F: Fn(Request<K>, Next<'_, K>, &ServiceBus) -> Response<K> + Send + Sync,
{
    FnHandler {
        description: description.into(),
        f,
        _kind: PhantomData,
    }
}

impl<K, F> Handler<K> for FnHandler<K, F>
where
    K: RequestKind,
    F: Fn(Request<K>, Next<'_, K>, &ServiceBus) -> Response<K> + Send + Sync,
{
    fn description(&self) -> &str {
        &self.description
    }

    fn handle(&self, request: Request<K>, next: Next<'_, K>, bus: &ServiceBus) -> Response<K> {
        (self.f)(request, next, bus)
    }
}

type ChainMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// Collects handlers before the bus is frozen.
#[derive(Default)]
pub struct ServiceBusBuilder {
    registrations: Vec<HandlerInfo>,
    chains: ChainMap,
}

impl ServiceBusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for kind `K`. Later registrations are consulted first.
    pub fn register<K, H>(&mut self, handler: H) -> &mut Self
    where
        K: RequestKind,
        H: Handler<K> + 'static,
    {
        self.registrations.push(HandlerInfo {
            kind: K::NAME,
            description: handler.description().to_string(),
        });

        let chain = self
            .chains
            .entry(TypeId::of::<K>())
            .or_insert_with(|| {
                Box::new(Vec::<Box<dyn Handler<K>>>::new()) as Box<dyn Any + Send + Sync>
            });

        // The entry for TypeId::of::<K>() only ever holds a chain of K.
        if let Some(chain) = chain.downcast_mut::<Vec<Box<dyn Handler<K>>>>() {
            chain.push(Box::new(handler));
        }
        self
    }

    pub fn build(self) -> ServiceBus {
        ServiceBus {
            registrations: self.registrations,
            chains: self.chains,
        }
    }
}

/// Dispatches typed requests through their handler chains.
pub struct ServiceBus {
    registrations: Vec<HandlerInfo>,
    chains: ChainMap,
}

thread_local! {
    static DISPATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter<K: RequestKind>() -> Result<Self, Error> {
        DISPATCH_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DISPATCH_DEPTH {
                return Err(Error::DepthExceeded {
                    kind: K::NAME,
                    depth: current,
                });
            }
            depth.set(current + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DISPATCH_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

impl ServiceBus {
    pub fn builder() -> ServiceBusBuilder {
        ServiceBusBuilder::new()
    }

    /// Every registered handler, in registration order.
    pub fn handlers(&self) -> &[HandlerInfo] {
        &self.registrations
    }

    /// Dispatch a request to the chain for its kind.
    pub fn dispatch<K: RequestKind>(&self, request: Request<K>) -> Response<K> {
        debug!(
            kind = K::NAME,
            url = request.url().map(|url| url.as_str()),
            "dispatch"
        );
        let _guard = DepthGuard::enter::<K>()?;
        let next = Next {
            remaining: self.chain::<K>(),
            bus: self,
        };
        next.run(request)
    }

    fn chain<K: RequestKind>(&self) -> &[Box<dyn Handler<K>>] {
        self.chains
            .get(&TypeId::of::<K>())
            .and_then(|chain| chain.downcast_ref::<Vec<Box<dyn Handler<K>>>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Debug for ServiceBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBus")
            .field("handlers", &self.registrations)
            .finish()
    }
}
