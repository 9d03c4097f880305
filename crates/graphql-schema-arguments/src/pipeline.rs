//! Ordered middleware applied to a schema element before it is added to the schema.

use std::ops::ControlFlow;

use crate::{BoxError, MiddlewareFailure, RuntimeType};

/// What a handler produces: `Continue` hands the value to the next handler, `Break` stops the
/// pipeline with this value as the result.
pub type Step<P> = ControlFlow<ElementValue<P>, ElementValue<P>>;

/// The working value of a schema element while its middleware runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementValue<P> {
    ty: RuntimeType,
    middleware: Vec<String>,
    payload: P,
}

impl<P> ElementValue<P> {
    pub fn new(ty: RuntimeType, payload: P) -> Self {
        ElementValue {
            ty,
            middleware: Vec::new(),
            payload,
        }
    }

    /// The declared type of the element, resolved before any middleware ran.
    pub fn ty(&self) -> &RuntimeType {
        &self.ty
    }

    /// Names of the middleware that processed this value, in order.
    pub fn middleware(&self) -> &[String] {
        &self.middleware
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    pub fn with_payload(self, payload: P) -> Self {
        ElementValue { payload, ..self }
    }

    pub fn map_payload(self, f: impl FnOnce(P) -> P) -> Self {
        let ElementValue { ty, middleware, payload } = self;
        ElementValue {
            ty,
            middleware,
            payload: f(payload),
        }
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (RuntimeType, Vec<String>, P) {
        (self.ty, self.middleware, self.payload)
    }
}

/// A named step of the pipeline, usually backing a directive.
pub trait Middleware<P> {
    fn name(&self) -> &str;

    /// Transforms the value. Only the payload of the returned value is kept: the declared type and
    /// the list of processed middleware are owned by the pipeline.
    fn apply(&self, value: ElementValue<P>) -> Result<Step<P>, BoxError>;
}

impl<P, M: Middleware<P> + ?Sized> Middleware<P> for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, value: ElementValue<P>) -> Result<Step<P>, BoxError> {
        (**self).apply(value)
    }
}

/// A middleware from a closure.
pub struct FnMiddleware<F> {
    name: String,
    f: F,
}

pub fn middleware_fn<P, F>(name: impl Into<String>, f: F) -> FnMiddleware<F>
where
    F: Fn(ElementValue<P>) -> Result<Step<P>, BoxError>,
{
    FnMiddleware { name: name.into(), f }
}

impl<P, F> Middleware<P> for FnMiddleware<F>
where
    F: Fn(ElementValue<P>) -> Result<Step<P>, BoxError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, value: ElementValue<P>) -> Result<Step<P>, BoxError> {
        (self.f)(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Every handler ran.
    Completed,
    /// A handler asked to stop, the ones after it did not run.
    ShortCircuited { handler: String, position: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome<P> {
    pub value: ElementValue<P>,
    pub completion: Completion,
}

impl<P> PipelineOutcome<P> {
    pub fn is_short_circuited(&self) -> bool {
        matches!(self.completion, Completion::ShortCircuited { .. })
    }

    pub fn into_value(self) -> ElementValue<P> {
        self.value
    }
}

/// Runs `handlers` in order over `initial`.
///
/// The name of a handler is recorded on the value after it returned, whether it continued or
/// short-circuited. A failing handler aborts the whole run; the error carries the value the handler
/// was given.
pub fn run<P, M>(initial: ElementValue<P>, handlers: &[M]) -> Result<PipelineOutcome<P>, MiddlewareFailure<P>>
where
    P: Clone,
    M: Middleware<P>,
{
    let mut value = initial;

    for (position, handler) in handlers.iter().enumerate() {
        let name = handler.name();
        let snapshot = value.clone();

        let step = match handler.apply(value) {
            Ok(step) => step,
            Err(source) => {
                tracing::debug!(handler = name, position, "middleware failed: {source}");

                return Err(MiddlewareFailure {
                    handler: name.to_owned(),
                    position,
                    snapshot,
                    source,
                });
            }
        };

        let (returned, stop) = match step {
            ControlFlow::Continue(returned) => (returned, false),
            ControlFlow::Break(returned) => (returned, true),
        };

        let ElementValue { ty, mut middleware, .. } = snapshot;
        middleware.push(name.to_owned());
        value = ElementValue {
            ty,
            middleware,
            payload: returned.payload,
        };

        if stop {
            tracing::debug!(handler = name, position, "middleware short-circuited");

            return Ok(PipelineOutcome {
                value,
                completion: Completion::ShortCircuited {
                    handler: name.to_owned(),
                    position,
                },
            });
        }

        tracing::trace!(handler = name, position, "middleware applied");
    }

    Ok(PipelineOutcome {
        value,
        completion: Completion::Completed,
    })
}
