//! Renderer
//!
//! Walks a compiled tree together with the substitutions and a backend.
//! Text, references and elements never suspend on their own; only a
//! component returning a pending result does, and that suspension
//! propagates to every ancestor.
//!
//! Children are always rendered eagerly, left to right, before anything is
//! awaited. When some of them are pending the parent waits for all of them
//! and joins the outputs in source order, never in completion order.

use std::fmt;
use std::future::Future;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::backend::{Backend, StringBackend};
use crate::tree::{AttributeValue, Attributes, Node, Part};
use crate::{Error, Props, Result, Value};

/// Output that is either available now or still being produced
pub enum Rendered<T> {
    Ready(T),
    Pending(LocalBoxFuture<'static, Result<T>>),
}

impl<T: 'static> Rendered<T> {
    /// Wrap a future
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + 'static,
    {
        Self::Pending(future.boxed_local())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The value, if it was produced synchronously
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// Wait for the value
    pub async fn resolve(self) -> Result<T> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Pending(future) => future.await,
        }
    }

    /// Transform the value once it is available
    pub fn map<U, F>(self, f: F) -> Rendered<U>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        match self {
            Self::Ready(value) => Rendered::Ready(f(value)),
            Self::Pending(future) => Rendered::pending(async move { future.await.map(f) }),
        }
    }

    /// Chain a step that may itself fail or suspend
    ///
    /// When `self` is ready, `f` runs immediately and its error is returned
    /// directly; otherwise both surface through the pending result.
    pub fn and_then<U, F>(self, f: F) -> Result<Rendered<U>>
    where
        U: 'static,
        F: FnOnce(T) -> Result<Rendered<U>> + 'static,
    {
        match self {
            Self::Ready(value) => f(value),
            Self::Pending(future) => Ok(Rendered::pending(async move {
                let value = future.await?;
                f(value)?.resolve().await
            })),
        }
    }

    /// Combine results, keeping their order
    ///
    /// All ready: ready immediately. Otherwise pending until every item has
    /// settled; the first failure fails the whole join.
    pub fn join_all(items: Vec<Rendered<T>>) -> Rendered<Vec<T>> {
        if !items.iter().any(Rendered::is_pending) {
            return Rendered::Ready(items.into_iter().filter_map(Rendered::into_ready).collect());
        }

        let futures = items.into_iter().map(|item| match item {
            Self::Ready(value) => future::ready(Ok(value)).boxed_local(),
            Self::Pending(future) => future,
        });
        Rendered::pending(future::try_join_all(futures))
    }
}

impl<T: fmt::Debug> fmt::Debug for Rendered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Render `node` with `substitutions` through `backend`
pub fn render<B: Backend>(
    node: &Node<B::Output>,
    substitutions: &[Value],
    backend: &B,
) -> Result<Rendered<B::Output>> {
    match node {
        Node::Text(markup) => backend.render_static(markup).map(Rendered::Ready),
        Node::Reference(index) => {
            let value = substitution(substitutions, *index)?;
            Ok(Rendered::Ready(backend.render_text(value)))
        }
        Node::Element(element) => {
            let attributes = resolve_attributes(&element.attributes, substitutions)?;
            let children = render_children(&element.children, substitutions, backend)?;
            let backend = backend.clone();
            let tag = element.tag.clone();
            Ok(children.map(move |children| backend.render_element(&tag, &attributes, children)))
        }
        Node::Component(node) => {
            let attributes = resolve_attributes(&node.attributes, substitutions)?;
            let values = raw_values(&node.attributes, substitutions)?;
            let children = render_children(&node.children, substitutions, backend)?;
            let component = node.component.clone();
            children.and_then(move |children| {
                tracing::trace!("Invoking component <{}>", component.name());
                component.call(Props::from_parts(attributes, values, children))
            })
        }
    }
}

/// Render every child, then join them through the backend
pub fn render_children<B: Backend>(
    children: &[Node<B::Output>],
    substitutions: &[Value],
    backend: &B,
) -> Result<Rendered<B::Output>> {
    let rendered = children
        .iter()
        .map(|child| render(child, substitutions, backend))
        .collect::<Result<Vec<_>>>()?;
    let backend = backend.clone();
    Ok(Rendered::join_all(rendered).map(move |children| backend.join_children(children)))
}

/// Resolve attributes to strings
///
/// Attribute values are strings whatever the backend; multi-part values are
/// concatenated.
pub fn resolve_attributes(
    attributes: &Attributes,
    substitutions: &[Value],
) -> Result<Vec<(String, String)>> {
    attributes
        .iter()
        .map(|(name, value)| {
            let resolved = match value {
                AttributeValue::Single(part) => resolve_part(part, substitutions)?,
                AttributeValue::Parts(parts) => parts
                    .iter()
                    .map(|part| resolve_part(part, substitutions))
                    .collect::<Result<String>>()?,
            };
            Ok((name.clone(), resolved))
        })
        .collect()
}

fn resolve_part(part: &Part, substitutions: &[Value]) -> Result<String> {
    match part {
        Part::Text(text) => Ok(text.clone()),
        Part::Reference(index) => {
            let value = substitution(substitutions, *index)?;
            Ok(StringBackend.render_text(value))
        }
    }
}

/// Substituted values of single-reference attributes
fn raw_values(attributes: &Attributes, substitutions: &[Value]) -> Result<Vec<(String, Value)>> {
    let mut values = Vec::new();
    for (name, value) in attributes {
        if let AttributeValue::Single(Part::Reference(index)) = value {
            values.push((name.clone(), substitution(substitutions, *index)?.clone()));
        }
    }
    Ok(values)
}

fn substitution(substitutions: &[Value], index: usize) -> Result<&Value> {
    substitutions.get(index).ok_or(Error::MissingSubstitution {
        index,
        len: substitutions.len(),
    })
}
