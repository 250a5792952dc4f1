//! fOS JSX - markup templates with components
//!
//! Compiles marker-encoded markup into a cached tree and renders it with a
//! substitution array through a pluggable backend:
//!
//! ```text
//! Fragments -> marker codec -> transform -> reduce -> TemplateCache
//!           -> render(tree, substitutions, backend) -> String | fos_dom::Node
//! ```
//!
//! Capitalized tags resolve to user components, which receive resolved
//! attributes and rendered children and may return a pending result.
//!
//! ```ignore
//! let jsx = fos_jsx::jsx_to_text_with(
//!     ClassMap::new().with("Bold", |props| {
//!         Ok(Rendered::Ready(format!("<b>{}</b>", props.children())))
//!     }),
//! );
//! let html = jsx.render(&fragments!("<span>Hello, <Bold>", "</Bold>.</span>"), &["world".into()])?;
//! ```

mod backend;
mod cache;
mod engine;
mod error;
mod fragments;
mod reduce;
mod render;
mod transform;
mod tree;
mod value;

pub use backend::{Backend, DomBackend, StringBackend, element_markup};
pub use cache::TemplateCache;
pub use engine::Jsx;
pub use error::{BoxError, Error, Result};
pub use fos_html::ParseError;
pub use fragments::{Fragments, Segment, decode_markers, marker};
pub use reduce::reduce;
pub use render::{Rendered, render, render_children, resolve_attributes};
pub use transform::{collapse_whitespace, transform};
pub use tree::{
    AttributeValue, Attributes, ClassMap, Component, ComponentFn, ComponentNode, Element,
    FRAGMENT_TAG, Node, Part,
};
pub use value::{Props, Value};

/// Fragments of one call site
///
/// Every evaluation of the same invocation yields the same identity on a
/// given thread, so the template is compiled once.
#[macro_export]
macro_rules! fragments {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        ::std::thread_local! {
            static FRAGMENTS: $crate::Fragments =
                $crate::Fragments::new::<&str>(&[$first $(, $rest)*]);
        }
        FRAGMENTS.with(::std::clone::Clone::clone)
    }};
}

/// Compile `fragments` without caching
pub fn parse<O: 'static>(fragments: &Fragments, class_map: &ClassMap<O>) -> Result<Node<O>> {
    parse_markup(&fragments.join_with_markers(), class_map)
}

/// Compile already-joined markup
pub fn parse_markup<O: 'static>(markup: &str, class_map: &ClassMap<O>) -> Result<Node<O>> {
    Ok(reduce(transform(markup, class_map)?))
}

thread_local! {
    static TEXT: Jsx<StringBackend> = Jsx::new(StringBackend);
    static DOM: Jsx<DomBackend> = Jsx::new(DomBackend);
}

/// Render to markup with the default engine (no user components)
pub fn jsx_to_text(fragments: &Fragments, substitutions: &[Value]) -> Result<Rendered<String>> {
    TEXT.with(|jsx| jsx.render(fragments, substitutions))
}

/// Render to DOM nodes with the default engine (no user components)
pub fn jsx_to_dom(
    fragments: &Fragments,
    substitutions: &[Value],
) -> Result<Rendered<fos_dom::Node>> {
    DOM.with(|jsx| jsx.render(fragments, substitutions))
}

/// Markup engine with its own components and cache
pub fn jsx_to_text_with(class_map: ClassMap<String>) -> Jsx<StringBackend> {
    Jsx::with_components(StringBackend, class_map)
}

/// DOM engine with its own components and cache
pub fn jsx_to_dom_with(class_map: ClassMap<fos_dom::Node>) -> Jsx<DomBackend> {
    Jsx::with_components(DomBackend, class_map)
}
