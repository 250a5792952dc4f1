//! Template engine
//!
//! Binds a backend, a class map and a cache, so each template invocation
//! only supplies its fragments and substitutions.

use std::fmt;
use std::rc::Rc;

use crate::backend::Backend;
use crate::cache::TemplateCache;
use crate::fragments::Fragments;
use crate::render::{Rendered, render};
use crate::tree::{ClassMap, Node};
use crate::{Result, Value};

/// Template engine for one backend
pub struct Jsx<B: Backend> {
    backend: B,
    class_map: ClassMap<B::Output>,
    cache: TemplateCache<B::Output>,
}

impl<B: Backend> Jsx<B> {
    /// Engine with no user components
    pub fn new(backend: B) -> Self {
        Self::with_components(backend, ClassMap::new())
    }

    /// Engine resolving capitalized tags through `class_map`
    pub fn with_components(backend: B, class_map: ClassMap<B::Output>) -> Self {
        Self {
            backend,
            class_map,
            cache: TemplateCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn class_map(&self) -> &ClassMap<B::Output> {
        &self.class_map
    }

    pub fn cache(&self) -> &TemplateCache<B::Output> {
        &self.cache
    }

    /// Compiled tree for `fragments`, from the cache when possible
    pub fn compile(&self, fragments: &Fragments) -> Result<Rc<Node<B::Output>>> {
        self.cache.compile(fragments, &self.class_map)
    }

    /// Compile (or reuse) and render one template invocation
    pub fn render(
        &self,
        fragments: &Fragments,
        substitutions: &[Value],
    ) -> Result<Rendered<B::Output>> {
        let tree = self.compile(fragments)?;
        render(&tree, substitutions, &self.backend)
    }
}

impl<B: Backend + fmt::Debug> fmt::Debug for Jsx<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jsx")
            .field("backend", &self.backend)
            .field("class_map", &self.class_map)
            .field("cache", &self.cache)
            .finish()
    }
}
