//! Template cache
//!
//! Compiled trees keyed by the identity of their `Fragments`. An entry holds
//! only a weak handle to its fragments, so it is dropped once the call site's
//! fragments are gone.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::fragments::Fragments;
use crate::tree::{ClassMap, Node};
use crate::{Result, reduce, transform};

struct CacheEntry<O> {
    fragments: Weak<[Box<str>]>,
    tree: Rc<Node<O>>,
}

impl<O> CacheEntry<O> {
    fn is_live(&self) -> bool {
        self.fragments.strong_count() > 0
    }
}

/// Identity-keyed cache of compiled trees
pub struct TemplateCache<O> {
    entries: RefCell<HashMap<usize, CacheEntry<O>>>,
}

impl<O: 'static> TemplateCache<O> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Cached tree for `fragments`, if compiled and still live
    pub fn get(&self, fragments: &Fragments) -> Option<Rc<Node<O>>> {
        let entries = self.entries.borrow();
        let entry = entries.get(&fragments.key())?;
        entry.is_live().then(|| Rc::clone(&entry.tree))
    }

    /// Compiled tree for `fragments`, compiling on first use
    ///
    /// Nothing is stored when compilation fails.
    pub fn compile(&self, fragments: &Fragments, class_map: &ClassMap<O>) -> Result<Rc<Node<O>>> {
        if let Some(tree) = self.get(fragments) {
            tracing::trace!("Template cache hit ({} fragments)", fragments.len());
            return Ok(tree);
        }

        let markup = fragments.join_with_markers();
        tracing::debug!("Compiling template: {} bytes, {} slots", markup.len(), fragments.slot_count());
        let tree = Rc::new(reduce(transform(&markup, class_map)?));

        self.purge();
        self.entries.borrow_mut().insert(fragments.key(), CacheEntry {
            fragments: fragments.downgrade(),
            tree: Rc::clone(&tree),
        });
        Ok(tree)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.borrow().values().filter(|entry| entry.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose fragments have been dropped
    pub fn purge(&self) {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live());
        let reclaimed = before - entries.len();
        if reclaimed > 0 {
            tracing::trace!("Reclaimed {} template cache entries", reclaimed);
        }
    }
}

impl<O: 'static> Default for TemplateCache<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for TemplateCache<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("entries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Rendered};

    #[test]
    fn test_compile_once_per_identity() {
        let cache: TemplateCache<String> = TemplateCache::new();
        let map = ClassMap::new();
        let fragments = Fragments::new(&["<div>", "</div>"]);

        let first = cache.compile(&fragments, &map).unwrap();
        let second = cache.compile(&fragments.clone(), &map).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_equal_text_is_a_distinct_entry() {
        let cache: TemplateCache<String> = TemplateCache::new();
        let map = ClassMap::new();
        let a = Fragments::new(&["<i>", "</i>"]);
        let b = Fragments::new(&["<i>", "</i>"]);

        let tree_a = cache.compile(&a, &map).unwrap();
        let tree_b = cache.compile(&b, &map).unwrap();
        assert!(!Rc::ptr_eq(&tree_a, &tree_b));
        assert_eq!(tree_a, tree_b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_dropped_fragments_are_reclaimed() {
        let cache: TemplateCache<String> = TemplateCache::new();
        let map = ClassMap::new();
        let kept = Fragments::new(&["<b>", "</b>"]);
        cache.compile(&kept, &map).unwrap();
        {
            let temporary = Fragments::new(&["<u>", "</u>"]);
            cache.compile(&temporary, &map).unwrap();
            assert_eq!(cache.len(), 2);
        }
        assert_eq!(cache.len(), 1);
        cache.purge();
        assert!(cache.get(&kept).is_some());
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache: TemplateCache<String> = TemplateCache::new();
        let fragments = Fragments::new(&["<Missing>", "</Missing>"]);

        let err = cache.compile(&fragments, &ClassMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnresolvedComponent { .. }));
        assert!(cache.is_empty());

        let map = ClassMap::new()
            .with("Missing", |props| Ok(Rendered::Ready(props.into_children())));
        assert!(cache.compile(&fragments, &map).is_ok());
        assert_eq!(cache.len(), 1);
    }
}
