use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

type Scope = HashMap<String, Value>;

/// One scope frame, linked to the frame it was pushed on top of.
struct Frame<'a> {
    scope: &'a Scope,
    parent: Option<Rc<Frame<'a>>>,
}

/// Resolves names against a stack of scopes.
///
/// The stack is a persistent list: entering an object or an array element
/// returns a new table that shares every outer frame with its parent, so
/// sibling sections never see each other's scopes.
#[derive(Clone, Default)]
pub(crate) struct SymTab<'a> {
    frames: Option<Rc<Frame<'a>>>,
    /// Current array element, set only inside an array of non-maps.
    elem: Option<&'a Value>,
}

impl<'a> SymTab<'a> {
    /// Creates a table whose only scope is `root`. A root that is not a map
    /// leaves the table empty so every lookup misses.
    pub fn new(root: &'a Value) -> Self {
        match root {
            Value::Map(scope) => SymTab::default().enter_object(scope),
            _ => SymTab::default(),
        }
    }

    /// Scopes from innermost to outermost.
    fn scopes(&self) -> impl Iterator<Item = &'a Scope> + '_ {
        std::iter::successors(self.frames.as_deref(), |frame| frame.parent.as_deref())
            .map(|frame| frame.scope)
    }

    /// The value bound to `key` in the innermost scope that has it.
    fn resolve(&self, key: &str) -> Option<&'a Value> {
        self.scopes().find_map(|scope| scope.get(key))
    }

    pub fn ifdef(&self, key: &str) -> bool {
        if key.is_empty() && self.elem.is_some() {
            return true;
        }
        self.resolve(key).is_some()
    }

    pub fn ifndef(&self, key: &str) -> bool {
        !self.ifdef(key)
    }

    /// Default string rendering of `key`; unresolved names print nothing.
    pub fn print(&self, key: &str) -> String {
        let value = match self.elem {
            Some(elem) if key.is_empty() => Some(elem),
            _ => self.resolve(key),
        };
        value.map(Value::to_string).unwrap_or_default()
    }

    /// The non-empty list bound to `key`. A non-list in an inner scope
    /// shadows lists further out.
    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        match self.resolve(key)? {
            Value::List(list) if !list.is_empty() => Some(list),
            _ => None,
        }
    }

    /// The non-empty map bound to `key`, with the same shadowing as `array`.
    pub fn object(&self, key: &str) -> Option<&'a Scope> {
        match self.resolve(key)? {
            Value::Map(map) if !map.is_empty() => Some(map),
            _ => None,
        }
    }

    pub fn enter_object(&self, scope: &'a Scope) -> SymTab<'a> {
        SymTab {
            frames: Some(Rc::new(Frame {
                scope,
                parent: self.frames.clone(),
            })),
            elem: None,
        }
    }

    pub fn enter_array_elem(&self, elem: &'a Value) -> SymTab<'a> {
        SymTab {
            frames: self.frames.clone(),
            elem: Some(elem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ToValue;

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_ifdef_ifndef() {
        let root = map(vec![("a", "b".to_value()), ("n", Value::Null)]);
        let st = SymTab::new(&root);
        assert!(st.ifdef("a"));
        assert!(!st.ifndef("a"));
        assert!(st.ifdef("n"));
        assert!(st.ifndef("missing"));
        assert!(!st.ifdef(""));
    }

    #[test]
    fn test_print() {
        let root = map(vec![("a", "b".to_value()), ("n", 7i32.to_value())]);
        let st = SymTab::new(&root);
        assert_eq!(st.print("a"), "b");
        assert_eq!(st.print("n"), "7");
        assert_eq!(st.print("missing"), "");
        assert_eq!(st.print(""), "");
    }

    #[test]
    fn test_array() {
        let root = map(vec![
            ("a", vec![1i64, 2].to_value()),
            ("empty", Value::List(vec![])),
            ("s", "x".to_value()),
        ]);
        let st = SymTab::new(&root);
        assert_eq!(st.array("a").map(|l| l.len()), Some(2));
        assert!(st.array("empty").is_none());
        assert!(st.array("s").is_none());
        assert!(st.array("missing").is_none());
    }

    #[test]
    fn test_object() {
        let root = map(vec![
            ("a", map(vec![("b", "c".to_value())])),
            ("empty", map(vec![])),
            ("l", vec![1i64].to_value()),
        ]);
        let st = SymTab::new(&root);
        assert!(st.object("a").is_some());
        assert!(st.object("empty").is_none());
        assert!(st.object("l").is_none());
    }

    #[test]
    fn test_inner_scope_shadows() {
        let inner = map(vec![("a", "inner".to_value()), ("list", "scalar".to_value())]);
        let root = map(vec![
            ("a", "outer".to_value()),
            ("b", "outer-b".to_value()),
            ("list", vec![1i64].to_value()),
        ]);
        let st = SymTab::new(&root);
        let Value::Map(inner_scope) = &inner else {
            unreachable!()
        };
        let nested = st.enter_object(inner_scope);

        assert_eq!(nested.print("a"), "inner");
        assert_eq!(nested.print("b"), "outer-b");
        // A scalar under the same key hides the outer list.
        assert!(nested.array("list").is_none());
        assert!(st.array("list").is_some());
        // The parent table is unaffected by the push.
        assert_eq!(st.print("a"), "outer");
    }

    #[test]
    fn test_array_elem_binding() {
        let root = map(vec![("a", "x".to_value())]);
        let elem = 5i64.to_value();
        let st = SymTab::new(&root);
        let in_elem = st.enter_array_elem(&elem);

        assert!(in_elem.ifdef(""));
        assert_eq!(in_elem.print(""), "5");
        assert_eq!(in_elem.print("a"), "x");

        // Entering an object clears the element binding.
        let Value::Map(scope) = &root else {
            unreachable!()
        };
        assert!(!in_elem.enter_object(scope).ifdef(""));
    }

    #[test]
    fn test_non_map_root() {
        let root = vec![1i64].to_value();
        let st = SymTab::new(&root);
        assert!(!st.ifdef("a"));
        assert_eq!(st.print("a"), "");
    }
}
