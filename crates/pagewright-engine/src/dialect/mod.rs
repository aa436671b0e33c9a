//! # Dialect Tables
//!
//! The closed, data-only description of the component-embedded markup the
//! transforms understand: which components are opaque, which tag namespaces
//! are animation wrappers, which element is the typed navigation link, and
//! which attribute names differ from plain HTML.
//!
//! Both transform directions consult one [`Dialect`], so adding a component
//! or wrapper namespace never requires touching transform code.

pub mod components;
pub mod expression;

pub use components::{ComponentRegistry, ComponentSpec};
pub use expression::ExpressionKind;

/// Attributes the forward transform adds so the reverse transform can
/// restore dialect elements.
pub mod markers {
    /// On an element that was a wrapper; the value is the namespace.
    pub const WRAPPER: &str = "data-wrapper";
    /// On an anchor that was a typed link; the value is the link tag name.
    pub const LINK: &str = "data-link";
    /// On a placeholder block; the value is the component name.
    pub const PLACEHOLDER: &str = "data-placeholder";
}

/// The typed navigation link element and its destination attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub tag: String,
    pub destination: String,
}

impl Default for LinkElement {
    fn default() -> Self {
        Self {
            tag: "Link".to_string(),
            destination: "to".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub components: ComponentRegistry,
    /// Namespaces of `ns.tag` wrapper elements, e.g. `motion`.
    pub wrapper_namespaces: Vec<String>,
    pub link: LinkElement,
    /// `(dialect name, HTML name)` attribute pairs.
    pub attribute_renames: Vec<(String, String)>,
    /// Literal leaked-text prefixes the preamble stripper removes.
    pub leaked_prefixes: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            components: ComponentRegistry::builtin(),
            wrapper_namespaces: vec!["motion".to_string()],
            link: LinkElement::default(),
            attribute_renames: vec![
                ("className".to_string(), "class".to_string()),
                ("htmlFor".to_string(), "for".to_string()),
            ],
            leaked_prefixes: [
                "home",
                "Code",
                "Visual",
                "Save Changes",
                "Saving...",
                "Edit Page",
                "Preview",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Dialect {
    pub fn with_component(mut self, spec: ComponentSpec) -> Self {
        self.components.register(spec);
        self
    }

    pub fn with_wrapper_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !self.wrapper_namespaces.contains(&namespace) {
            self.wrapper_namespaces.push(namespace);
        }
        self
    }

    pub fn with_leaked_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.leaked_prefixes.contains(&prefix) {
            self.leaked_prefixes.push(prefix);
        }
        self
    }

    pub fn is_wrapper_namespace(&self, namespace: &str) -> bool {
        self.wrapper_namespaces.iter().any(|ns| ns == namespace)
    }

    /// Splits `motion.div` into `("motion", "div")` when `motion` is a
    /// configured wrapper namespace.
    pub fn wrapper_parts<'s>(&self, tag_name: &'s str) -> Option<(&'s str, &'s str)> {
        let (namespace, base) = tag_name.split_once('.')?;
        (!base.is_empty() && self.is_wrapper_namespace(namespace)).then_some((namespace, base))
    }
}
