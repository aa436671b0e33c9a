use super::markers;

/// Inline style of the placeholder block shown in place of an opaque component.
pub const PLACEHOLDER_STYLE: &str = "background:#f3f4f6;border:2px dashed #9ca3af;border-radius:8px;\
padding:24px;margin:16px 0;text-align:center;color:#4b5563;font-weight:600;";

/// One opaque embedded component: a self-closing section tag the visual
/// surface cannot render and shows as a labeled placeholder instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    name: String,
    label: String,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    /// Builds a spec whose label is derived from the tag name:
    /// `PricingTable` becomes "Pricing Table Component".
    pub fn derived(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = format!("{} Component", humanize(&name));
        Self::new(name, label)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The bracketed label the user sees, e.g. `[Testimonials Component]`.
    pub fn placeholder_text(&self) -> String {
        format!("[{}]", self.label)
    }

    /// The placeholder block that replaces the component on the visual surface.
    pub fn placeholder_html(&self) -> String {
        format!(
            r#"<div {attr}="{name}" contenteditable="false" style="{PLACEHOLDER_STYLE}">{text}</div>"#,
            attr = markers::PLACEHOLDER,
            name = html_escape::encode_double_quoted_attribute(&self.name),
            text = html_escape::encode_text(&self.placeholder_text()),
        )
    }

    /// A fresh, parameterless instance of the component.
    pub fn fresh_tag(&self) -> String {
        format!("<{} />", self.name)
    }

    /// True if `source` contains a tag for this component, anywhere.
    pub fn occurs_in(&self, source: &str) -> bool {
        let needle = format!("<{}", self.name);
        source.match_indices(&needle).any(|(i, _)| {
            source[i + needle.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '/' || c == '>')
        })
    }
}

/// The closed allow-list of opaque components, consulted by both transform
/// directions. Extending it is a data change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    entries: Vec<ComponentSpec>,
}

impl ComponentRegistry {
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    /// The four section components the marketing pages embed.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ComponentSpec::new("WhyChooseUs", "Why Choose Us Component"));
        registry.register(ComponentSpec::new("Testimonials", "Testimonials Component"));
        registry.register(ComponentSpec::new("ServicesGrid", "Services Grid Component"));
        registry.register(ComponentSpec::new("CallToAction", "Call To Action Component"));
        registry
    }

    /// Adds a component, replacing any existing entry with the same name.
    pub fn register(&mut self, spec: ComponentSpec) {
        match self.entries.iter_mut().find(|e| e.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.entries.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Splits a PascalCase tag name into words, keeping acronyms together.
pub fn humanize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("WhyChooseUs", "Why Choose Us")]
    #[case("Testimonials", "Testimonials")]
    #[case("FAQSection", "FAQ Section")]
    #[case("Step2Form", "Step2 Form")]
    fn humanize_splits_words(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(humanize(name), expected);
    }

    #[test]
    fn builtin_registry_has_four_components() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.get("WhyChooseUs").map(|c| c.placeholder_text()),
            Some("[Why Choose Us Component]".to_string())
        );
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = ComponentRegistry::builtin();
        registry.register(ComponentSpec::new("Testimonials", "Reviews"));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("Testimonials").map(|c| c.label()), Some("Reviews"));
    }

    #[test]
    fn derived_label() {
        let spec = ComponentSpec::derived("PricingTable");
        assert_eq!(spec.label(), "Pricing Table Component");
        assert_eq!(spec.fresh_tag(), "<PricingTable />");
    }

    #[test]
    fn occurs_in_requires_whole_tag_name() {
        let spec = ComponentSpec::new("Testimonials", "Testimonials Component");
        assert!(spec.occurs_in("<Testimonials />"));
        assert!(spec.occurs_in("<Testimonials limit={3}/>"));
        assert!(!spec.occurs_in("<TestimonialsCarousel />"));
        assert!(!spec.occurs_in("[Testimonials Component]"));
    }

    #[test]
    fn placeholder_html_is_labeled_block() {
        let spec = ComponentSpec::new("WhyChooseUs", "Why Choose Us Component");
        let html = spec.placeholder_html();
        assert!(html.starts_with(r#"<div data-placeholder="WhyChooseUs" contenteditable="false""#));
        assert!(html.ends_with(">[Why Choose Us Component]</div>"));
    }
}
