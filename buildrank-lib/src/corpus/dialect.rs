//! Structural probing for the two configuration dialects.
//!
//! The dialects are never declared in the documents. Dialect A describes steps as `<runner>`
//! elements holding flat `<param name=".." value=".."/>` children, whereas dialect B describes
//! them as `<step>` elements inside a `<steps>` container, each holding a `<properties>` block of
//! `<property name=".." value=".."/>` entries. Every piece of code that needs to know which form it
//! is looking at goes through this module.

use super::Element;
use strum::{Display, IntoStaticStr};

pub const RUNNER: &str = "runner";
pub const STEPS: &str = "steps";
pub const STEP: &str = "step";
pub const PROPERTIES: &str = "properties";
pub const PROPERTY: &str = "property";
pub const PARAM: &str = "param";
pub const OPTION: &str = "option";
pub const EXTENSION: &str = "extension";
pub const FEATURES: &str = "features";
pub const FEATURE: &str = "feature";

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// The schema dialect a document or element was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Dialect {
    /// `<runner>` / `<param>` / `<extension>` form
    A,

    /// `<steps><step>` / `<properties><property>` / `<features><feature>` form
    B,

    /// Both forms appear in the same document
    Mixed,

    /// Neither form could be recognized
    Unknown,
}

impl Dialect {
    /// Infer the dialect of a whole document from the structures it contains.
    #[must_use]
    pub fn infer(root: &Element) -> Self {
        let mut saw_a = false;
        let mut saw_b = false;

        for step in step_elements(root) {
            match step {
                StepLike::Runner(_) => saw_a = true,
                StepLike::Step(_) => saw_b = true,
            }
        }

        for e in core::iter::once(root).chain(root.descendants()) {
            match e.name() {
                EXTENSION | "build-runners" | "build-extensions" => saw_a = true,
                FEATURES | PROPERTIES => saw_b = true,
                _ => {}
            }
        }

        match (saw_a, saw_b) {
            (true, true) => Self::Mixed,
            (true, false) => Self::A,
            (false, true) => Self::B,
            (false, false) => Self::Unknown,
        }
    }
}

/// A run-step element in either dialect.
#[derive(Debug, Clone, Copy)]
pub enum StepLike<'a> {
    /// Flat form: parameters are direct `param` entries
    Runner(&'a Element),

    /// Nested form: parameters live in a `properties` child
    Step(&'a Element),
}

impl<'a> StepLike<'a> {
    /// Classify a step element by whether it carries a `properties` child.
    #[must_use]
    pub fn probe(element: &'a Element) -> Self {
        if element.child(PROPERTIES).is_some() {
            Self::Step(element)
        } else {
            Self::Runner(element)
        }
    }

    #[must_use]
    pub const fn element(&self) -> &'a Element {
        match self {
            Self::Runner(e) | Self::Step(e) => e,
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        match self {
            Self::Runner(_) => Dialect::A,
            Self::Step(_) => Dialect::B,
        }
    }

    /// The step's runner type, such as `simpleRunner` or `Maven2`.
    #[must_use]
    pub fn kind(&self) -> Option<&'a str> {
        self.element().attribute("type")
    }

    /// The step's identifying label: the runner's `name` in the flat form, the step's `id` in the nested form.
    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        match self {
            Self::Runner(e) => e.attribute("name"),
            Self::Step(e) => e.attribute("id"),
        }
    }

    /// All parameters of this step, in both idioms.
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        parameters_in(self.element())
    }

    /// Value of the named parameter, if the step declares it.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&'a str> {
        self.parameters().into_iter().find(|p| p.name == name).map(|p| p.value)
    }
}

/// One `name`/`value` pair from a `param` or `property` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Parameter<'a> {
    /// Read a parameter element. A missing `value` attribute falls back to the element's text.
    #[must_use]
    pub fn from_element(element: &'a Element) -> Self {
        let value = element
            .attribute("value")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| element.text());

        Self {
            name: element.attribute("name").unwrap_or_default(),
            value: strip_cdata(value),
        }
    }
}

/// Whether an element is a parameter in either dialect.
#[must_use]
pub fn is_parameter(element: &Element) -> bool {
    matches!(element.name(), PARAM | PROPERTY)
}

/// All parameters beneath an element, in document order.
#[must_use]
pub fn parameters_in(element: &Element) -> Vec<Parameter<'_>> {
    element
        .descendants()
        .filter(|e| is_parameter(e))
        .map(Parameter::from_element)
        .collect()
}

/// Every run step in a document: dialect A runners first, then dialect B steps.
pub fn step_elements(root: &Element) -> impl Iterator<Item = StepLike<'_>> {
    root.descendants_named(RUNNER)
        .chain(root.find_children(STEPS, STEP))
        .map(StepLike::probe)
}

/// Every build-level extension in a document: dialect A extensions first, then dialect B features.
pub fn extension_elements(root: &Element) -> impl Iterator<Item = &Element> {
    root.descendants_named(EXTENSION).chain(root.find_children(FEATURES, FEATURE))
}

/// Remove a literal CDATA wrapper that survived inside an attribute value.
fn strip_cdata(value: &str) -> &str {
    value
        .strip_prefix(CDATA_OPEN)
        .and_then(|v| v.strip_suffix(CDATA_CLOSE))
        .unwrap_or(value)
}
