//! Dialect-agnostic flattening of a document into a [`FlatRecord`].
//!
//! Keys are dotted paths where every path segment carries a 1-based occurrence index among its
//! same-named siblings (`settings1.parameters1`). Composite elements, the containers both dialects
//! use for steps, extensions, triggers, dependencies and parameter lists, are not recursed into:
//! their nested `name`/`value` pairs are folded into a single `"; "`-joined string.

use super::FlatRecord;
use crate::corpus::{ConfigDocument, Element, OPTION, Parameter, is_parameter};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Tag names whose contents are summarized rather than flattened structurally.
pub const COMPOSITE_TAGS: &[&str] = &[
    "runner",
    "step",
    "extension",
    "feature",
    "projectFeature",
    "build-trigger",
    "trigger",
    "snapshot-dependency",
    "artifact-dependency",
    "options",
    "parameters",
    "properties",
    "project-extension",
    "parameter",
];

const PAIR_SEPARATOR: &str = "; ";

/// Flatten one document.
#[must_use]
pub fn flatten(doc: &ConfigDocument) -> FlatRecord {
    let root = doc.root();
    let mut record = FlatRecord::new();

    for (name, value) in root.attributes() {
        record.insert(name, value);
    }

    if !root.text().is_empty() {
        record.insert(root.name(), root.text());
    }

    flatten_children(root, "", &mut record);
    record
}

fn flatten_children(parent: &Element, prefix: &str, record: &mut FlatRecord) {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();

    for child in parent.children() {
        let index = occurrences.entry(child.name()).or_insert(0);
        *index += 1;

        let path = if prefix.is_empty() {
            format!("{}{index}", child.name())
        } else {
            format!("{prefix}.{}{index}", child.name())
        };

        flatten_element(child, &path, record);
    }
}

fn flatten_element(element: &Element, path: &str, record: &mut FlatRecord) {
    for (name, value) in element.attributes() {
        record.insert(format!("{path}.{name}"), value);
    }

    if is_composite(element) {
        record.insert(path, summarize(element));
        return;
    }

    if !element.text().is_empty() {
        record.insert(path, element.text());
    }

    flatten_children(element, path, record);
}

#[must_use]
pub fn is_composite(element: &Element) -> bool {
    COMPOSITE_TAGS.contains(&element.name())
}

/// Collect every nested `name=value` pair of a composite, in document order.
///
/// Pairs need both a name and a value. A name seen twice keeps its first position and its last value.
fn summarize(element: &Element) -> String {
    let mut pairs: IndexMap<&str, &str> = IndexMap::new();

    for e in element.descendants().filter(|e| is_parameter(e) || e.name() == OPTION) {
        let Parameter { name, value } = Parameter::from_element(e);
        if !name.is_empty() && !value.is_empty() {
            let _ = pairs.insert(name, value);
        }
    }

    pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(xml: &str) -> FlatRecord {
        flatten(&ConfigDocument::parse(xml).unwrap())
    }

    #[test]
    fn test_root_attributes_have_no_prefix() {
        let record = flat(r#"<build-type uuid="u1" id="Build"><name>Compile</name></build-type>"#);
        assert_eq!(record.iter().collect::<Vec<_>>(), [("uuid", "u1"), ("id", "Build"), ("name1", "Compile")]);
    }

    #[test]
    fn test_root_text_keyed_by_tag() {
        let record = flat("<note>hello</note>");
        assert_eq!(record.get("note"), Some("hello"));
    }

    #[test]
    fn test_single_child_still_indexed() {
        let record = flat(r#"<root><settings><option name="x" value="1"/></settings></root>"#);
        assert_eq!(record.get("settings1.option1.name"), Some("x"));
        assert_eq!(record.get("settings1.option1.value"), Some("1"));
    }

    #[test]
    fn test_attribute_and_text_keys_coexist() {
        let record = flat(r#"<root><description lang="en">Main build</description></root>"#);
        assert_eq!(record.get("description1.lang"), Some("en"));
        assert_eq!(record.get("description1"), Some("Main build"));
    }

    #[test]
    fn test_composite_records_attributes_then_pairs() {
        let record = flat(
            r#"<root>
                <runner id="R1" type="simpleRunner">
                    <parameters>
                        <param name="script" value="make"/>
                        <param name="empty" value=""/>
                        <param name="teamcity.step.mode" value="default"/>
                    </parameters>
                </runner>
            </root>"#,
        );

        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            [
                ("runner1.id", "R1"),
                ("runner1.type", "simpleRunner"),
                ("runner1", "script=make; teamcity.step.mode=default"),
            ]
        );
    }

    #[test]
    fn test_sibling_runners_each_get_an_indexed_key() {
        let record = flat(
            r#"<build-type uuid="b1">
                <runner id="R1" name="Compile" type="simpleRunner">
                    <param name="script.content" value="make"/>
                    <param name="teamcity.step.mode" value="default"/>
                </runner>
                <runner id="R2" name="Test" type="simpleRunner">
                    <param name="script.content" value="make test"/>
                    <param name="teamcity.step.mode" value="default"/>
                </runner>
                <runner id="R3" name="Publish" type="simpleRunner">
                    <param name="script.content" value="make publish"/>
                    <param name="secure:registry.token" value="credentialsJSON:abc"/>
                </runner>
                <extension id="E1" type="perfmon">
                    <param name="interval" value="10"/>
                </extension>
            </build-type>"#,
        );

        assert_eq!(record.get("runner1"), Some("script.content=make; teamcity.step.mode=default"));
        assert_eq!(record.get("runner2"), Some("script.content=make test; teamcity.step.mode=default"));
        assert_eq!(record.get("runner3"), Some("script.content=make publish; secure:registry.token=credentialsJSON:abc"));
        assert_eq!(record.get("runner3.name"), Some("Publish"));
        assert_eq!(record.get("extension1"), Some("interval=10"));
        assert_eq!(record.get("runner4"), None);
    }

    #[test]
    fn test_dialect_b_step_collects_properties() {
        let record = flat(
            r#"<buildType>
                <steps>
                    <step id="S1" type="Maven2">
                        <properties>
                            <property name="goals" value="clean install"/>
                            <property name="pomLocation" value="pom.xml"/>
                        </properties>
                    </step>
                </steps>
            </buildType>"#,
        );

        assert_eq!(record.get("steps1.step1"), Some("goals=clean install; pomLocation=pom.xml"));
        assert_eq!(record.get("steps1.step1.type"), Some("Maven2"));
    }

    #[test]
    fn test_empty_composite_is_empty_string() {
        let record = flat("<root><build-trigger/></root>");
        assert_eq!(record.get("build-trigger1"), Some(""));
    }

    #[test]
    fn test_duplicate_pair_names_keep_last_value() {
        let record = flat(
            r#"<root><options><option name="a" value="1"/><option name="b" value="2"/><option name="a" value="3"/></options></root>"#,
        );
        assert_eq!(record.get("options1"), Some("a=3; b=2"));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let xml = r#"<project id="P"><parameters><param name="x" value="1"/></parameters><cleanup/><name>P</name></project>"#;
        assert_eq!(flat(xml), flat(xml));
    }
}
