//! Include option derivation.
//!
//! The include names live in the list endpoint's `include` parameter
//! description: the second blank-line-separated paragraph is a bulleted list.

use tq_core::{IncludeOption, Metamodel};

use crate::doc::ApiDoc;
use crate::error::SchemaError;
use crate::naming::NamingVocabulary;
use crate::report::{IntrospectionReport, Stage};

/// Whether `c` is stripped from both ends of a bullet item.
fn is_bullet_noise(c: char) -> bool {
    c.is_whitespace() || c == '*' || c == '`'
}

/// Get-or-create an include option for every name each resource type
/// advertises, and record the resource type as an includer.
///
/// No-op if the metamodel already holds any include option.
pub fn derive_include_options(
    doc: &ApiDoc,
    model: &mut Metamodel,
    vocabulary: &NamingVocabulary,
    report: &mut IntrospectionReport,
) {
    if !model.include_options.is_empty() {
        report.skip(Stage::IncludeOptions);
        return;
    }

    let resources: Vec<(i64, String, String)> = model
        .resource_types
        .iter()
        .map(|rt| (rt.id, rt.name.clone(), rt.path.clone()))
        .collect();

    for (resource_id, resource_name, path) in resources {
        let names = match include_names(doc, &path, &resource_name) {
            Ok(names) => names,
            Err(error) => {
                report.issue(Stage::IncludeOptions, &resource_name, &error);
                continue;
            }
        };

        for name in names {
            get_or_create(model, &name, resource_id, vocabulary, report);
        }
    }

    tracing::info!(count = report.created.include_options, "derived include options");
}

fn get_or_create(
    model: &mut Metamodel,
    name: &str,
    resource_id: i64,
    vocabulary: &NamingVocabulary,
    report: &mut IntrospectionReport,
) {
    if let Some(existing) = model.include_options.iter_mut().find(|inc| inc.name == name) {
        if !existing.included_by.contains(&resource_id) {
            existing.included_by.push(resource_id);
        }
        return;
    }

    let associated_resource = match vocabulary.resolve(name, model) {
        Ok(rt) => Some(rt.id),
        Err(error) => {
            tracing::debug!(%error, "include has no associated resource type");
            report.unresolved(name);
            None
        }
    };

    let option = IncludeOption {
        id: model.next_include_id(),
        name: name.to_string(),
        associated_resource,
        included_by: vec![resource_id],
    };
    model.include_options.push(option);
    report.created.include_options += 1;
}

/// Include names listed for the resource at `path`.
///
/// A missing `include` parameter means the resource supports no includes.
fn include_names(doc: &ApiDoc, path: &str, resource: &str) -> Result<Vec<String>, SchemaError> {
    let operation = doc.operation(path)?;
    let Some(description) = operation
        .parameter("include")
        .and_then(|p| p.description.as_deref())
    else {
        return Ok(Vec::new());
    };

    parse_bulleted_names(description).ok_or_else(|| SchemaError::MalformedIncludeDescription {
        resource: resource.to_string(),
    })
}

/// Extract bullet texts from the second paragraph of `description`.
pub(crate) fn parse_bulleted_names(description: &str) -> Option<Vec<String>> {
    let list = description.split("\n\n").nth(1)?;
    Some(
        list.split("\n*")
            .map(|item| item.trim_matches(is_bullet_noise))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_second_paragraph_bullets() {
        let description =
            "Relationships to include.\n\n* `parent_station`\n* `child_stops`\n* `facilities`\n\nNote: more text.";
        assert_eq!(
            parse_bulleted_names(description),
            Some(vec![
                "parent_station".to_string(),
                "child_stops".to_string(),
                "facilities".to_string(),
            ])
        );
    }

    #[test]
    fn single_paragraph_has_no_list() {
        assert_eq!(parse_bulleted_names("Relationships to include."), None);
    }

    #[test]
    fn blank_bullets_are_dropped() {
        assert_eq!(
            parse_bulleted_names("x\n\n* `route`\n* \n*``\n"),
            Some(vec!["route".to_string()])
        );
    }
}
