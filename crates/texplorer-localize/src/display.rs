//! Strings shown for a node in a tree view.
//!
//! The label names the node (`arrayOfStrings`, `x?`, `<parameter>`); the
//! description says what it is (`string[]`, `union`, `Letters`).

use crate::messages::{self, ERROR_LABEL, UNNAMED_PARAMETER};
use texplorer_common::{LocalizedTypeInfo, LocalizedTypeInfoOrError, TypePurpose};

pub fn label(node: &LocalizedTypeInfoOrError) -> String {
    match node {
        LocalizedTypeInfoOrError::Info(info) => info_label(info),
        LocalizedTypeInfoOrError::Error { .. } => ERROR_LABEL.to_string(),
    }
}

pub fn description(node: &LocalizedTypeInfoOrError) -> String {
    match node {
        LocalizedTypeInfoOrError::Info(info) => info_description(info),
        LocalizedTypeInfoOrError::Error { error } => error.error.message.clone(),
    }
}

fn info_label(info: &LocalizedTypeInfo) -> String {
    let symbol_name = info
        .symbol
        .as_ref()
        .filter(|symbol| !symbol.anonymous && !symbol.name.is_empty())
        .map(|symbol| symbol.name.as_str());

    let base = match (info.name.as_deref(), symbol_name, info.purpose) {
        (Some(name), _, _) => name.to_string(),
        (None, Some(name), _) => name.to_string(),
        (None, None, Some(TypePurpose::Parameter)) => UNNAMED_PARAMETER.to_string(),
        (None, None, Some(purpose)) => messages::purpose_text(purpose).to_string(),
        (None, None, None) => return info_description(info),
    };

    let mut label = String::new();
    if info.rest {
        label.push_str("...");
    }
    label.push_str(&base);
    if info.optional {
        label.push('?');
    }
    label
}

fn info_description(info: &LocalizedTypeInfo) -> String {
    let base = info
        .alias
        .as_deref()
        .or(info.kind_text.as_deref())
        .unwrap_or_default();
    let mut description = String::with_capacity(base.len() + 2 * info.dimension as usize);
    if info.readonly && info.dimension > 0 {
        description.push_str("readonly ");
    }
    description.push_str(base);
    for _ in 0..info.dimension {
        description.push_str("[]");
    }
    description
}

#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod tests;
