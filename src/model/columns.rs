//! Column resolution: collapse an observed attribute/type set into one
//! type per attribute.
//!
//! Conflicts are resolved, never fatal: `Text` beats any competing tag;
//! between non-Text tags the last value in set order wins. Every collision
//! is reported through the injected warning sink.

use super::{AttributeTypeSet, TypeTag};
use std::collections::BTreeMap;

/// One resolved type per attribute.
pub type ColumnSpec = BTreeMap<String, TypeTag>;

/// Sink for non-fatal schema warnings.
///
/// Injected rather than global so tests can assert on warning content.
pub trait WarningSink {
    /// Record one warning.
    fn warn(&mut self, message: String);
}

/// Default sink: forwards to the `log` crate.
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&mut self, message: String) {
        log::warn!("{message}");
    }
}

/// Sink collecting warnings into a vector.
#[derive(Debug, Default)]
pub struct BufferSink {
    /// Warnings recorded so far, in emission order.
    pub messages: Vec<String>,
}

impl WarningSink for BufferSink {
    fn warn(&mut self, message: String) {
        self.messages.push(message);
    }
}

/// Resolve an attribute/type set into one type per attribute.
///
/// `Text` always wins a conflict. When `Text` is not among the candidates
/// the last value in set order wins; which tag that is carries no meaning
/// and callers needing a different rule should decide one upstream. Either
/// way a warning names both tags.
pub fn resolve_columns(set: &AttributeTypeSet, sink: &mut dyn WarningSink) -> ColumnSpec {
    let mut columns = ColumnSpec::new();

    for (attribute, tag) in set {
        match columns.get(attribute).copied() {
            None => {
                columns.insert(attribute.clone(), *tag);
            }
            Some(existing) if existing == *tag => {}
            Some(TypeTag::Text) => {
                sink.warn(format!(
                    "attribute '{attribute}': Text takes precedence over {}",
                    tag.as_str()
                ));
            }
            Some(existing) if *tag == TypeTag::Text => {
                sink.warn(format!(
                    "attribute '{attribute}': Text takes precedence over {}",
                    existing.as_str()
                ));
                columns.insert(attribute.clone(), TypeTag::Text);
            }
            Some(existing) => {
                sink.warn(format!(
                    "attribute '{attribute}': no Text candidate, {} replaces {}",
                    tag.as_str(),
                    existing.as_str()
                ));
                columns.insert(attribute.clone(), *tag);
            }
        }
    }

    columns
}
