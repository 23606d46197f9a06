//! Tag resolution.
//!
//! [`FieldIndex::resolve`] walks a record's [`Shape`] depth-first in
//! declaration order and maps every tag to the [`FieldPath`] that reaches its
//! slot, descending through embedded records. It rejects duplicate tags and
//! tags attached to embedded records before any value is touched.
//!
//! ```rust
//! use rowbind::{FieldIndex, Record};
//!
//! #[derive(Default)]
//! struct Inner { name: String }
//!
//! #[derive(Default)]
//! struct Outer { id: i64, inner: Inner }
//!
//! rowbind::impl_record! { Inner { name: tag("name") } }
//! rowbind::impl_record! { Outer { id: tag("id"), inner: embed(Inner) } }
//!
//! let index = FieldIndex::resolve(Outer::SHAPE).unwrap();
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.get("name").unwrap().to_string(), "Outer.inner.name");
//! ```

use crate::error::{Error, Result};
use crate::shape::{Layout, Shape};
use indexmap::IndexMap;
use std::fmt;

/// The route from a record to one of its (possibly embedded) slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    root: &'static str,
    steps: Vec<&'static str>,
}

impl FieldPath {
    fn new(root: &'static str, parents: &[&'static str], field: &'static str) -> Self {
        let mut steps = Vec::with_capacity(parents.len() + 1);
        steps.extend_from_slice(parents);
        steps.push(field);
        FieldPath { root, steps }
    }

    /// Rust field names from the root record down to the slot.
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[&'static str] {
        &self.steps
    }

    /// Embedded fields to pass through before reaching the slot.
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &[&'static str] {
        &self.steps[..self.steps.len() - 1]
    }

    /// Name of the slot field itself.
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &'static str {
        self.steps[self.steps.len() - 1]
    }

    /// Returns `true` if the slot lives directly on the root record.
    #[inline]
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.steps.len() == 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root)?;
        for step in &self.steps {
            write!(f, ".{}", step)?;
        }
        Ok(())
    }
}

/// Maps each tag of a record's flattened namespace to its slot.
///
/// Entries keep declaration order. The index is cheap to build and is built
/// again for every decode and encode call.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    entries: IndexMap<&'static str, FieldPath>,
}

impl FieldIndex {
    /// Builds the index for `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTag`] when two slots share a tag and
    /// [`Error::TagOnEmbedded`] when an embedded record carries a tag. Both
    /// are reported even if no schema ever asks for the affected fields.
    pub fn resolve(shape: &'static Shape) -> Result<Self> {
        let slots = shape.slot_count();
        let mut index = FieldIndex {
            entries: IndexMap::with_capacity(slots),
        };
        let mut parents = Vec::new();
        index.walk(shape.type_name, shape, &mut parents)?;

        tracing::debug!(record = shape.type_name, slots, "resolved field index");
        Ok(index)
    }

    fn walk(
        &mut self,
        root: &'static str,
        shape: &'static Shape,
        parents: &mut Vec<&'static str>,
    ) -> Result<()> {
        for field in shape.fields {
            match field.layout {
                Layout::Slot => {
                    let Some(tag) = field.tag else { continue };
                    let path = FieldPath::new(root, parents, field.name);
                    if let Some(first) = self.entries.get(tag) {
                        return Err(Error::DuplicateTag {
                            tag,
                            first: first.to_string(),
                            second: path.to_string(),
                        });
                    }
                    self.entries.insert(tag, path);
                }
                Layout::Embed(child) | Layout::EmbedRef(child) => {
                    if let Some(tag) = field.tag {
                        return Err(Error::TagOnEmbedded {
                            tag,
                            field: field.name,
                            type_name: shape.type_name,
                        });
                    }
                    parents.push(field.name);
                    self.walk(root, child, parents)?;
                    parents.pop();
                }
            }
        }
        Ok(())
    }

    /// Returns the path for `tag`, if any slot declares it.
    #[inline]
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&FieldPath> {
        self.entries.get(tag)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Tag/path pairs in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, &'static str, FieldPath> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::FieldShape;

    static LEAF: Shape = Shape {
        type_name: "Leaf",
        fields: &[FieldShape {
            name: "field1",
            tag: Some("field1"),
            layout: Layout::Slot,
        }],
    };

    static MIDDLE: Shape = Shape {
        type_name: "Middle",
        fields: &[
            FieldShape {
                name: "field2",
                tag: Some("field2"),
                layout: Layout::Slot,
            },
            FieldShape {
                name: "untagged",
                tag: None,
                layout: Layout::Slot,
            },
            FieldShape {
                name: "leaf",
                tag: None,
                layout: Layout::EmbedRef(&LEAF),
            },
        ],
    };

    static ROOT: Shape = Shape {
        type_name: "Root",
        fields: &[
            FieldShape {
                name: "id",
                tag: Some("id"),
                layout: Layout::Slot,
            },
            FieldShape {
                name: "middle",
                tag: None,
                layout: Layout::Embed(&MIDDLE),
            },
        ],
    };

    static DUPLICATE: Shape = Shape {
        type_name: "Duplicate",
        fields: &[
            FieldShape {
                name: "field1",
                tag: Some("field1"),
                layout: Layout::Slot,
            },
            FieldShape {
                name: "leaf",
                tag: None,
                layout: Layout::EmbedRef(&LEAF),
            },
        ],
    };

    static TAGGED_EMBED: Shape = Shape {
        type_name: "TaggedEmbed",
        fields: &[
            FieldShape {
                name: "id",
                tag: Some("id"),
                layout: Layout::Slot,
            },
            FieldShape {
                name: "leaf",
                tag: Some("leaf"),
                layout: Layout::Embed(&LEAF),
            },
        ],
    };

    #[test]
    fn test_resolve_nested_paths() {
        let index = FieldIndex::resolve(&ROOT).unwrap();
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["id", "field2", "field1"]);

        let path = index.get("field1").unwrap();
        assert_eq!(path.steps(), &["middle", "leaf", "field1"]);
        assert_eq!(path.parents(), &["middle", "leaf"]);
        assert_eq!(path.leaf(), "field1");
        assert!(!path.is_direct());
        assert_eq!(path.to_string(), "Root.middle.leaf.field1");

        assert!(index.get("id").unwrap().is_direct());
        assert!(!index.contains("untagged"));
        assert_eq!(index.len(), ROOT.slot_count());
    }

    #[test]
    fn test_duplicate_tag_across_embedding() {
        match FieldIndex::resolve(&DUPLICATE).unwrap_err() {
            Error::DuplicateTag { tag, first, second } => {
                assert_eq!(tag, "field1");
                assert_eq!(first, "Duplicate.field1");
                assert_eq!(second, "Duplicate.leaf.field1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tag_on_embedded_record() {
        match FieldIndex::resolve(&TAGGED_EMBED).unwrap_err() {
            Error::TagOnEmbedded {
                tag,
                field,
                type_name,
            } => {
                assert_eq!(tag, "leaf");
                assert_eq!(field, "leaf");
                assert_eq!(type_name, "TaggedEmbed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
