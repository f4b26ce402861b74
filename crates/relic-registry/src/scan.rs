//! Property descriptor scanning.
//!
//! Scanning walks a descriptor's chain (the type, its parent, its
//! grandparent...) and merges every level's declared properties into one
//! [`PropertyTable`] ordered by declared order. Parent-level accessors are
//! composed with the chain's projections so they read the parent value
//! embedded in the concrete instance.
//!
//! Required properties follow a prefix rule: every property sorting at or
//! before the last explicitly required one is required.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use relic_core::{AcceptedValues, Accessor, Projection, PropertyHolder, TypeDescriptor};
use serde_json::Value;

use crate::error::ScanError;

/// A scanned property.
#[derive(Clone)]
pub struct PropertyEntry {
    name: &'static str,
    order: i32,
    required: bool,
    accepted: Option<AcceptedValues>,
    declared_by: &'static str,
    accessor: Option<Accessor>,
}

impl PropertyEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    /// Whether the property is required under the prefix rule.
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn accepted(&self) -> Option<AcceptedValues> {
        self.accepted
    }

    /// Name of the type whose level declared this property.
    pub fn declared_by(&self) -> &'static str {
        self.declared_by
    }

    /// Whether an accessor is bound. Marker types leave every accessor unbound.
    pub fn is_bound(&self) -> bool {
        self.accessor.is_some()
    }

    /// Reads the current value from a live instance.
    pub fn read<H: ?Sized + PropertyHolder>(&self, holder: &H) -> Option<Value> {
        self.read_any(holder.as_any())
    }

    /// Reads the current value from a type-erased instance.
    pub fn read_any(&self, holder: &dyn Any) -> Option<Value> {
        self.accessor.as_ref().and_then(|accessor| accessor(holder))
    }
}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("required", &self.required)
            .field("declared_by", &self.declared_by)
            .field("bound", &self.accessor.is_some())
            .finish()
    }
}

/// Ordered property table of a registered type.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    entries: IndexMap<&'static str, PropertyEntry>,
}

impl PropertyTable {
    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn required(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.iter().filter(|entry| entry.required)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = &'a PropertyEntry;
    type IntoIter = indexmap::map::Values<'a, &'static str, PropertyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Scans the property table of `descriptor`.
pub fn scan<T: ?Sized + 'static>(
    descriptor: &'static TypeDescriptor<T>,
) -> Result<PropertyTable, ScanError> {
    let marker = descriptor.meta.is_some_and(|meta| meta.marker);

    let mut collected = Vec::new();
    let mut projections: Vec<Projection> = Vec::new();
    let mut level = Some(descriptor);
    while let Some(current) = level {
        for decl in (current.properties)() {
            collected.push((decl, current.name, projections.clone()));
        }
        level = current.parent.as_ref().map(|link| {
            projections.push(link.project);
            link.descriptor
        });
    }

    // Stable: equal orders keep declaration order, nearest level first.
    collected.sort_by_key(|(decl, _, _)| decl.order());

    let required_order = collected
        .iter()
        .filter(|(decl, _, _)| decl.is_required())
        .map(|(decl, _, _)| decl.order())
        .last();

    let mut entries = IndexMap::with_capacity(collected.len());
    for (decl, declared_by, chain) in collected {
        if entries.contains_key(decl.name()) {
            return Err(ScanError::AmbiguousAccessor {
                type_name: descriptor.name,
                field: decl.name(),
            });
        }

        let accessor = if marker {
            None
        } else {
            let accessor = decl.accessor().cloned().ok_or(ScanError::MissingAccessor {
                type_name: descriptor.name,
                field: decl.name(),
            })?;
            Some(compose(accessor, chain))
        };

        entries.insert(
            decl.name(),
            PropertyEntry {
                name: decl.name(),
                order: decl.order(),
                required: required_order.is_some_and(|required| decl.order() <= required),
                accepted: decl.accepted(),
                declared_by,
                accessor,
            },
        );
    }

    Ok(PropertyTable { entries })
}

/// Runs `accessor` on the value reached by applying `projections` in order.
fn compose(accessor: Accessor, projections: Vec<Projection>) -> Accessor {
    if projections.is_empty() {
        return accessor;
    }
    Arc::new(move |holder: &dyn Any| {
        let mut target = holder;
        for project in &projections {
            target = project(target)?;
        }
        accessor(target)
    })
}
