use std::collections::HashMap;
use std::fmt::Debug;

use log::{debug, warn};

use crate::driver::GraphicsDriver;
use crate::uniform::UniformKind;

/// Attribute and uniform names a program is expected to expose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingNames {
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

impl BindingNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.attributes, name.into());
        self
    }

    pub fn uniform(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.uniforms, name.into());
        self
    }

    pub fn attributes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, Self::attribute)
    }

    pub fn uniforms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, Self::uniform)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.iter().map(String::as_str)
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSlot {
    Resolved(u32),
    /// Not found in the program. Never enabled or described.
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformSlot<L> {
    Resolved {
        location: L,
        /// `None` when the driver could not report the declared type.
        kind: Option<UniformKind>,
    },
    /// Not found in the program, usually optimized away. Never set.
    Absent,
}

impl<L> UniformSlot<L> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, UniformSlot::Resolved { .. })
    }
}

/// Name to slot table, filled once after linking.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationTable<L> {
    /// Id of the session that resolved this table, 0 if none did.
    pub(crate) session: u64,
    attributes: Vec<(String, AttributeSlot)>,
    uniforms: Vec<(String, UniformSlot<L>)>,
    attribute_index: HashMap<String, usize>,
    uniform_index: HashMap<String, usize>,
}

impl<L> Default for LocationTable<L> {
    fn default() -> Self {
        LocationTable {
            session: 0,
            attributes: Vec::new(),
            uniforms: Vec::new(),
            attribute_index: HashMap::new(),
            uniform_index: HashMap::new(),
        }
    }
}

impl<L> LocationTable<L> {
    /// `None` if `name` was never resolved; `Some(Absent)` if the program lacks it.
    pub fn attribute(&self, name: &str) -> Option<AttributeSlot> {
        self.attribute_index
            .get(name)
            .map(|&index| self.attributes[index].1)
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformSlot<L>> {
        self.uniform_index
            .get(name)
            .map(|&index| &self.uniforms[index].1)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, AttributeSlot)> {
        self.attributes.iter().map(|(name, slot)| (name.as_str(), *slot))
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformSlot<L>)> {
        self.uniforms.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    pub fn len(&self) -> usize {
        self.attributes.len() + self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up every name not already in the table. Names already present are
    /// not queried again.
    pub(crate) fn resolve<D>(&mut self, driver: &D, program: D::Program, names: &BindingNames)
    where
        D: GraphicsDriver<UniformLocation = L>,
        L: Debug,
    {
        for name in names.attribute_names() {
            if self.attribute_index.contains_key(name) {
                continue;
            }
            let slot = match driver.attribute_location(program, name) {
                Some(location) => {
                    debug!("attribute {name} -> {location}");
                    AttributeSlot::Resolved(location)
                }
                None => {
                    warn!("no attribute: {name}");
                    AttributeSlot::Absent
                }
            };
            self.attribute_index
                .insert(name.to_string(), self.attributes.len());
            self.attributes.push((name.to_string(), slot));
        }

        for name in names.uniform_names() {
            if self.uniform_index.contains_key(name) {
                continue;
            }
            let slot = match driver.uniform_location(program, name) {
                Some(location) => {
                    let kind = driver.uniform_kind(program, name);
                    debug!("uniform {name} -> {location:?} ({kind:?})");
                    UniformSlot::Resolved { location, kind }
                }
                None => {
                    warn!("no uniform: {name}");
                    UniformSlot::Absent
                }
            };
            self.uniform_index.insert(name.to_string(), self.uniforms.len());
            self.uniforms.push((name.to_string(), slot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_deduplicated_in_order() {
        let names = BindingNames::new()
            .attributes(["Vertex_position", "Vertex_normal", "Vertex_position"])
            .uniform("Global_ambient")
            .uniform("Global_ambient");

        assert_eq!(
            names.attribute_names().collect::<Vec<_>>(),
            ["Vertex_position", "Vertex_normal"]
        );
        assert_eq!(names.uniform_names().count(), 1);
    }

    #[test]
    fn unresolved_names_are_not_in_table() {
        let table = LocationTable::<u32>::default();
        assert!(table.is_empty());
        assert_eq!(table.attribute("position"), None);
        assert!(table.uniform("tween").is_none());
    }
}
