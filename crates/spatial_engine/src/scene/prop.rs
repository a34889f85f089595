//! Placed prop storage

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Transform;

new_key_type! {
    /// Stable handle to a placed prop
    pub struct PropKey;
}

/// One prop instance posed in the playspace
#[derive(Debug, Clone)]
pub struct PropInstance {
    /// Display name, also used as the solver-side query identifier
    pub name: String,

    /// Local transform; world pose is the parent chain applied on top
    pub transform: Transform,

    /// Parent prop, if any
    pub parent: Option<PropKey>,
}

impl PropInstance {
    /// Create a root-level prop
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            parent: None,
        }
    }

    /// Create a prop parented to another
    pub fn with_parent(name: impl Into<String>, transform: Transform, parent: PropKey) -> Self {
        Self {
            name: name.into(),
            transform,
            parent: Some(parent),
        }
    }
}

/// Registry of all props placed during the session
#[derive(Default)]
pub struct PropRegistry {
    props: SlotMap<PropKey, PropInstance>,
}

impl PropRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prop, returning its handle
    pub fn spawn(&mut self, prop: PropInstance) -> PropKey {
        self.props.insert(prop)
    }

    /// Remove a prop by handle
    pub fn despawn(&mut self, key: PropKey) -> Option<PropInstance> {
        self.props.remove(key)
    }

    /// Look up a prop
    pub fn get(&self, key: PropKey) -> Option<&PropInstance> {
        self.props.get(key)
    }

    /// World transform of a prop: its parent chain applied to its local transform
    pub fn world_transform(&self, key: PropKey) -> Option<Transform> {
        let prop = self.props.get(key)?;
        match prop.parent {
            Some(parent) => {
                let parent_world = self.world_transform(parent)?;
                Some(parent_world.combine(&prop.transform))
            }
            None => Some(prop.transform.clone()),
        }
    }

    /// Iterate over all props
    pub fn iter(&self) -> impl Iterator<Item = (PropKey, &PropInstance)> {
        self.props.iter()
    }

    /// Number of props in the registry
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_spawn_despawn() {
        let mut registry = PropRegistry::new();

        let key = registry.spawn(PropInstance::new("guitar0", Transform::identity()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(key).unwrap().name, "guitar0");

        registry.despawn(key);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_world_transform_follows_parent_chain() {
        let mut registry = PropRegistry::new();

        let root = registry.spawn(PropInstance::new(
            "placer",
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
        ));
        let child = registry.spawn(PropInstance::with_parent(
            "guitar0",
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            root,
        ));

        let world = registry.world_transform(child).unwrap();
        assert_eq!(world.position, Vec3::new(1.0, 2.0, 0.0));
    }
}
