//! Owner color assignment.
//!
//! Entities receive palette colors in first-seen order, cycling once the
//! palette is exhausted. The `ARM` sentinel has a reserved color and
//! unresolved owners fall back to a neutral one.

use indexmap::IndexMap;
use log::debug;

use protograph_core::{color::Color, owner::OwnerRef, semantic::Entity};

use crate::config::RenderConfig;

/// Accumulates entity colors one id at a time.
#[derive(Debug)]
pub struct PaletteBuilder<'a> {
    colors: &'a [Color],
    next: usize,
    assigned: IndexMap<String, Color>,
}

impl<'a> PaletteBuilder<'a> {
    /// Creates a builder over a non-empty color list.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: &'a [Color]) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        Ok(Self {
            colors,
            next: 0,
            assigned: IndexMap::new(),
        })
    }

    /// Assigns the next palette color to `id` unless it already has one.
    pub fn assign(&mut self, id: &str) -> &Color {
        if !self.assigned.contains_key(id) {
            let color = self.colors[self.next % self.colors.len()].clone();
            self.next += 1;
            self.assigned.insert(id.to_string(), color);
        }
        &self.assigned[id]
    }

    /// Freezes the assignments into a [`Palette`].
    pub fn build(self, arm: Color, fallback: Color) -> Palette {
        debug!(entities = self.assigned.len(); "Palette built");
        Palette {
            entities: self.assigned,
            arm,
            fallback,
        }
    }
}

/// Resolved owner colors for one diagram.
#[derive(Debug, Clone)]
pub struct Palette {
    entities: IndexMap<String, Color>,
    arm: Color,
    fallback: Color,
}

impl Palette {
    /// Assigns colors to `entities` using the render configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured palette is empty.
    pub fn for_entities(entities: &[Entity], config: &RenderConfig) -> Result<Self, String> {
        let mut builder = PaletteBuilder::new(config.palette()?)?;
        for entity in entities {
            builder.assign(entity.id());
        }
        Ok(builder.build(config.arm_color().clone(), config.fallback_color().clone()))
    }

    /// Classifies an owner string against the colored entities.
    pub fn owner<'o>(&self, owner: &'o str) -> OwnerRef<'o> {
        OwnerRef::resolve(owner, |id| self.entities.contains_key(id))
    }

    /// Returns the fill color for an owner.
    pub fn color(&self, owner: OwnerRef<'_>) -> &Color {
        match owner {
            OwnerRef::Entity(id) => self.entities.get(id).unwrap_or(&self.fallback),
            OwnerRef::ArmSentinel => &self.arm,
            OwnerRef::Unresolved(_) => &self.fallback,
        }
    }

    /// Number of entities with an assigned color.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use protograph_core::record::Record;

    use super::*;

    fn entity(id: &str) -> Entity {
        Entity::new(Record::new().with(Entity::ID, id))
    }

    fn colors(texts: &[&str]) -> Vec<Color> {
        texts.iter().map(|text| Color::new(text).unwrap()).collect()
    }

    #[test]
    fn test_first_seen_order_cycles() {
        let palette = colors(&["red", "blue"]);
        let mut builder = PaletteBuilder::new(&palette).unwrap();

        assert_eq!(builder.assign("A").as_str(), "red");
        assert_eq!(builder.assign("B").as_str(), "blue");
        assert_eq!(builder.assign("C").as_str(), "red");
    }

    #[test]
    fn test_repeated_id_keeps_color() {
        let palette = colors(&["red", "blue"]);
        let mut builder = PaletteBuilder::new(&palette).unwrap();

        builder.assign("A");
        assert_eq!(builder.assign("A").as_str(), "red");
        assert_eq!(builder.assign("B").as_str(), "blue");
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(PaletteBuilder::new(&[]).is_err());
    }

    #[test]
    fn test_owner_colors() {
        let config = RenderConfig::default();
        let palette = Palette::for_entities(&[entity("ARM1"), entity("ESP1")], &config).unwrap();

        let arm1 = palette.owner("ARM1");
        assert_eq!(arm1, OwnerRef::Entity("ARM1"));
        assert_eq!(palette.color(arm1).as_str(), "#5D8AA8");
        assert_eq!(palette.color(palette.owner("ESP1")).as_str(), "#F28C28");
        assert_eq!(palette.color(palette.owner("ARM")).as_str(), "#F4C95D");
        assert_eq!(palette.color(palette.owner("GHOST")).as_str(), "#dddddd");
        assert_eq!(palette.color(palette.owner("")).as_str(), "#dddddd");
    }

    #[test]
    fn test_declared_arm_entity_uses_palette() {
        let config = RenderConfig::default();
        let palette = Palette::for_entities(&[entity("ARM")], &config).unwrap();

        assert_eq!(palette.color(palette.owner("ARM")).as_str(), "#5D8AA8");
    }
}
