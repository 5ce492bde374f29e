//! Tests for region identity, attributes and the indexed region universe

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, Rect, coord};
    use regionsleuth::spatial::region::{Region, RegionId, World};
    use serde_json::{Map, Value, json};

    fn square(x: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![
            Rect::new(coord! { x: x, y: 0.0 }, coord! { x: x + 1.0, y: 1.0 }).to_polygon(),
        ])
    }

    // Tests identifiers order lexicographically and serialize as plain strings
    #[test]
    fn test_region_id_ordering_and_serde() {
        let a = RegionId::from("AUT");
        let b = RegionId::new("BEL".to_string());
        assert!(a < b);
        assert_eq!(a.as_str(), "AUT");
        assert_eq!(b.to_string(), "BEL");
        assert_eq!(serde_json::to_value(&a).ok(), Some(json!("AUT")));
    }

    // Tests builder methods attach name and properties
    #[test]
    fn test_region_builders() {
        let mut properties = Map::new();
        properties.insert("ISO_A3".to_string(), Value::from("FRA"));

        let region = Region::new(RegionId::from("FRA"), square(0.0))
            .with_name("France")
            .with_properties(properties);

        assert_eq!(region.id().as_str(), "FRA");
        assert_eq!(region.name(), Some("France"));
        assert_eq!(region.properties().get("ISO_A3"), Some(&Value::from("FRA")));
        assert_eq!(region.geometry().0.len(), 1);
    }

    // Tests geometry replacement keeps every attribute
    #[test]
    fn test_region_with_geometry() {
        let region = Region::new(RegionId::from("FRA"), square(0.0)).with_name("France");
        let moved = region.with_geometry(square(5.0));

        assert_eq!(moved.id(), region.id());
        assert_eq!(moved.name(), Some("France"));
        assert_ne!(moved.geometry(), region.geometry());
    }

    // Tests world keeps input order and indexes identifiers
    #[test]
    fn test_world_order_and_lookup() {
        let world = World::new(vec![
            Region::new(RegionId::from("C"), square(0.0)),
            Region::new(RegionId::from("A"), square(2.0)),
            Region::new(RegionId::from("B"), square(4.0)),
        ]);

        assert_eq!(world.len(), 3);
        assert!(!world.is_empty());
        assert_eq!(world.position(&RegionId::from("A")), Some(1));
        assert_eq!(world.region_at(2).map(|r| r.id().as_str()), Some("B"));
        assert!(world.get(&RegionId::from("Z")).is_none());

        let ids: Vec<&str> = world.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    // Tests a repeated identifier keeps the first region
    // Verified by letting later duplicates overwrite the index
    #[test]
    fn test_world_duplicate_keeps_first() {
        let world = World::new(vec![
            Region::new(RegionId::from("A"), square(0.0)).with_name("first"),
            Region::new(RegionId::from("A"), square(9.0)).with_name("second"),
        ]);

        assert_eq!(world.len(), 1);
        assert_eq!(
            world.get(&RegionId::from("A")).and_then(Region::name),
            Some("first")
        );
    }

    // Tests mapped worlds keep identities and positions
    #[test]
    fn test_world_map_geometries() {
        let world = World::new(vec![
            Region::new(RegionId::from("A"), square(0.0)),
            Region::new(RegionId::from("B"), square(2.0)),
        ]);
        let emptied = world.map_geometries(|_| MultiPolygon::new(vec![]));

        assert_eq!(emptied.len(), 2);
        assert_eq!(emptied.position(&RegionId::from("B")), Some(1));
        assert!(emptied.iter().all(|r| r.geometry().0.is_empty()));
        assert!((&world).into_iter().all(|r| r.geometry().0.len() == 1));
    }

    // Tests an empty world
    #[test]
    fn test_world_empty() {
        let world = World::new(Vec::new());
        assert!(world.is_empty());
        assert!(world.region_at(0).is_none());
    }
}
