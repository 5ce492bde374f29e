//! Tests for pair keys and two-tier distance resolution with memoization

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, Rect, coord};
    use regionsleuth::algorithm::cache::{DistanceCache, PairKey};
    use regionsleuth::io::configuration::UNKNOWN_DISTANCE_KM;
    use regionsleuth::io::matrix::DistanceMatrix;
    use regionsleuth::spatial::mainland::{MainlandTable, TerritoryMode};
    use regionsleuth::spatial::region::{Region, RegionId, World};
    use std::sync::Arc;

    fn rect(min_x: f64, max_x: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![
            Rect::new(coord! { x: min_x, y: -0.5 }, coord! { x: max_x, y: 0.5 }).to_polygon(),
        ])
    }

    fn world() -> World {
        World::new(vec![
            Region::new(RegionId::from("A"), rect(0.0, 1.0)),
            Region::new(RegionId::from("B"), rect(2.0, 3.0)),
            Region::new(RegionId::from("E"), MultiPolygon::new(vec![])),
            Region::new(RegionId::from("F"), MultiPolygon::new(vec![])),
        ])
    }

    fn region<'w>(world: &'w World, id: &str) -> &'w Region {
        world
            .get(&RegionId::from(id))
            .unwrap_or_else(|| panic!("missing region {id}"))
    }

    // Tests pair keys ignore argument order but not the territory mode
    // Verified by storing ids in call order
    #[test]
    fn test_pair_key_canonical() {
        let a = RegionId::from("FRA");
        let b = RegionId::from("DEU");

        let key = PairKey::new(&a, &b, TerritoryMode::MainlandOnly);
        assert_eq!(key, PairKey::new(&b, &a, TerritoryMode::MainlandOnly));
        assert_ne!(key, PairKey::new(&a, &b, TerritoryMode::IncludeTerritories));
        assert_eq!(key.first().as_str(), "DEU");
        assert_eq!(key.second().as_str(), "FRA");
        assert_eq!(key.mode(), TerritoryMode::MainlandOnly);
    }

    // Tests new cache starts empty with zeroed statistics
    #[test]
    fn test_cache_new() {
        let cache = DistanceCache::default();
        assert!(cache.is_empty());
        assert!(!cache.has_matrix());
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(cache.stats.matrix_hits, 0);
        assert_eq!(cache.stats.misses, 0);
    }

    // Tests computation on first access and memo hit on the reversed pair
    // Verified by keying the memo on call order
    #[test]
    fn test_resolve_miss_then_hit() {
        let world = world();
        let mainlands = MainlandTable::build(&world);
        let mut cache = DistanceCache::new(None);
        let (a, b) = (region(&world, "A"), region(&world, "B"));

        let first = cache.resolve(&mainlands, a, b, TerritoryMode::MainlandOnly);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 0);
        assert!((first - 111.19).abs() < 0.5, "got {first}");

        let second = cache.resolve(&mainlands, b, a, TerritoryMode::MainlandOnly);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 1);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.cached(&PairKey::new(a.id(), b.id(), TerritoryMode::MainlandOnly)),
            Some(first)
        );
    }

    // Tests the matrix answers territory-inclusive queries only
    // Verified by consulting the matrix in every mode
    #[test]
    fn test_matrix_used_for_territories_only() {
        let world = world();
        let mainlands = MainlandTable::build(&world);
        let mut matrix = DistanceMatrix::new();
        matrix.insert(RegionId::from("B"), RegionId::from("A"), 1234.5);
        let mut cache = DistanceCache::new(Some(Arc::new(matrix)));
        let (a, b) = (region(&world, "A"), region(&world, "B"));

        let stored = cache.resolve(&mainlands, a, b, TerritoryMode::IncludeTerritories);
        assert!((stored - 1234.5).abs() < f64::EPSILON);
        assert_eq!(cache.stats.matrix_hits, 1);
        assert_eq!(cache.stats.misses, 0);

        let computed = cache.resolve(&mainlands, a, b, TerritoryMode::MainlandOnly);
        assert!((computed - 111.19).abs() < 0.5, "got {computed}");
        assert_eq!(cache.stats.misses, 1);

        let again = cache.resolve(&mainlands, b, a, TerritoryMode::IncludeTerritories);
        assert!((again - 1234.5).abs() < f64::EPSILON);
        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.stats.matrix_hits, 1);
    }

    // Tests a pair missing from the matrix falls back to computation
    #[test]
    fn test_matrix_miss_computes() {
        let world = world();
        let mainlands = MainlandTable::build(&world);
        let mut cache = DistanceCache::new(Some(Arc::new(DistanceMatrix::new())));

        let km = cache.resolve(
            &mainlands,
            region(&world, "A"),
            region(&world, "B"),
            TerritoryMode::IncludeTerritories,
        );
        assert!((km - 111.19).abs() < 0.5, "got {km}");
        assert_eq!(cache.stats.misses, 1);
    }

    // Tests a region is 0 from itself
    #[test]
    fn test_resolve_self_zero() {
        let world = world();
        let mainlands = MainlandTable::build(&world);
        let mut cache = DistanceCache::new(None);
        let a = region(&world, "A");

        assert!(cache.resolve(&mainlands, a, a, TerritoryMode::MainlandOnly).abs() < f64::EPSILON);
    }

    // Tests pairs without any usable sample resolve to the sentinel
    // Verified by returning 0 for failed computations
    #[test]
    fn test_unknown_distance_sentinel() {
        let world = world();
        let mainlands = MainlandTable::build(&world);
        let (e, f) = (region(&world, "E"), region(&world, "F"));

        let mut cache = DistanceCache::new(None);
        let km = cache.resolve(&mainlands, e, f, TerritoryMode::MainlandOnly);
        assert!((km - UNKNOWN_DISTANCE_KM).abs() < f64::EPSILON);

        let mut custom = DistanceCache::new(None).with_unknown_distance(42.0);
        let km = custom.resolve(&mainlands, e, f, TerritoryMode::MainlandOnly);
        assert!((km - 42.0).abs() < f64::EPSILON);
    }
}
