//! Tests for candidate bitset membership and elimination

#[cfg(test)]
mod tests {
    use geo::MultiPolygon;
    use regionsleuth::algorithm::candidates::CandidateSet;
    use regionsleuth::spatial::region::{Region, RegionId, World};

    // Tests the full constructor covers the whole universe
    #[test]
    fn test_all() {
        let all = CandidateSet::all(5);
        assert_eq!(all.count(), 5);
        assert_eq!(all.universe(), 5);
        assert_eq!(all.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(!all.is_empty());

        let empty = CandidateSet::all(0);
        assert!(empty.is_empty());
        assert!(!empty.contains(0));
    }

    // Tests elimination and out-of-range positions
    // Verified by letting remove panic past the universe
    #[test]
    fn test_remove_bounds() {
        let mut set = CandidateSet::all(4);
        set.remove(0);
        set.remove(2);
        set.remove(10);
        assert_eq!(set.to_vec(), vec![1, 3]);
        assert!(set.contains(3));
        assert!(!set.contains(2));
        assert!(!set.contains(10));

        set.remove(1);
        set.remove(3);
        assert!(set.is_empty());
        assert_eq!(set.universe(), 4);
    }

    // Tests positions resolve to regions in world order
    #[test]
    fn test_regions_resolution() {
        let world = World::new(
            ["A", "B", "C"]
                .into_iter()
                .map(|id| Region::new(RegionId::from(id), MultiPolygon::new(vec![]))),
        );
        let mut set = CandidateSet::all(world.len());
        set.remove(1);

        let ids: Vec<&str> = set.regions(&world).iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    // Tests display summary
    #[test]
    fn test_display() {
        let mut set = CandidateSet::all(3);
        set.remove(0);
        set.remove(2);
        assert_eq!(set.to_string(), "CandidateSet(1 of 3: [1])");
    }
}
