//! Tests for resolving INIT locations through file and memory sources

#[cfg(test)]
mod tests {
    use regionsleuth::EngineError;
    use regionsleuth::io::source::{DataSource, FileSource, MemorySource};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Tests relative locations join the root and absolute ones do not
    #[test]
    fn test_file_source_resolve() {
        let source = FileSource::with_root("/srv/data");
        assert_eq!(source.resolve("world.geojson"), PathBuf::from("/srv/data/world.geojson"));
        assert_eq!(source.resolve("/etc/world.geojson"), PathBuf::from("/etc/world.geojson"));
        assert_eq!(
            source.resolve("file:///tmp/world.geojson"),
            PathBuf::from("/tmp/world.geojson")
        );
        assert_eq!(FileSource::new().resolve("world.geojson"), Path::new("world.geojson"));
    }

    // Tests reading a file under the root
    #[test]
    fn test_file_source_fetch() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let written = std::fs::write(dir.path().join("world.geojson"), "{}");
        assert!(written.is_ok());

        let source = FileSource::with_root(dir.path());
        assert_eq!(source.fetch("world.geojson").ok().as_deref(), Some("{}"));
    }

    // Tests a missing file reports the resolved path
    #[test]
    fn test_file_source_missing() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let source = FileSource::with_root(dir.path());

        match source.fetch("absent.json") {
            Err(EngineError::FileSystem { path, .. }) => {
                assert_eq!(path, dir.path().join("absent.json"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    // Tests memory documents are served by exact location
    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_document("world", "[]");
        assert_eq!(source.fetch("world").ok().as_deref(), Some("[]"));
        assert!(matches!(
            source.fetch("other"),
            Err(EngineError::MissingResource { ref location }) if location == "other"
        ));
    }
}
