use crate::cep47::Meta;

/// Placeholder metadata for test mints: `key{i} -> value{i}`, exactly `size`
/// entries, deterministic for a fixed `size`.
pub fn test_meta_map(size: usize) -> Meta {
    (0..size)
        .map(|i| (format!("key{}", i), format!("value{}", i)))
        .collect()
}

/// A batch of `size` three-entry placeholder metas, one per token to mint.
pub fn test_meta_batch(size: usize) -> Vec<Meta> {
    (0..size).map(|_| test_meta_map(3)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_map_is_deterministic() {
        assert_eq!(test_meta_map(4), test_meta_map(4));
    }

    #[test]
    fn meta_map_has_expected_entries() {
        let meta = test_meta_map(4);
        assert_eq!(meta.len(), 4);
        for i in 0..4 {
            assert_eq!(
                meta.get(&format!("key{}", i)),
                Some(&format!("value{}", i))
            );
        }
    }

    #[test]
    fn empty_meta_map() {
        assert!(test_meta_map(0).is_empty());
    }

    #[test]
    fn meta_batch_yields_one_meta_per_token() {
        let batch = test_meta_batch(10);
        assert_eq!(batch.len(), 10);
        for meta in &batch {
            assert_eq!(meta.len(), 3);
        }
    }
}
