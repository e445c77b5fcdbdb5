use std::collections::HashSet;

/// Session-unique seed for component ids
///
/// Ids loaded from storage were minted by earlier sessions with their own
/// seeds, so a fresh random seed keeps new ids from colliding with them.
pub fn new_session_seed() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    uuid[..8].to_string()
}

/// Sequential ID generator for component nodes
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(new_session_seed())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next id not present in `taken`; the returned id is added to it
    pub fn next_free(&mut self, taken: &mut HashSet<String>) -> String {
        loop {
            let id = self.new_id();
            if taken.insert(id.clone()) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        assert_eq!(gen.new_id(), "abc-1");
        assert_eq!(gen.new_id(), "abc-2");
        assert_eq!(gen.new_id(), "abc-3");
    }

    #[test]
    fn test_next_free_skips_taken_ids() {
        let mut gen = IdGenerator::from_seed("s");
        let mut taken: HashSet<String> = ["s-1", "s-3"].iter().map(|s| s.to_string()).collect();

        assert_eq!(gen.next_free(&mut taken), "s-2");
        assert_eq!(gen.next_free(&mut taken), "s-4");
        assert!(taken.contains("s-2") && taken.contains("s-4"));
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();

        assert_eq!(a.seed().len(), 8);
        assert_ne!(a.seed(), b.seed());
    }
}
