//! Architecture Verification Suite
//!
//! Keeps the shared pieces usable from concurrent UI handlers.

#[cfg(test)]
mod architecture_tests {
    use drug_craft::engine::{HttpGenerator, OllamaGenerator};
    use drug_craft::storage::{FileStore, MemoryStore, Persistence};
    use drug_craft::{CombinationEngine, GameSession};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_session_is_thread_safe() {
        assert_send_sync::<GameSession>();
        assert_send_sync::<CombinationEngine>();
        assert_send_sync::<Persistence>();
    }

    #[test]
    fn test_backends_are_thread_safe() {
        assert_send_sync::<HttpGenerator>();
        assert_send_sync::<OllamaGenerator>();
        assert_send_sync::<FileStore>();
        assert_send_sync::<MemoryStore>();
    }

    #[test]
    fn test_traits_are_object_safe() {
        fn _generator(_: &dyn drug_craft::Generator) {}
        fn _store(_: &dyn drug_craft::storage::KeyValueStore) {}
    }
}
