use jobstore::config::{self, StoreConfig};
use jobstore::{MembershipRecord, ProgressionStore, ProgressionUpdate};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> ProgressionStore {
    let mut store_config = StoreConfig::default();
    store_config.database.path = dir.path().join("plugins").join("Jobs").join("jobs.db");
    config::ensure_db_dir(&store_config.database.path).unwrap();
    ProgressionStore::open_with(&store_config.connection_settings()).unwrap()
}

#[test]
fn test_login_join_level_up_quit_cycle() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    // Login: nothing stored yet.
    assert_eq!(store.load_all_memberships("Alice").unwrap(), Vec::new());

    // Join two jobs.
    store.add_membership("Alice", "Miner").unwrap();
    store.add_membership("Alice", "Fisherman").unwrap();

    // Periodic save after some progress.
    let saved = store
        .save_progression(
            "Alice",
            &[
                ProgressionUpdate::new("Miner", 50, 3),
                ProgressionUpdate::new("Fisherman", 5, 1),
            ],
        )
        .unwrap();
    assert_eq!(saved, 2);

    // Leave one job.
    store.remove_membership("Alice", "Fisherman").unwrap();

    // Next login sees only what is left.
    let records = store.load_all_memberships("Alice").unwrap();
    assert_eq!(records, vec![MembershipRecord::new("Miner", 50, 3)]);
}

#[test]
fn test_slot_count_follows_joins_and_quits() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.add_membership("Alice", "Miner").unwrap();
    assert_eq!(store.count_members("Miner").unwrap(), 1);

    store.add_membership("Bob", "Miner").unwrap();
    assert_eq!(store.count_members("Miner").unwrap(), 2);

    store.remove_membership("Alice", "Miner").unwrap();
    assert_eq!(store.count_members("Miner").unwrap(), 1);

    assert_eq!(store.count_members("Woodcutter").unwrap(), 0);
}

#[test]
fn test_reopen_keeps_schema_and_rows() {
    let dir = TempDir::new().unwrap();

    {
        let store = file_store(&dir);
        store.add_membership("Bob", "Builder").unwrap();
    }

    let store = file_store(&dir);
    assert_eq!(store.count_members("Builder").unwrap(), 1);
    assert_eq!(store.stats().unwrap().players, 1);
}
