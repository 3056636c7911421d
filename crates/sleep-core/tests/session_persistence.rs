use sleep_core::catalog::Category;
use sleep_core::session::Session;
use sleep_core::store::{KvStore, PlaylistStore, CUSTOM_PLAYLISTS_KEY};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PlaylistStore {
    PlaylistStore::at(dir.path().join("storage.json"))
}

#[tokio::test]
async fn added_playlists_survive_a_restart() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::open(store_in(&dir)).await;
    let first = session
        .add_playlist("Deep rain", "https://www.youtube.com/watch?v=abc123")
        .unwrap();
    let second = session
        .add_playlist("Playlist", "https://www.youtube.com/playlist?list=PL42")
        .unwrap();
    session.flush().await;

    let restored = Session::open(store_in(&dir)).await;
    assert_eq!(restored.custom_playlists(), &[first.clone(), second.clone()]);
    assert_eq!(restored.merged_playlists().count(), 11);
    let custom = restored.playlists_in(Some(Category::Custom));
    assert_eq!(custom.len(), 2);
    assert!(custom.iter().all(|p| !p.is_default));
}

#[tokio::test]
async fn removal_persists_and_defaults_are_immune() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::open(store_in(&dir)).await;
    let keep = session.add_playlist("Keep", "https://youtu.be/keep").unwrap();
    let drop = session.add_playlist("Drop", "https://youtu.be/drop").unwrap();

    assert!(!session.remove_playlist("rain-1"));
    assert!(!session.remove_playlist("custom-does-not-exist"));
    assert!(session.remove_playlist(&drop.id));
    assert!(!session.remove_playlist(&drop.id));
    session.flush().await;

    let restored = Session::open(store_in(&dir)).await;
    assert_eq!(restored.custom_playlists(), &[keep]);
    assert!(restored.merged_playlists().any(|p| p.id == "rain-1"));
}

#[tokio::test]
async fn rapid_mutations_land_in_issue_order() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::open(store_in(&dir)).await;
    let mut ids = Vec::new();
    for i in 0..8 {
        let p = session
            .add_playlist(&format!("n{i}"), &format!("https://youtu.be/v{i}"))
            .unwrap();
        ids.push(p.id);
    }
    for id in ids.iter().step_by(2) {
        assert!(session.remove_playlist(id));
    }
    session.flush().await;

    let titles: Vec<String> = store_in(&dir)
        .load()
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["n1", "n3", "n5", "n7"]);
}

#[tokio::test]
async fn rejected_input_writes_nothing() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::open(store_in(&dir)).await;
    assert!(session.add_playlist("", "https://youtu.be/x").is_err());
    assert!(session.add_playlist("t", "https://vimeo.com/1").is_err());
    session.flush().await;

    assert!(!dir.path().join("storage.json").exists());
}

#[tokio::test]
async fn corrupt_stored_value_starts_empty() {
    let dir = TempDir::new().unwrap();
    let kv = KvStore::new(dir.path().join("storage.json"));
    kv.set(CUSTOM_PLAYLISTS_KEY, "[{\"id\": 1}]".to_string())
        .await
        .unwrap();

    let session = Session::open(PlaylistStore::new(kv)).await;
    assert!(session.custom_playlists().is_empty());
    assert_eq!(session.merged_playlists().count(), 9);
}
