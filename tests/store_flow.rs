use podium::leaderboard::{RankBadge, rows};
use podium::persistence::{FileStorage, KeyValueRepository, KeyValueStorage};
use podium::{Category, StoreConfig, SubmissionInput, SubmissionStore};

fn open(dir: &std::path::Path) -> SubmissionStore<KeyValueRepository<FileStorage>> {
    let config = StoreConfig {
        data_dir: dir.to_path_buf(),
        ..StoreConfig::default()
    };
    let repo = KeyValueRepository::new(FileStorage::new(&config.data_dir), &config.storage_key);
    SubmissionStore::new(repo, config)
}

#[tokio::test]
async fn test_submissions_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = open(dir.path());
    first.initialize().await.unwrap();
    first.submit(SubmissionInput::new("A", 80.0, 20.0)).await.unwrap();
    first.submit(SubmissionInput::new("B", 80.0, 10.0)).await.unwrap();
    first.submit(SubmissionInput::new("C", 97.0, 300.0)).await.unwrap();
    let expected = first.submissions();
    drop(first);

    let mut second = open(dir.path());
    assert_eq!(second.initialize().await.unwrap(), 3);
    assert_eq!(second.submissions(), expected);

    let names: Vec<_> = expected.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C", "B", "A"]);

    let view = rows(&second.submissions());
    assert_eq!(view[0].badge, RankBadge::Gold);
    assert_eq!(view[0].band, Category::Excellent);
    assert_eq!(view[2].badge, RankBadge::Bronze);
}

#[tokio::test]
async fn test_unversioned_blob_is_upgraded_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage
        .set_item(
            "submissions",
            r#"[{"id":1717236000000,"name":"Legacy","score":88,"time":42,
                "audioUrl":"blob:old","timestamp":"2024-06-01T10:00:00.000Z"}]"#,
        )
        .unwrap();

    let mut store = open(dir.path());
    assert_eq!(store.initialize().await.unwrap(), 1);
    let legacy = store.submissions()[0].clone();
    assert_eq!(legacy.name, "Legacy");
    assert!(legacy.has_audio());

    let fresh = store.submit(SubmissionInput::new("Fresh", 91.0, 50.0)).await.unwrap();
    assert!(fresh.id > legacy.id);

    let raw = storage.get_item("submissions").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["submissions"][0]["name"], "Fresh");
    assert_eq!(value["submissions"][1]["audioReference"], "blob:old");
}

#[tokio::test]
async fn test_store_never_fails_on_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path())
        .set_item("submissions", "\u{0}garbage")
        .unwrap();

    let mut store = open(dir.path());
    assert!(store.initialize().await.is_err());
    assert!(store.error().is_some());

    store.clear_error();
    let created = store.submit(SubmissionInput::new("Recovered", 70.0, 10.0)).await.unwrap();
    assert_eq!(store.submissions(), vec![created]);
    assert_eq!(store.celebration().unwrap().category, Category::Average);
}
