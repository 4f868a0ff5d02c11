use claims::*;
use client::model::UserView;
use client::session::{FileSessionStorage, SessionData, SessionStorage, SessionStore};
use serde_json::Value;
use tempfile::TempDir;

fn user() -> UserView {
    UserView {
        id: "7".to_string(),
        nome: "Paulo".to_string(),
        email: "p@x.com".to_string(),
        telefone: "11999999999".to_string(),
        role: "CLIENTE".to_string(),
    }
}

fn open(dir: &TempDir) -> SessionStore {
    let path = dir.path().join("nested").join("session.json");
    SessionStore::open(Box::new(FileSessionStorage::new(path)))
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().expect("tempdir");
    let store = open(&dir);
    assert_ok!(store.save(SessionData {
        token: "abc".to_string(),
        user: user(),
    }));
    drop(store);

    let restored = open(&dir);
    assert!(restored.is_authenticated());
    assert_some_eq!(restored.token(), "abc".to_string());
    assert_some_eq!(restored.get_user(), user());
}

#[test]
fn test_document_holds_both_fields_or_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");
    let store = open(&dir);

    assert_ok!(store.save(SessionData {
        token: "abc".to_string(),
        user: user(),
    }));
    let raw: Value = serde_json::from_slice(&std::fs::read(&path).expect("read session"))
        .expect("session is json");
    assert_eq!(raw["token"], "abc");
    assert_eq!(raw["user"]["id"], "7");

    let tmp_files: Vec<_> = std::fs::read_dir(path.parent().expect("parent"))
        .expect("list dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(tmp_files.is_empty());

    assert_ok!(store.clear());
    assert!(!path.exists());
    assert_none!(store.token());
    assert_none!(store.get_user());
}

#[test]
fn test_corrupt_document_starts_logged_out() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, br#"{"token":"abc"}"#).expect("write partial session");

    let storage = FileSessionStorage::new(&path);
    assert_err!(storage.load());

    let store = SessionStore::open(Box::new(storage));
    assert!(!store.is_authenticated());
    assert!(!path.exists());
}

#[test]
fn test_clear_without_document_is_ok() {
    let dir = TempDir::new().expect("tempdir");
    let store = open(&dir);
    assert_ok!(store.clear());
    assert!(!store.is_authenticated());
}
