//! Integration tests for the JSON-file-backed repositories.
//!
//! Each test works against store files in a fresh temp directory, covering
//! persistence across reopen, identifier assignment, and corrupt-file
//! recovery.

use taskboard::model::{Task, TaskDraft, TaskList};
use taskboard::repo::{
    JsonTaskListRepository, JsonTaskRepository, TaskListRepository, TaskRepository,
};
use tempfile::TempDir;

fn setup_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn list(name: &str) -> TaskList {
    TaskList::new(name, None, 0).expect("valid list")
}

fn task(title: &str, list_id: &str) -> Task {
    Task::new(TaskDraft {
        title: title.to_string(),
        list_id: list_id.to_string(),
        ..TaskDraft::default()
    })
    .expect("valid task")
}

mod task_list_store {
    use super::*;

    #[test]
    fn save_and_get_round_trip() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        let saved = repo.save(list("Work")).unwrap();
        let found = repo.get_by_id(&saved.id).unwrap();

        assert_eq!(found, Some(saved));
    }

    #[test]
    fn save_assigns_id_when_absent() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        let mut unsaved = list("Work");
        unsaved.id = String::new();
        let saved = repo.save(unsaved).unwrap();

        assert!(!saved.id.is_empty());
        assert!(repo.get_by_id(&saved.id).unwrap().is_some());
    }

    #[test]
    fn get_by_id_returns_none_on_miss() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        assert!(repo.get_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn require_converts_miss_into_not_found() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        let err = repo.require("missing").unwrap_err();
        assert!(err.code.is_not_found());
    }

    #[test]
    fn update_fails_for_unknown_id() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        let err = repo.update(list("Work")).unwrap_err();
        assert!(err.code.is_not_found());
    }

    #[test]
    fn update_rewrites_existing_entry() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        let mut saved = repo.save(list("Work")).unwrap();
        saved.name = "Home".to_string();
        repo.update(saved.clone()).unwrap();

        assert_eq!(repo.get_by_id(&saved.id).unwrap().unwrap().name, "Home");
    }

    #[test]
    fn delete_is_noop_for_unknown_id() {
        let dir = setup_dir();
        let repo = JsonTaskListRepository::open(dir.path().join("task_lists.json"));

        repo.delete("missing").unwrap();
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = setup_dir();
        let path = dir.path().join("task_lists.json");

        let saved = {
            let repo = JsonTaskListRepository::open(&path);
            repo.save(list("Work")).unwrap()
        };

        let reopened = JsonTaskListRepository::open(&path);
        assert_eq!(reopened.get_by_id(&saved.id).unwrap(), Some(saved));
    }

    #[test]
    fn delete_survives_reopen() {
        let dir = setup_dir();
        let path = dir.path().join("task_lists.json");

        let saved = {
            let repo = JsonTaskListRepository::open(&path);
            let saved = repo.save(list("Work")).unwrap();
            repo.delete(&saved.id).unwrap();
            saved
        };

        let reopened = JsonTaskListRepository::open(&path);
        assert!(reopened.get_by_id(&saved.id).unwrap().is_none());
        assert!(reopened.get_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = setup_dir();
        let path = dir.path().join("task_lists.json");
        std::fs::write(&path, "this is not json").unwrap();

        let repo = JsonTaskListRepository::open(&path);
        assert!(repo.get_all().unwrap().is_empty());

        // Store remains usable after recovery
        let saved = repo.save(list("Work")).unwrap();
        assert!(repo.get_by_id(&saved.id).unwrap().is_some());
    }
}

mod task_store {
    use super::*;

    #[test]
    fn save_and_get_round_trip() {
        let dir = setup_dir();
        let repo = JsonTaskRepository::open(dir.path().join("tasks.json"));

        let saved = repo.save(task("Write spec", "list-1")).unwrap();
        assert_eq!(repo.get_by_id(&saved.id).unwrap(), Some(saved));
    }

    #[test]
    fn get_by_list_id_filters_tasks() {
        let dir = setup_dir();
        let repo = JsonTaskRepository::open(dir.path().join("tasks.json"));

        repo.save(task("a", "list-1")).unwrap();
        repo.save(task("b", "list-1")).unwrap();
        repo.save(task("c", "list-2")).unwrap();

        let found = repo.get_by_list_id("list-1").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|t| t.list_id == "list-1"));
    }

    #[test]
    fn rich_fields_survive_reopen() {
        let dir = setup_dir();
        let path = dir.path().join("tasks.json");

        let saved = {
            let repo = JsonTaskRepository::open(&path);
            let mut t = task("Write spec", "list-1");
            t.attachment = Some(b"binary \x00 payload".to_vec());
            t.checklist = vec!["outline".to_string(), "draft".to_string()];
            t.due_date = taskboard::model::task::parse_datetime("2026-09-01");
            t.done = true;
            repo.save(t).unwrap()
        };

        let reopened = JsonTaskRepository::open(&path);
        let found = reopened.get_by_id(&saved.id).unwrap().unwrap();
        assert_eq!(found.attachment.as_deref(), Some(&b"binary \x00 payload"[..]));
        assert_eq!(found.checklist, vec!["outline", "draft"]);
        assert_eq!(found.due_date, saved.due_date);
        assert!(found.done);
    }

    #[test]
    fn record_missing_created_at_resets_store() {
        let dir = setup_dir();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id": "t1", "title": "Write spec", "list_id": "list-1"}]"#,
        )
        .unwrap();

        let repo = JsonTaskRepository::open(&path);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_entry() {
        let dir = setup_dir();
        let repo = JsonTaskRepository::open(dir.path().join("tasks.json"));

        let saved = repo.save(task("Write spec", "list-1")).unwrap();
        repo.delete(&saved.id).unwrap();

        assert!(repo.get_by_id(&saved.id).unwrap().is_none());
    }
}
