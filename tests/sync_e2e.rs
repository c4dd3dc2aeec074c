#[cfg(test)]
mod tests {
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use taiga_sync::api::Taiga;
    use taiga_sync::libs::config::{Config, PROJECT_SLUG, TAIGA_PASSWORD, TAIGA_URL, TAIGA_USER};
    use taiga_sync::libs::dedup::DedupStore;
    use taiga_sync::libs::journal::{Level, MemoryJournal};
    use taiga_sync::libs::sync::{SyncSummary, Syncer};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    const INPUT: &str = "REF-1\nTask A|2026-02-01|10:00|60\n";

    struct SyncContext {
        server: ServerGuard,
        temp_dir: TempDir,
        config: Config,
    }

    impl SyncContext {
        fn input(&self, content: &str) -> PathBuf {
            let path = self.temp_dir.path().join("worklog.txt");
            fs::write(&path, content).unwrap();
            path
        }

        fn log_dir(&self) -> PathBuf {
            self.temp_dir.path().join("logs")
        }

        /// Lookups every run performs before touching the entries.
        async fn mock_lookups(&mut self) -> Vec<Mock> {
            let auth = self
                .server
                .mock("POST", "/api/v1/auth")
                .match_body(Matcher::PartialJson(json!({"type": "normal", "username": "jane"})))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"auth_token": "tok-123", "id": 7, "full_name": "Jane Doe"}"#)
                .create_async()
                .await;
            let project = self
                .server
                .mock("GET", "/api/v1/projects/by_slug")
                .match_query(Matcher::UrlEncoded("slug".into(), "jane-demo".into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"id": 11}"#)
                .create_async()
                .await;
            let status = self
                .server
                .mock("GET", "/api/v1/task-statuses")
                .match_query(Matcher::UrlEncoded("project".into(), "11".into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"[{"id": 1, "name": "New"}, {"id": 3, "name": "Done"}]"#)
                .create_async()
                .await;
            let story = self
                .server
                .mock("GET", "/api/v1/userstories/by_ref")
                .match_query(Matcher::UrlEncoded("ref".into(), "REF-1".into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"id": 42}"#)
                .create_async()
                .await;
            vec![auth, project, status, story]
        }

        async fn mock_attributes(&mut self, hits: usize) -> (Mock, Mock) {
            let attributes = self
                .server
                .mock("GET", "/api/v1/task-custom-attributes")
                .match_query(Matcher::UrlEncoded("project".into(), "11".into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"[{"id": 5, "name": "Activity Date"}, {"id": 6, "name": "Start Time"}, {"id": 8, "name": "Total Time Spent"}]"#)
                .expect(hits)
                .create_async()
                .await;
            let patch = self
                .server
                .mock("PATCH", "/api/v1/tasks/custom-attributes-values/99")
                .match_body(Matcher::Json(json!({
                    "attributes_values": {"5": "2026-02-01", "6": "10:00", "8": "60"},
                    "version": 1
                })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body("{}")
                .expect(hits)
                .create_async()
                .await;
            (attributes, patch)
        }
    }

    impl AsyncTestContext for SyncContext {
        async fn setup() -> Self {
            let server = Server::new_async().await;
            let url = server.url();
            let config = Config::from_lookup(|key| {
                match key {
                    TAIGA_URL => Some(url.clone()),
                    TAIGA_USER => Some("jane".to_string()),
                    TAIGA_PASSWORD => Some("secret".to_string()),
                    PROJECT_SLUG => Some("jane-demo".to_string()),
                    _ => None,
                }
            })
            .unwrap();

            SyncContext {
                server,
                temp_dir: tempfile::tempdir().unwrap(),
                config,
            }
        }
    }

    #[test_context(SyncContext)]
    #[tokio::test]
    async fn test_second_run_creates_nothing(ctx: &mut SyncContext) {
        let _lookups = ctx.mock_lookups().await;
        let create = ctx
            .server
            .mock("POST", "/api/v1/tasks")
            .match_body(Matcher::PartialJson(json!({
                "subject": "Task A",
                "assigned_to": 7,
                "status": 3,
                "project": 11,
                "user_story": 42
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 99}"#)
            .expect(1)
            .create_async()
            .await;
        let (attributes, patch) = ctx.mock_attributes(1).await;

        let taiga = Taiga::new(&ctx.config.taiga).unwrap();
        let journal = MemoryJournal::new();
        let syncer = Syncer::new(&taiga, &journal, DedupStore::new(ctx.log_dir()));
        let input = ctx.input(INPUT);

        let first = syncer.run(&ctx.config, &input).await.unwrap();
        assert_eq!(
            first,
            SyncSummary {
                created: 1,
                ..SyncSummary::default()
            }
        );

        let dedup_log = ctx.log_dir().join("created_tasks_2026-02.log");
        assert_eq!(fs::read_to_string(&dedup_log).unwrap(), "Task A|2026-02-01|10:00|60\n");

        let second = syncer.run(&ctx.config, &input).await.unwrap();
        assert_eq!(
            second,
            SyncSummary {
                skipped: 1,
                ..SyncSummary::default()
            }
        );
        assert_eq!(fs::read_to_string(&dedup_log).unwrap(), "Task A|2026-02-01|10:00|60\n");

        create.assert_async().await;
        attributes.assert_async().await;
        patch.assert_async().await;

        let infos = journal.messages(Level::Info);
        assert!(infos.contains(&"Task 'Task A' already created, skipping.".to_string()));
        let successes = journal.messages(Level::Success);
        assert!(successes.contains(&"Subtask 'Task A' created and the custom fields updated.".to_string()));
        assert!(journal.messages(Level::Error).is_empty());
    }

    #[test_context(SyncContext)]
    #[tokio::test]
    async fn test_failed_create_is_logged_and_not_recorded(ctx: &mut SyncContext) {
        let _lookups = ctx.mock_lookups().await;
        let _create = ctx
            .server
            .mock("POST", "/api/v1/tasks")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let (attributes, patch) = ctx.mock_attributes(0).await;

        let taiga = Taiga::new(&ctx.config.taiga).unwrap();
        let journal = MemoryJournal::new();
        let syncer = Syncer::new(&taiga, &journal, DedupStore::new(ctx.log_dir()));
        let input = ctx.input(INPUT);

        let summary = syncer.run(&ctx.config, &input).await.unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 0);
        assert!(!ctx.log_dir().join("created_tasks_2026-02.log").exists());
        assert_eq!(
            journal.messages(Level::Error),
            vec!["Failed to create task: Task A | Error: status 500: boom".to_string()]
        );
        attributes.assert_async().await;
        patch.assert_async().await;
    }

    #[test_context(SyncContext)]
    #[tokio::test]
    async fn test_rejected_login_stops_the_run(ctx: &mut SyncContext) {
        let _auth = ctx
            .server
            .mock("POST", "/api/v1/auth")
            .with_status(401)
            .with_body(r#"{"detail": "Invalid credentials"}"#)
            .create_async()
            .await;
        let project = ctx
            .server
            .mock("GET", "/api/v1/projects/by_slug")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let taiga = Taiga::new(&ctx.config.taiga).unwrap();
        let journal = MemoryJournal::new();
        let syncer = Syncer::new(&taiga, &journal, DedupStore::new(ctx.log_dir()));
        let input = ctx.input(INPUT);

        let err = syncer.run(&ctx.config, &input).await.unwrap_err();

        assert!(err.to_string().starts_with("Authentication failed. Please check your credentials"));
        project.assert_async().await;
    }
}
