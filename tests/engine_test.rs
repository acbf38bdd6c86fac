use std::path::Path;
use std::sync::Arc;

use datawright::engine::Engine;
use datawright::engine::executor::{EngineConfig, TaskEngine};
use datawright::error::TaskError;
use datawright::handler;
use datawright::llm::mock::MockLlm;
use datawright::llm::{LlmInput, LlmRequest};
use datawright::ops::remote::{
    CREDIT_CARD_INSTRUCTION, EMAIL_SENDER_INSTRUCTION, SIMILAR_COMMENTS_INSTRUCTION,
};
use datawright::store::sqlite::SqliteReader;
use datawright::tools::RecordingRunner;

struct Harness {
    dir: tempfile::TempDir,
    shell: Arc<RecordingRunner>,
    llm: Arc<MockLlm>,
    engine: TaskEngine,
}

fn build(shell: RecordingRunner, llm: MockLlm) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let shell = Arc::new(shell);
    let llm = Arc::new(llm);
    let engine = TaskEngine::new(
        EngineConfig {
            root: dir.path().to_path_buf(),
            formatter: vec![
                "npx".to_string(),
                "prettier@3.4.2".to_string(),
                "--write".to_string(),
            ],
        },
        shell.clone(),
        llm.clone(),
        Arc::new(SqliteReader::new()),
    );
    Harness {
        dir,
        shell,
        llm,
        engine,
    }
}

fn harness() -> Harness {
    build(RecordingRunner::new(), MockLlm::new(vec![]))
}

fn with_llm(reply: &str) -> Harness {
    build(RecordingRunner::new(), MockLlm::replying(reply))
}

impl Harness {
    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, contents: impl AsRef<[u8]>) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root().join(relative)).unwrap()
    }

    fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }
}

// ── Resolution ────────────────────────────────────────────────────

#[tokio::test]
async fn unrecognized_task_fails() {
    let h = harness();
    let err = h.engine.run("clean my room").await.unwrap_err();
    assert!(matches!(err, TaskError::UnrecognizedTask { .. }));
}

#[tokio::test]
async fn first_declared_phrase_wins() {
    let h = harness();
    h.write("format.md", "#  Title\n");
    h.write("dates.txt", "2024-01-03\n");

    h.engine
        .run("count wednesdays and format markdown")
        .await
        .unwrap();

    // Formatter ran; the weekday count did not.
    assert_eq!(h.shell.calls().len(), 1);
    assert!(!h.exists("dates-wednesdays.txt"));
}

// ── Format markdown ───────────────────────────────────────────────

#[tokio::test]
async fn format_markdown_invokes_formatter_on_file() {
    let h = harness();
    h.write("format.md", "#  Title\n");

    h.engine.run("Format markdown please").await.unwrap();

    let calls = h.shell.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "npx");
    let target = h.root().join("format.md");
    assert_eq!(
        calls[0].args,
        vec![
            "prettier@3.4.2".to_string(),
            "--write".to_string(),
            target.to_string_lossy().into_owned()
        ]
    );
}

#[tokio::test]
async fn format_markdown_tool_failure() {
    let h = build(RecordingRunner::failing("exit code 2"), MockLlm::new(vec![]));
    h.write("format.md", "x");

    let err = h.engine.run("format markdown").await.unwrap_err();
    assert!(matches!(err, TaskError::ToolFailure { .. }));
    assert!(err.to_string().contains("exit code 2"));
}

#[tokio::test]
async fn format_markdown_missing_file_never_calls_tool() {
    let h = harness();
    let err = h.engine.run("format markdown").await.unwrap_err();
    assert!(matches!(err, TaskError::MissingInput { .. }));
    assert!(h.shell.calls().is_empty());
}

// ── Count wednesdays ──────────────────────────────────────────────

#[tokio::test]
async fn count_wednesdays_writes_count() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n2024-01-10\n2024-01-17\n");

    h.engine
        .run("Please count wednesdays in my file")
        .await
        .unwrap();

    assert_eq!(h.read("dates-wednesdays.txt"), "3");
}

#[tokio::test]
async fn count_wednesdays_malformed_date_writes_nothing() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n03/01/2024\n");

    let err = h.engine.run("count wednesdays").await.unwrap_err();
    assert!(matches!(err, TaskError::InvalidInput { .. }));
    assert!(!h.exists("dates-wednesdays.txt"));
}

#[tokio::test]
async fn count_wednesdays_blank_line_is_invalid_input() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n\n2024-01-10\n");

    let err = h.engine.run("count wednesdays").await.unwrap_err();
    assert!(matches!(err, TaskError::InvalidInput { .. }));
    assert!(!h.exists("dates-wednesdays.txt"));
}

#[tokio::test]
async fn count_wednesdays_is_idempotent() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n2024-01-04\n");

    h.engine.run("count wednesdays").await.unwrap();
    let first = h.read("dates-wednesdays.txt");
    h.engine.run("count wednesdays").await.unwrap();
    assert_eq!(h.read("dates-wednesdays.txt"), first);
}

// ── Sort contacts ─────────────────────────────────────────────────

#[tokio::test]
async fn sort_contacts_orders_by_last_then_first() {
    let h = harness();
    h.write(
        "contacts.json",
        r#"[{"first_name":"Bob","last_name":"Lee"},{"first_name":"Amy","last_name":"Lee"}]"#,
    );

    h.engine.run("sort contacts").await.unwrap();

    let out = h.read("contacts-sorted.json");
    assert!(out.find("Amy").unwrap() < out.find("Bob").unwrap());
    assert!(out.contains("\n  {\n    \"first_name\""));
}

#[tokio::test]
async fn sort_contacts_missing_input_names_path() {
    let h = harness();
    let err = h.engine.run("sort contacts").await.unwrap_err();
    match err {
        TaskError::MissingInput { path, .. } => assert_eq!(path, h.root().join("contacts.json")),
        other => panic!("expected MissingInput, got {other:?}"),
    }
    assert!(!h.exists("contacts-sorted.json"));
}

#[tokio::test]
async fn sort_contacts_leaves_previous_output_on_failure() {
    let h = harness();
    h.write("contacts-sorted.json", "previous");
    h.write("contacts.json", "not json");

    let err = h.engine.run("sort contacts").await.unwrap_err();
    assert!(matches!(err, TaskError::InvalidInput { .. }));
    assert_eq!(h.read("contacts-sorted.json"), "previous");
}

#[tokio::test]
async fn sort_contacts_is_idempotent() {
    let h = harness();
    h.write(
        "contacts.json",
        r#"[{"first_name":"Zed","last_name":"Ng"},{"first_name":"Al","last_name":"Bo"}]"#,
    );
    h.engine.run("sort contacts").await.unwrap();
    let first = h.read("contacts-sorted.json");
    h.engine.run("sort contacts").await.unwrap();
    assert_eq!(h.read("contacts-sorted.json"), first);
}

// ── Markdown index ────────────────────────────────────────────────

#[tokio::test]
async fn markdown_index_maps_files_to_first_h1() {
    let h = harness();
    h.write("docs/a.md", "# Alpha\ntext\n# Not this\n");
    h.write("docs/b.md", "no heading here\n## sub\n");
    h.write("docs/c.md", "intro\n# Gamma \n");
    h.write("docs/notes.txt", "# Ignored\n");

    h.engine.run("build the markdown index").await.unwrap();

    let index: serde_json::Value = serde_json::from_str(&h.read("docs/index.json")).unwrap();
    assert_eq!(
        index,
        serde_json::json!({"a.md": "Alpha", "c.md": "Gamma"})
    );
}

#[tokio::test]
async fn markdown_index_missing_dir() {
    let h = harness();
    let err = h.engine.run("markdown index").await.unwrap_err();
    assert!(matches!(err, TaskError::MissingInput { ref path, .. } if path.ends_with("docs")));
    assert_eq!(
        err.to_string(),
        format!("directory {} not found", h.root().join("docs").display())
    );
}

#[tokio::test]
async fn markdown_index_requires_directory_not_file() {
    let h = harness();
    h.write("docs", "i am a file");
    let err = h.engine.run("markdown index").await.unwrap_err();
    assert!(matches!(err, TaskError::MissingInput { .. }));
}

#[tokio::test]
async fn markdown_index_is_idempotent() {
    let h = harness();
    h.write("docs/x.md", "# X\n");
    h.write("docs/y.md", "# Y\n");
    h.engine.run("markdown index").await.unwrap();
    let first = h.read("docs/index.json");
    h.engine.run("markdown index").await.unwrap();
    assert_eq!(h.read("docs/index.json"), first);
}

// ── Remote-backed operations ──────────────────────────────────────

#[tokio::test]
async fn extract_email_sends_content_and_trims_reply() {
    let h = with_llm("  sender@example.com \n");
    h.write("email.txt", "From: Sender <sender@example.com>\nHi");

    h.engine.run("extract email sender").await.unwrap();

    assert_eq!(h.read("email-sender.txt"), "sender@example.com");
    assert_eq!(
        h.llm.requests(),
        vec![LlmRequest::text(
            EMAIL_SENDER_INSTRUCTION,
            "From: Sender <sender@example.com>\nHi"
        )]
    );
}

#[tokio::test]
async fn credit_card_sends_image_and_strips_whitespace() {
    let h = with_llm("4026 3990 0000 1234\n");
    h.write("credit-card.png", [0x89u8, b'P', b'N', b'G']);

    h.engine.run("read the credit card").await.unwrap();

    assert_eq!(h.read("credit-card.txt"), "4026399000001234");
    let requests = h.llm.requests();
    assert_eq!(requests[0].instruction, CREDIT_CARD_INSTRUCTION);
    assert!(matches!(
        &requests[0].input,
        LlmInput::Image { data, .. } if data == &vec![0x89u8, b'P', b'N', b'G']
    ));
}

#[tokio::test]
async fn similar_comments_joins_lines_and_writes_reply() {
    let h = with_llm("great product\r\ngreat item\n");
    h.write("comments.txt", "great product\nterrible\ngreat item\n");

    h.engine.run("find similar comments").await.unwrap();

    assert_eq!(h.read("comments-similar.txt"), "great product\ngreat item");
    assert_eq!(
        h.llm.requests()[0],
        LlmRequest::text(
            SIMILAR_COMMENTS_INSTRUCTION,
            "great product\nterrible\ngreat item"
        )
    );
}

#[tokio::test]
async fn remote_failure_is_wrapped_and_writes_nothing() {
    let h = build(
        RecordingRunner::new(),
        MockLlm::new(vec![Err("authentication failed (401)".to_string())]),
    );
    h.write("email.txt", "From: a@b.c");

    let err = h.engine.run("extract email").await.unwrap_err();
    match &err {
        TaskError::RemoteServiceFailure { operation, message } => {
            assert_eq!(*operation, "extract email sender");
            assert!(message.contains("authentication"));
        }
        other => panic!("expected RemoteServiceFailure, got {other:?}"),
    }
    assert!(!h.exists("email-sender.txt"));
}

// ── Gold ticket sales ─────────────────────────────────────────────

fn ticket_db(path: &Path, rows: &[(&str, i64, f64)]) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE tickets (type TEXT, units INTEGER, price REAL)")
        .unwrap();
    for (kind, units, price) in rows {
        conn.execute(
            "INSERT INTO tickets (type, units, price) VALUES (?1, ?2, ?3)",
            rusqlite::params![kind, units, price],
        )
        .unwrap();
    }
}

#[tokio::test]
async fn gold_sales_sums_units_times_price() {
    let h = harness();
    ticket_db(
        &h.root().join("ticket-sales.db"),
        &[("Gold", 2, 10.0), ("Gold", 1, 5.0), ("Silver", 3, 7.0)],
    );

    h.engine.run("compute gold sales").await.unwrap();

    assert_eq!(h.read("ticket-sales-gold.txt"), "25.0");
}

#[tokio::test]
async fn gold_sales_without_gold_rows_writes_null_marker() {
    let h = harness();
    ticket_db(&h.root().join("ticket-sales.db"), &[("Silver", 3, 7.0)]);

    h.engine.run("gold sales").await.unwrap();

    assert_eq!(h.read("ticket-sales-gold.txt"), "null");
}

#[tokio::test]
async fn gold_sales_bad_schema_is_tool_failure() {
    let h = harness();
    let conn = rusqlite::Connection::open(h.root().join("ticket-sales.db")).unwrap();
    conn.execute_batch("CREATE TABLE other (x INTEGER)").unwrap();
    drop(conn);

    let err = h.engine.run("gold sales").await.unwrap_err();
    assert!(matches!(err, TaskError::ToolFailure { .. }));
    assert!(!h.exists("ticket-sales-gold.txt"));
}

// ── Handler ───────────────────────────────────────────────────────

#[tokio::test]
async fn handler_reports_success_and_failure() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n");

    let ok = handler::handle(&h.engine, "count wednesdays").await;
    assert_eq!(ok.status, 200);
    assert_eq!(ok.body["status"], "success");

    let missing = handler::handle(&h.engine, "sort contacts").await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["kind"], "missing_input");

    let unknown = handler::handle(&h.engine, "clean my room").await;
    assert_eq!(unknown.status, 400);
}

// ── Concurrency ───────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_runs_on_same_output_both_succeed() {
    let h = harness();
    h.write("dates.txt", "2024-01-03\n2024-01-10\n");

    let (a, b) = tokio::join!(
        h.engine.run("count wednesdays"),
        h.engine.run("count wednesdays")
    );
    a.unwrap();
    b.unwrap();
    assert_eq!(h.read("dates-wednesdays.txt"), "2");
}
