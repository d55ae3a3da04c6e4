use quotes_core::{
    connect, connect_in_memory, ConnectError, NewQuote, QuoteRepository, RepoError,
    SqliteQuoteRepository,
};
use std::time::Duration;

fn repo() -> SqliteQuoteRepository {
    SqliteQuoteRepository::new(connect_in_memory().unwrap())
}

#[test]
fn create_and_get_roundtrip() {
    let repo = repo();

    let id = repo
        .create(&NewQuote::new("bill", "excellent!"))
        .unwrap();

    let loaded = repo.by_id(id).unwrap();
    assert!(loaded.id > 0);
    assert_eq!(loaded.author, "bill");
    assert_eq!(loaded.message, "excellent!");
}

#[test]
fn new_store_starts_empty() {
    assert!(repo().all().unwrap().is_empty());
}

#[test]
fn create_rejects_empty_author_before_message() {
    let repo = repo();

    let err = repo.create(&NewQuote::new("", "")).unwrap_err();
    assert!(matches!(err, RepoError::NoAuthor));
    assert_eq!(err.to_string(), "must provide author");

    let err = repo.create(&NewQuote::new("ted", "")).unwrap_err();
    assert!(matches!(err, RepoError::NoMessage));
    assert_eq!(err.to_string(), "must provide message");

    assert!(repo.all().unwrap().is_empty());
}

#[test]
fn unknown_id_returns_not_found() {
    let err = repo().by_id(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn ids_are_assigned_by_database_and_increase() {
    let repo = repo();

    let first = repo.create(&NewQuote::new("a", "one")).unwrap();
    let second = repo.create(&NewQuote::new("b", "two")).unwrap();
    assert!(first > 0);
    assert!(second > first);

    let all = repo.all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first);
    assert_eq!(all[1].id, second);
}

#[test]
fn all_skips_rows_that_cannot_be_scanned() {
    let conn = connect_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO quotes (author, message) VALUES ('bill', 'excellent!');
         INSERT INTO quotes (author, message) VALUES (NULL, 'orphaned');
         INSERT INTO quotes (author, message) VALUES ('ted', 'bogus!');",
    )
    .unwrap();
    let repo = SqliteQuoteRepository::new(conn);

    let authors: Vec<_> = repo
        .all()
        .unwrap()
        .into_iter()
        .map(|quote| quote.author)
        .collect();
    assert_eq!(authors, vec!["bill".to_string(), "ted".to_string()]);
}

#[test]
fn by_id_reports_scan_failure_for_unreadable_row() {
    let conn = connect_in_memory().unwrap();
    conn.execute_batch("INSERT INTO quotes (id, author, message) VALUES (7, NULL, 'orphaned');")
        .unwrap();
    let repo = SqliteQuoteRepository::new(conn);

    let err = repo.by_id(7).unwrap_err();
    assert!(matches!(err, RepoError::Scan(_)));
    assert!(err.to_string().starts_with("couldn't scan row into quote"));
}

#[test]
fn call_past_deadline_is_interrupted() {
    let conn = connect_in_memory().unwrap();
    {
        let mut stmt = conn
            .prepare("INSERT INTO quotes (author, message) VALUES ('a', 'm');")
            .unwrap();
        for _ in 0..2_000 {
            stmt.execute([]).unwrap();
        }
    }
    let repo = SqliteQuoteRepository::with_timeout(conn, Duration::ZERO);

    let err = repo.all().unwrap_err();
    assert!(matches!(err, RepoError::Timeout(limit) if limit == Duration::ZERO));
}

#[test]
fn file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.db");
    let dsn = path.to_str().unwrap();

    let id = {
        let repo = SqliteQuoteRepository::connect(dsn).unwrap();
        repo.create(&NewQuote::new("bill", "excellent!")).unwrap()
    };

    let repo = SqliteQuoteRepository::new(connect(dsn).unwrap());
    assert_eq!(repo.by_id(id).unwrap().message, "excellent!");
}

#[test]
fn connect_distinguishes_open_and_ping_failures() {
    let dir = tempfile::tempdir().unwrap();

    let missing_parent = dir.path().join("missing").join("quotes.db");
    let err = connect(missing_parent.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConnectError::Open(_)));
    assert!(err.to_string().starts_with("couldn't connect to RDBMS"));

    let garbage = dir.path().join("garbage.db");
    std::fs::write(&garbage, "this is not a sqlite database".repeat(64)).unwrap();
    let err = connect(garbage.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConnectError::Ping(_)));
    assert!(err.to_string().starts_with("couldn't connect to database"));
}
