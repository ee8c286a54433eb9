//! SQLite store behavior against an in-memory database.

use chrono::NaiveDate;
use emote_common::test_utils::{discord_fixtures, init_test_logging, mock_date};
use emote_common::{EmoteId, EmoteRecord, GuildId, ServerInfo};
use emote_tracking::{EmoteStore, SqliteEmoteStore, StatisticsQuery};

fn today() -> NaiveDate {
    mock_date(2024, 6, 15)
}

fn days_ago(n: u64) -> NaiveDate {
    today() - chrono::Days::new(n)
}

fn query(server: GuildId) -> StatisticsQuery {
    StatisticsQuery {
        server,
        limit: 10,
        day_window: 30,
        emote: None,
        ascending: false,
    }
}

async fn store() -> SqliteEmoteStore {
    init_test_logging();
    SqliteEmoteStore::in_memory().await.unwrap()
}

#[tokio::test]
async fn test_insert_and_query_counts() {
    let store = store().await;
    let server = discord_fixtures::test_server();
    let pog = EmoteRecord::new("pog", EmoteId(111));
    let kek = EmoteRecord::new("kek", EmoteId(222));

    store
        .insert_emote_log_on(&[pog.clone(), kek.clone(), pog.clone()], &server, today())
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[kek.clone()], &server, days_ago(3))
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[kek.clone()], &server, days_ago(4))
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "kek");
    assert_eq!(rows[0].window_count, 3);
    assert_eq!(rows[0].total_count, 3);
    assert_eq!(rows[1].name, "pog");
    assert_eq!(rows[1].window_count, 2);
    assert_eq!(rows[1].markup(), "<:pog:111>");
}

#[tokio::test]
async fn test_window_excludes_boundary_day() {
    let store = store().await;
    let server = discord_fixtures::test_server();
    let pog = EmoteRecord::new("pog", EmoteId(111));

    store
        .insert_emote_log_on(&[pog.clone()], &server, days_ago(30))
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[pog.clone()], &server, days_ago(29))
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].window_count, 1);
    assert_eq!(rows[0].total_count, 2);
}

#[tokio::test]
async fn test_emote_without_recent_use_is_not_listed() {
    let store = store().await;
    let server = discord_fixtures::test_server();

    store
        .insert_emote_log_on(&[EmoteRecord::new("old", EmoteId(333))], &server, days_ago(60))
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_ordering_limit_and_filter() {
    let store = store().await;
    let server = discord_fixtures::test_server();
    let a = EmoteRecord::new("a", EmoteId(111));
    let b = EmoteRecord::new("b", EmoteId(222));
    let c = EmoteRecord::new("c", EmoteId(333));

    store
        .insert_emote_log_on(&[a.clone(), b.clone(), c.clone()], &server, today())
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[b.clone(), c.clone()], &server, today())
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[c.clone()], &server, today())
        .await
        .unwrap();

    let descending = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    let names: Vec<_> = descending.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["c", "b", "a"]);

    let ascending = StatisticsQuery {
        ascending: true,
        limit: 2,
        ..query(server.id)
    };
    let rows = store.query_statistics_on(&ascending, today()).await.unwrap();
    let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);

    let filtered = StatisticsQuery {
        emote: Some(EmoteId(222)),
        ..query(server.id)
    };
    let rows = store.query_statistics_on(&filtered, today()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, EmoteId(222));
    assert_eq!(rows[0].window_count, 2);
}

#[tokio::test]
async fn test_servers_are_isolated() {
    let store = store().await;
    let first = discord_fixtures::test_server();
    let second = ServerInfo::new(GuildId(42), "Elsewhere");
    let pog = EmoteRecord::new("pog", EmoteId(111));

    store
        .insert_emote_log_on(&[pog.clone()], &first, today())
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[pog.clone(), pog.clone()], &second, today())
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(first.id), today()).await.unwrap();
    assert_eq!(rows[0].window_count, 1);
    let rows = store.query_statistics_on(&query(second.id), today()).await.unwrap();
    assert_eq!(rows[0].window_count, 2);
}

#[tokio::test]
async fn test_renamed_emote_keeps_history() {
    let store = store().await;
    let server = discord_fixtures::test_server();

    store
        .insert_emote_log_on(&[EmoteRecord::new("pog", EmoteId(111))], &server, today())
        .await
        .unwrap();
    store
        .insert_emote_log_on(&[EmoteRecord::new("pogchamp", EmoteId(111))], &server, today())
        .await
        .unwrap();
    // Re-uploaded under the same name with a new id.
    store
        .insert_emote_log_on(&[EmoteRecord::new("pogchamp", EmoteId(444))], &server, today())
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "pogchamp");
    assert_eq!(rows[0].id, EmoteId(444));
    assert_eq!(rows[0].total_count, 3);
}

#[tokio::test]
async fn test_full_range_snowflakes() {
    let store = store().await;
    let server = ServerInfo::new(GuildId(u64::MAX), "Max");
    let emote = EmoteRecord::new("edge", EmoteId(u64::MAX - 1));

    store
        .insert_emote_log_on(&[emote.clone()], &server, today())
        .await
        .unwrap();

    let rows = store.query_statistics_on(&query(server.id), today()).await.unwrap();
    assert_eq!(rows[0].id, emote.id);
}

#[tokio::test]
async fn test_purge_removes_old_buckets_only() {
    let store = store().await;
    let server = discord_fixtures::test_server();
    let pog = EmoteRecord::new("pog", EmoteId(111));

    for age in [0, 29, 30, 45] {
        store
            .insert_emote_log_on(&[pog.clone()], &server, days_ago(age))
            .await
            .unwrap();
    }

    let removed = tokio_test::assert_ok!(store.purge_older_than_on(30, today()).await);
    assert_eq!(removed, 2);

    let wide = StatisticsQuery {
        day_window: 365,
        ..query(server.id)
    };
    let rows = store.query_statistics_on(&wide, today()).await.unwrap();
    assert_eq!(rows[0].window_count, 2);
    // Totals are never purged.
    assert_eq!(rows[0].total_count, 4);
}

#[tokio::test]
async fn test_trait_methods_use_current_day() {
    let store = store().await;
    let server = discord_fixtures::test_server();

    store
        .insert_emote_log(&[EmoteRecord::new("pog", EmoteId(111))], &server)
        .await
        .unwrap();

    let rows = store.query_statistics(&query(server.id)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(store.purge_older_than(30).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_insert_is_noop() {
    let store = store().await;
    let server = discord_fixtures::test_server();
    store.insert_emote_log_on(&[], &server, today()).await.unwrap();
    assert!(store
        .query_statistics_on(&query(server.id), today())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_connect_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("emotes.db").display());

    let store = SqliteEmoteStore::connect(&url, 2).await.unwrap();
    store
        .insert_emote_log(
            &[EmoteRecord::new("pog", EmoteId(111))],
            &discord_fixtures::test_server(),
        )
        .await
        .unwrap();
    drop(store);

    let reopened = SqliteEmoteStore::connect(&url, 2).await.unwrap();
    let rows = reopened
        .query_statistics(&query(discord_fixtures::test_server().id))
        .await
        .unwrap();
    assert_eq!(rows[0].total_count, 1);
}
