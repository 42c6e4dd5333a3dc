//! Integration tests for `JsonStore` against scratch directories.

use std::collections::HashSet;

use serde_json::{Value, json};
use tempfile::TempDir;
use vantage_core::{
  competitor::NewCompetitor,
  page::ListQuery,
  social::NewSocialContent,
  store::{CompetitorQuery, RecordStore},
};

use crate::{
  COMPETITORS_FILE, JsonStore, RESEARCH_RESULTS_FILE, SOCIAL_CONTENT_FILE, error::Error,
};

fn store() -> (JsonStore, TempDir) {
  let tmp = tempfile::tempdir().expect("tempdir");
  let store = JsonStore::new(tmp.path().join("data"), tmp.path().join("fallback"));
  (store, tmp)
}

fn with_status(name: &str, status: &str) -> NewCompetitor {
  let mut input = NewCompetitor::new(name);
  input.status = Some(status.into());
  input
}

// ─── Empty store ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let (s, tmp) = store();

  let page = s.list_competitors(&CompetitorQuery::default()).await.unwrap();
  assert!(page.items.is_empty());
  assert_eq!(page.total, 0);

  let page = s.list_research_results(ListQuery::default()).await.unwrap();
  assert!(page.items.is_empty());
  assert_eq!(page.total, 0);

  assert!(s.list_social_content("a1").await.unwrap().is_empty());
  assert!(!tmp.path().join("data").join(COMPETITORS_FILE).exists());
}

// ─── Competitors ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn acme_then_beta() {
  let (s, _tmp) = store();

  let acme = s.create_competitor(NewCompetitor::new("Acme")).await.unwrap();
  assert_eq!(acme.id, 1);
  assert_eq!(acme.name, "Acme");
  assert_eq!(acme.status, "active");
  assert_eq!(acme.created_at, acme.updated_at);
  assert_eq!(acme.website_url, None);

  let beta = s.create_competitor(NewCompetitor::new("Beta")).await.unwrap();
  assert_eq!(beta.id, 2);

  let page = s
    .list_competitors(&CompetitorQuery {
      status: None,
      page:   ListQuery::new(0, 1),
    })
    .await
    .unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.items, vec![acme]);
}

#[tokio::test]
async fn competitor_profile_roundtrip() {
  let (s, _tmp) = store();

  let mut input = NewCompetitor::new("Gamma");
  input.website_url = Some("https://gamma.example".into());
  input.discord_url = Some("https://discord.gg/gamma".into());
  input.industry = Some("fintech".into());
  input.status = Some("watching".into());

  let created = s.create_competitor(input).await.unwrap();
  let page = s.list_competitors(&CompetitorQuery::default()).await.unwrap();
  assert_eq!(page.items, vec![created.clone()]);
  assert_eq!(created.status, "watching");
  assert_eq!(created.industry.as_deref(), Some("fintech"));
}

#[tokio::test]
async fn status_filter_keeps_unfiltered_total() {
  let (s, _tmp) = store();
  s.create_competitor(with_status("A", "active")).await.unwrap();
  s.create_competitor(with_status("B", "archived")).await.unwrap();
  s.create_competitor(with_status("C", "active")).await.unwrap();

  let page = s
    .list_competitors(&CompetitorQuery {
      status: Some("archived".into()),
      page:   ListQuery::default(),
    })
    .await
    .unwrap();
  assert_eq!(page.total, 3);
  assert_eq!(page.items.len(), 1);
  assert_eq!(page.items[0].name, "B");
}

#[tokio::test]
async fn pagination_matches_slice() {
  let (s, _tmp) = store();
  for i in 0..12 {
    s.create_competitor(NewCompetitor::new(format!("c{i}"))).await.unwrap();
  }
  let all = s.list_competitors(&CompetitorQuery::default()).await.unwrap().items;
  assert_eq!(all.len(), 12);

  for skip in [0usize, 5, 11, 12, 30] {
    for limit in [1usize, 4, 100] {
      let page = s
        .list_competitors(&CompetitorQuery {
          status: None,
          page:   ListQuery::new(skip, limit),
        })
        .await
        .unwrap();
      let start = skip.min(all.len());
      let end = (skip + limit).min(all.len());
      assert_eq!(page.items, all[start..end].to_vec(), "skip={skip} limit={limit}");
      assert_eq!(page.total, 12);
    }
  }
}

#[tokio::test]
async fn next_id_follows_hand_edited_max() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(
    dir.join(COMPETITORS_FILE),
    r#"[{"id": 41, "name": "Edited", "status": "active",
        "created_at": "2024-01-01T00:00:00.000Z",
        "updated_at": "2024-01-01T00:00:00.000Z"}]"#,
  )
  .unwrap();

  let created = s.create_competitor(NewCompetitor::new("Next")).await.unwrap();
  assert_eq!(created.id, 42);
  let page = s.list_competitors(&CompetitorQuery::default()).await.unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.items[0].name, "Edited");
}

// ─── Persisted layout ────────────────────────────────────────────────────────

#[tokio::test]
async fn file_is_pretty_printed_array() {
  let (s, tmp) = store();
  s.create_competitor(NewCompetitor::new("Acme")).await.unwrap();

  let raw = std::fs::read_to_string(tmp.path().join("data").join(COMPETITORS_FILE)).unwrap();
  assert!(raw.starts_with("[\n  {"), "{raw}");
  let value: Value = serde_json::from_str(&raw).unwrap();
  let record = &value.as_array().unwrap()[0];
  assert!(record["logo_url"].is_null());
  assert_eq!(record["status"], "active");
}

#[tokio::test]
async fn malformed_file_reads_as_empty() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join(RESEARCH_RESULTS_FILE), "{ not json").unwrap();

  let page = s.list_research_results(ListQuery::default()).await.unwrap();
  assert_eq!(page.total, 0);

  let created = s.create_research_result(json!({"k": "v"})).await.unwrap();
  assert_eq!(created.id, 1);
}

#[tokio::test]
async fn non_array_file_reads_as_empty() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join(SOCIAL_CONTENT_FILE), r#"{"id": "sc-1"}"#).unwrap();

  assert!(s.get_social_content("sc-1").await.unwrap().is_none());
}

#[tokio::test]
async fn undecodable_elements_are_skipped() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(
    dir.join(RESEARCH_RESULTS_FILE),
    r#"[
      {"id": 1, "created_at": "2024-01-01T00:00:00Z", "data": 1},
      "garbage",
      {"id": 2, "created_at": "2024-01-02T00:00:00Z", "data": null}
    ]"#,
  )
  .unwrap();

  let page = s.list_research_results(ListQuery::default()).await.unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.items[1].data, Value::Null);
}

#[tokio::test]
async fn create_preserves_elements_it_cannot_decode() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  let legacy = json!({"id": 5, "name": "Legacy", "created_at": "2024-01-01"});
  let extended = json!({
    "id": 2, "name": "Kept", "status": "active",
    "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z",
    "notes": "keep me"
  });
  std::fs::write(
    dir.join(COMPETITORS_FILE),
    serde_json::to_string(&json!([legacy, extended])).unwrap(),
  )
  .unwrap();

  // The hidden legacy record still reserves its id.
  let created = s.create_competitor(NewCompetitor::new("New")).await.unwrap();
  assert_eq!(created.id, 6);

  let raw = std::fs::read_to_string(dir.join(COMPETITORS_FILE)).unwrap();
  let on_disk: Vec<Value> = serde_json::from_str(&raw).unwrap();
  assert_eq!(on_disk.len(), 3);
  assert_eq!(on_disk[0], legacy);
  assert_eq!(on_disk[1]["notes"], "keep me");
  assert_eq!(on_disk[2]["name"], "New");

  let page = s.list_competitors(&CompetitorQuery::default()).await.unwrap();
  let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["Kept", "New"]);
}

#[tokio::test]
async fn exhausted_ids_fail_without_touching_the_file() {
  let (s, tmp) = store();
  let dir = tmp.path().join("data");
  std::fs::create_dir_all(&dir).unwrap();
  let seeded = r#"[{"id": 9223372036854775807, "created_at": "2024-01-01T00:00:00Z", "data": 1}]"#;
  std::fs::write(dir.join(RESEARCH_RESULTS_FILE), seeded).unwrap();

  let err = s.create_research_result(json!(2)).await.unwrap_err();
  assert!(
    matches!(err, Error::Core(vantage_core::Error::IdExhausted { max: i64::MAX })),
    "{err}"
  );
  assert_eq!(
    std::fs::read_to_string(dir.join(RESEARCH_RESULTS_FILE)).unwrap(),
    seeded
  );
}

#[tokio::test]
async fn records_survive_reopen() {
  let tmp = tempfile::tempdir().unwrap();
  let data = tmp.path().join("data");

  let first = JsonStore::new(&data, tmp.path().join("fallback"));
  first.create_competitor(NewCompetitor::new("Acme")).await.unwrap();
  drop(first);

  let second = JsonStore::new(&data, tmp.path().join("fallback"));
  let page = second.list_competitors(&CompetitorQuery::default()).await.unwrap();
  assert_eq!(page.items[0].name, "Acme");
  let next = second.create_competitor(NewCompetitor::new("Beta")).await.unwrap();
  assert_eq!(next.id, 2);
}

// ─── Research results ────────────────────────────────────────────────────────

#[tokio::test]
async fn research_payload_is_verbatim() {
  let (s, _tmp) = store();
  let raw = r#"{"zeta":1,"alpha":{"nested":[true,null,"x"]},"mid":2.5}"#;
  let data: Value = serde_json::from_str(raw).unwrap();

  let created = s.create_research_result(data).await.unwrap();
  assert_eq!(created.id, 1);

  let page = s.list_research_results(ListQuery::default()).await.unwrap();
  assert_eq!(page.items, vec![created]);
  assert_eq!(serde_json::to_string(&page.items[0].data).unwrap(), raw);
}

#[tokio::test]
async fn research_ids_are_unique_and_paged() {
  let (s, _tmp) = store();
  for i in 0..5 {
    s.create_research_result(json!(i)).await.unwrap();
  }
  let page = s.list_research_results(ListQuery::new(3, 10)).await.unwrap();
  assert_eq!(page.total, 5);
  assert_eq!(page.items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 5]);
}

// ─── Social content ──────────────────────────────────────────────────────────

#[tokio::test]
async fn social_content_get_and_list_by_analysis() {
  let (s, _tmp) = store();

  let hello = s
    .create_social_content(NewSocialContent::new("a1", "hello"))
    .await
    .unwrap();
  assert!(hello.id.starts_with("sc-"));

  let mut tagged = NewSocialContent::new("a2", json!({"posts": ["one", "two"]}));
  tagged.source = Some("n8n".into());
  let other = s.create_social_content(tagged).await.unwrap();
  let hello2 = s
    .create_social_content(NewSocialContent::new("a1", Value::Null))
    .await
    .unwrap();

  let fetched = s.get_social_content(&hello.id).await.unwrap().unwrap();
  assert_eq!(fetched, hello);
  assert_eq!(fetched.content, json!("hello"));

  let by_a1 = s.list_social_content("a1").await.unwrap();
  assert_eq!(by_a1, vec![hello, hello2]);

  let by_a2 = s.list_social_content("a2").await.unwrap();
  assert_eq!(by_a2, vec![other]);
  assert_eq!(by_a2[0].source.as_deref(), Some("n8n"));

  assert!(s.list_social_content("nope").await.unwrap().is_empty());
}

#[tokio::test]
async fn social_content_missing_is_none() {
  let (s, _tmp) = store();
  s.create_social_content(NewSocialContent::new("a1", "x")).await.unwrap();
  assert!(s.get_social_content("sc-0-missing").await.unwrap().is_none());
}

#[tokio::test]
async fn social_content_file_uses_camel_case_parent() {
  let (s, tmp) = store();
  s.create_social_content(NewSocialContent::new("a1", "x")).await.unwrap();

  let raw = std::fs::read_to_string(tmp.path().join("data").join(SOCIAL_CONTENT_FILE)).unwrap();
  let value: Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(value[0]["analysisId"], "a1");
  assert!(value[0]["source"].is_null());
}

// ─── Fallback directory ──────────────────────────────────────────────────────

#[tokio::test]
async fn unwritable_primary_falls_back_transparently() {
  let tmp = tempfile::tempdir().unwrap();
  let blocker = tmp.path().join("read-only");
  std::fs::write(&blocker, b"not a directory").unwrap();
  let fallback = tmp.path().join("fallback");

  let s = JsonStore::new(blocker.join("data"), &fallback);
  let acme = s.create_competitor(NewCompetitor::new("Acme")).await.unwrap();
  let sc = s
    .create_social_content(NewSocialContent::new("a1", "hello"))
    .await
    .unwrap();

  assert_eq!(s.competitors_location().resolved_dir(), Some(fallback.as_path()));
  assert!(fallback.join(COMPETITORS_FILE).is_file());
  assert!(fallback.join(SOCIAL_CONTENT_FILE).is_file());

  let page = s.list_competitors(&CompetitorQuery::default()).await.unwrap();
  assert_eq!(page.items, vec![acme]);
  let fetched = s.get_social_content(&sc.id).await.unwrap();
  assert_eq!(fetched, Some(sc));
}

#[tokio::test]
async fn each_collection_resolves_lazily() {
  let (s, _tmp) = store();
  s.create_competitor(NewCompetitor::new("Acme")).await.unwrap();

  assert!(s.competitors_location().resolved_dir().is_some());
  assert!(s.research_location().resolved_dir().is_none());
  assert!(s.social_location().resolved_dir().is_none());
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_competitor_creates_lose_nothing() {
  let (s, _tmp) = store();

  let handles: Vec<_> = (0..40)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.create_competitor(NewCompetitor::new(format!("c{i}"))).await
      })
    })
    .collect();

  let mut ids = HashSet::new();
  for h in handles {
    let c = h.await.unwrap().unwrap();
    assert!(ids.insert(c.id), "duplicate id {}", c.id);
  }
  assert_eq!(ids, (1..=40).collect::<HashSet<i64>>());

  let page = s
    .list_competitors(&CompetitorQuery {
      status: None,
      page:   ListQuery::new(0, 1000),
    })
    .await
    .unwrap();
  assert_eq!(page.total, 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_research_and_social_creates_lose_nothing() {
  let (s, _tmp) = store();

  let research: Vec<_> = (0..25)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.create_research_result(json!({ "n": i })).await })
    })
    .collect();
  let social: Vec<_> = (0..25)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.create_social_content(NewSocialContent::new("a1", format!("post {i}")))
          .await
      })
    })
    .collect();

  let mut research_ids = HashSet::new();
  for h in research {
    research_ids.insert(h.await.unwrap().unwrap().id);
  }
  let mut social_ids = HashSet::new();
  for h in social {
    social_ids.insert(h.await.unwrap().unwrap().id);
  }

  assert_eq!(research_ids.len(), 25);
  assert_eq!(social_ids.len(), 25);
  assert_eq!(
    s.list_research_results(ListQuery::default()).await.unwrap().total,
    25
  );
  assert_eq!(s.list_social_content("a1").await.unwrap().len(), 25);
}
