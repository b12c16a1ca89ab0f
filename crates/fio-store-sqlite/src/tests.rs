//! Integration tests for `SqliteStore` against an in-memory database.

use fio_core::{
  patch::PersonPatch,
  person::Person,
  store::{Page, PersonFilter, PersonStore, UpdateOutcome},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn person(name: &str, age: u32, gender: &str, nationality: &str) -> Person {
  Person {
    name:        name.into(),
    surname:     format!("{name}son"),
    patronymic:  None,
    age,
    gender:      gender.into(),
    nationality: nationality.into(),
  }
}

async fn label_count(s: &SqliteStore, table: &'static str) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    })
    .await
    .unwrap()
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;
  let mut input = person("Dmitriy", 42, "male", "UA");
  input.patronymic = Some("Vasilevich".into());

  let id = s.create_person(input.clone()).await.unwrap();
  let fetched = s.get_person(id).await.unwrap();
  assert_eq!(fetched, Some(input));
}

#[tokio::test]
async fn get_missing_person_returns_none() {
  let s = store().await;
  assert!(s.get_person(999).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_distinct() {
  let s = store().await;
  let a = s.create_person(person("A", 1, "male", "US")).await.unwrap();
  let b = s.create_person(person("B", 2, "male", "US")).await.unwrap();
  assert_ne!(a, b);
}

#[tokio::test]
async fn labels_are_shared_between_people() {
  let s = store().await;
  s.create_person(person("A", 30, "male", "US")).await.unwrap();
  s.create_person(person("B", 25, "male", "US")).await.unwrap();
  s.create_person(person("C", 25, "female", "US")).await.unwrap();

  assert_eq!(label_count(&s, "genders").await, 2);
  assert_eq!(label_count(&s, "nationalities").await, 1);
}

// ─── List ────────────────────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.create_person(person("A", 30, "M", "US")).await.unwrap();
  s.create_person(person("B", 25, "F", "FR")).await.unwrap();
  s
}

#[tokio::test]
async fn list_filters_by_gender() {
  let s = seeded().await;
  let mut filter = PersonFilter::all(Page { page: 0, limit: 10 });
  filter.gender = Some("F".into());

  let people = s.list_people(&filter).await.unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0].name, "B");
}

#[tokio::test]
async fn list_filters_are_conjunctive() {
  let s = seeded().await;
  let mut filter = PersonFilter::all(Page { page: 0, limit: 10 });
  filter.age = Some(30);
  filter.nationality = Some("FR".into());
  assert!(s.list_people(&filter).await.unwrap().is_empty());

  filter.nationality = Some("US".into());
  let people = s.list_people(&filter).await.unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0].name, "A");
}

#[tokio::test]
async fn list_without_filters_respects_limit() {
  let s = seeded().await;
  let people = s
    .list_people(&PersonFilter::all(Page { page: 0, limit: 1 }))
    .await
    .unwrap();
  assert_eq!(people.len(), 1);
}

#[tokio::test]
async fn list_pages_are_disjoint() {
  let s = seeded().await;
  let first = s
    .list_people(&PersonFilter::all(Page { page: 0, limit: 1 }))
    .await
    .unwrap();
  let second = s
    .list_people(&PersonFilter::all(Page { page: 1, limit: 1 }))
    .await
    .unwrap();
  let third = s
    .list_people(&PersonFilter::all(Page { page: 2, limit: 1 }))
    .await
    .unwrap();

  assert_eq!(first[0].name, "A");
  assert_eq!(second[0].name, "B");
  assert!(third.is_empty());
}

#[tokio::test]
async fn list_matches_patronymic_exactly() {
  let s = seeded().await;
  let mut with_patronymic = person("C", 40, "M", "US");
  with_patronymic.patronymic = Some("Ivanovich".into());
  s.create_person(with_patronymic).await.unwrap();

  let mut filter = PersonFilter::all(Page { page: 0, limit: 10 });
  filter.patronymic = Some("Ivan".into());
  assert!(s.list_people(&filter).await.unwrap().is_empty());

  filter.patronymic = Some("Ivanovich".into());
  assert_eq!(s.list_people(&filter).await.unwrap().len(), 1);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_age_only_leaves_other_fields() {
  let s = store().await;
  let original = person("Ivan", 30, "male", "RU");
  let id = s.create_person(original.clone()).await.unwrap();

  let outcome = s
    .update_person(id, PersonPatch { age: Some(31), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(outcome, Some(UpdateOutcome::Updated));

  let updated = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(updated, Person { age: 31, ..original });
}

#[tokio::test]
async fn update_with_identical_values_is_a_noop() {
  let s = store().await;
  let id = s.create_person(person("Ivan", 30, "male", "RU")).await.unwrap();

  let outcome = s
    .update_person(id, PersonPatch {
      name: Some("Ivan".into()),
      age: Some(30),
      gender: Some("male".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(outcome, Some(UpdateOutcome::Unchanged));
}

#[tokio::test]
async fn update_new_label_inserts_dimension_row() {
  let s = store().await;
  let id = s.create_person(person("Ivan", 30, "male", "RU")).await.unwrap();

  s.update_person(id, PersonPatch {
    gender: Some("female".into()),
    nationality: Some("KZ".into()),
    ..Default::default()
  })
  .await
  .unwrap();

  let updated = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(updated.gender, "female");
  assert_eq!(updated.nationality, "KZ");
  assert_eq!(label_count(&s, "genders").await, 2);
}

#[tokio::test]
async fn update_reuses_existing_label() {
  let s = store().await;
  let a = s.create_person(person("A", 30, "male", "RU")).await.unwrap();
  s.create_person(person("B", 30, "female", "RU")).await.unwrap();

  s.update_person(a, PersonPatch { gender: Some("female".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(label_count(&s, "genders").await, 2);
}

#[tokio::test]
async fn update_missing_person_returns_none() {
  let s = store().await;
  let outcome = s
    .update_person(42, PersonPatch { age: Some(1), ..Default::default() })
    .await
    .unwrap();
  assert!(outcome.is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_person_and_unused_labels() {
  let s = store().await;
  let id = s.create_person(person("A", 30, "male", "US")).await.unwrap();

  assert!(s.delete_person(id).await.unwrap());
  assert!(s.get_person(id).await.unwrap().is_none());
  assert_eq!(label_count(&s, "genders").await, 0);
  assert_eq!(label_count(&s, "nationalities").await, 0);
}

#[tokio::test]
async fn delete_missing_person_returns_false() {
  let s = store().await;
  assert!(!s.delete_person(7).await.unwrap());
}

#[tokio::test]
async fn delete_keeps_labels_shared_with_others() {
  let s = store().await;
  let a = s.create_person(person("A", 30, "male", "US")).await.unwrap();
  let b = s.create_person(person("B", 25, "male", "US")).await.unwrap();

  assert!(s.delete_person(a).await.unwrap());

  let other = s.get_person(b).await.unwrap();
  assert_eq!(other.map(|p| p.gender), Some("male".to_string()));
  assert_eq!(label_count(&s, "genders").await, 1);
  assert_eq!(label_count(&s, "nationalities").await, 1);
}
