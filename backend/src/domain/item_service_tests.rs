//! Tests for the item lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockItemRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn item_id(value: i64) -> ItemId {
    ItemId::new(value).expect("positive id")
}

fn stored_item(id: i64, owner: &UserId, data: &str, at: DateTime<Utc>) -> Item {
    Item::new(
        item_id(id),
        owner.clone(),
        ItemData::new(data).expect("non-empty"),
        at,
        at,
    )
}

fn make_service(repo: MockItemRepository, now: DateTime<Utc>) -> ItemService<MockItemRepository> {
    ItemService::new(Arc::new(repo), Arc::new(FixtureClock { utc_now: now }))
}

#[rstest]
#[tokio::test]
async fn list_returns_only_repository_rows_for_caller(owner: UserId, now: DateTime<Utc>) {
    let rows = vec![
        stored_item(1, &owner, "a", now),
        stored_item(2, &owner, "b", now),
    ];
    let expected = rows.clone();
    let expected_owner = owner.clone();
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_owner()
        .withf(move |id| id == &expected_owner)
        .times(1)
        .return_once(move |_| Ok(rows));

    let items = make_service(repo, now)
        .list_items(&owner)
        .await
        .expect("list succeeds");

    assert_eq!(items, expected);
}

#[rstest]
#[tokio::test]
async fn list_maps_connection_errors_to_service_unavailable(owner: UserId, now: DateTime<Utc>) {
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_owner()
        .return_once(|_| Err(ItemPersistenceError::connection("pool timed out")));

    let err = make_service(repo, now)
        .list_items(&owner)
        .await
        .expect_err("connection errors surface");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_stamps_both_timestamps_with_now(owner: UserId, now: DateTime<Utc>) {
    let expected_owner = owner.clone();
    let mut repo = MockItemRepository::new();
    repo.expect_insert()
        .withf(move |new_item| {
            new_item.owner_id == expected_owner
                && new_item.data.as_str() == "hello"
                && new_item.created_at == now
        })
        .times(1)
        .return_once(move |new_item| {
            Ok(Item::new(
                item_id(7),
                new_item.owner_id.clone(),
                new_item.data.clone(),
                new_item.created_at,
                new_item.created_at,
            ))
        });

    let item = make_service(repo, now)
        .create_item(&owner, "hello".to_owned())
        .await
        .expect("create succeeds");

    assert_eq!(item.id(), item_id(7));
    assert!(item.is_owned_by(&owner));
    assert_eq!(item.created_at(), now);
    assert_eq!(item.updated_at(), now);
}

#[rstest]
#[tokio::test]
async fn create_rejects_empty_data_without_writing(owner: UserId, now: DateTime<Utc>) {
    let mut repo = MockItemRepository::new();
    repo.expect_insert().never();

    let err = make_service(repo, now)
        .create_item(&owner, String::new())
        .await
        .expect_err("empty data is invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), NO_DATA_MESSAGE);
    assert!(is_empty_data_error(&err));
}

#[rstest]
#[tokio::test]
async fn query_errors_map_to_internal(owner: UserId, now: DateTime<Utc>) {
    let mut repo = MockItemRepository::new();
    repo.expect_insert()
        .return_once(|_| Err(ItemPersistenceError::query("constraint violated")));

    let err = make_service(repo, now)
        .create_item(&owner, "x".to_owned())
        .await
        .expect_err("query errors surface");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn update_replaces_data_and_keeps_created_at(owner: UserId, now: DateTime<Utc>) {
    let created = now - Duration::hours(2);
    let existing = stored_item(3, &owner, "old", created);
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .withf(move |item| item.data().as_str() == "new" && item.updated_at() == now)
        .times(1)
        .return_once(|_| Ok(true));

    let item = make_service(repo, now)
        .update_item(&owner, item_id(3), "new".to_owned())
        .await
        .expect("update succeeds");

    assert_eq!(item.data().as_str(), "new");
    assert_eq!(item.created_at(), created);
    assert_eq!(item.updated_at(), now);
}

#[rstest]
#[tokio::test]
async fn update_keeps_updated_at_when_clock_lags(owner: UserId, now: DateTime<Utc>) {
    let ahead = now + Duration::minutes(5);
    let existing = stored_item(3, &owner, "old", ahead);
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update().return_once(|_| Ok(true));

    let item = make_service(repo, now)
        .update_item(&owner, item_id(3), "new".to_owned())
        .await
        .expect("update succeeds");

    assert_eq!(item.updated_at(), ahead);
}

#[rstest]
#[tokio::test]
async fn update_validates_data_before_lookup(owner: UserId, now: DateTime<Utc>) {
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_update().never();

    let err = make_service(repo, now)
        .update_item(&owner, item_id(99), String::new())
        .await
        .expect_err("empty data is invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn missing_item_is_not_found_never_forbidden(owner: UserId, now: DateTime<Utc>) {
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id().times(2).returning(|_| Ok(None));
    repo.expect_update().never();
    repo.expect_delete().never();
    let service = make_service(repo, now);

    let update = service
        .update_item(&owner, item_id(5), "x".to_owned())
        .await
        .expect_err("missing item");
    let delete = service
        .delete_item(&owner, item_id(5))
        .await
        .expect_err("missing item");

    for err in [update, delete] {
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), NO_ITEM_MESSAGE);
    }
}

#[rstest]
#[tokio::test]
async fn non_owner_is_forbidden_and_nothing_is_written(owner: UserId, now: DateTime<Utc>) {
    let intruder = UserId::random();
    let existing = stored_item(4, &owner, "mine", now);
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_update().never();
    repo.expect_delete().never();
    let service = make_service(repo, now);

    let update = service
        .update_item(&intruder, item_id(4), "theirs".to_owned())
        .await
        .expect_err("non-owner update");
    let delete = service
        .delete_item(&intruder, item_id(4))
        .await
        .expect_err("non-owner delete");

    assert_eq!(update.code(), ErrorCode::Forbidden);
    assert_eq!(delete.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_reports_not_found_when_row_vanishes(owner: UserId, now: DateTime<Utc>) {
    let existing = stored_item(6, &owner, "old", now);
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update().return_once(|_| Ok(false));

    let err = make_service(repo, now)
        .update_item(&owner, item_id(6), "new".to_owned())
        .await
        .expect_err("row vanished");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_scopes_write_to_owner(owner: UserId, now: DateTime<Utc>) {
    let existing = stored_item(8, &owner, "bye", now);
    let expected_owner = owner.clone();
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_delete()
        .withf(move |id, user| id.get() == 8 && user == &expected_owner)
        .times(1)
        .return_once(|_, _| Ok(true));

    make_service(repo, now)
        .delete_item(&owner, item_id(8))
        .await
        .expect("delete succeeds");
}
