//! tests/db_tests.rs

use card_vault::card::{CardNumber, NewCard};
use card_vault::core::{ExternalId, IdentifierGenerator, SearchHash};
use card_vault::crypto::CardCipher;
use card_vault::db::{CardStore, SqliteCardStore};
use card_vault::error::CoreError;
use tempfile::tempdir;

mod support;
use support::test_config;

struct Builder {
    cipher: CardCipher,
    ids: IdentifierGenerator,
}

impl Builder {
    fn new() -> Self {
        Builder {
            cipher: CardCipher::new(&test_config()),
            ids: IdentifierGenerator::new(),
        }
    }

    fn card(&self, number: &str) -> NewCard {
        NewCard::build(&CardNumber::parse(number).unwrap(), &self.cipher, &self.ids).unwrap()
    }
}

#[test]
fn save_assigns_ids_and_round_trips_through_lookups() {
    let builder = Builder::new();
    let mut store = SqliteCardStore::open_in_memory().unwrap();

    let first = store.save(&builder.card("4456897922969999")).unwrap();
    let second = store.save(&builder.card("1234567890123456")).unwrap();
    assert!(second.id > first.id);

    let by_hash = store
        .find_by_hash(&SearchHash::digest("4456897922969999"))
        .unwrap()
        .expect("stored by hash");
    assert_eq!(by_hash.id, first.id);
    assert_eq!(by_hash.external_id, first.external_id);
    assert_eq!(by_hash.ciphertext, first.ciphertext);

    let by_id = store
        .find_by_external_id(&second.external_id)
        .unwrap()
        .expect("stored by external id");
    assert_eq!(by_id.id, second.id);

    assert!(store
        .find_by_external_id(&ExternalId::new("01ARZ3NDEKTSV4RRFFQ69G5FAV"))
        .unwrap()
        .is_none());
}

#[test]
fn duplicate_hash_is_reported_as_duplicate_card() {
    let builder = Builder::new();
    let mut store = SqliteCardStore::open_in_memory().unwrap();

    store.save(&builder.card("4456897922969999")).unwrap();
    let err = store.save(&builder.card("4456897922969999")).unwrap_err();

    assert!(matches!(err, CoreError::DuplicateCard));
    assert!(err.is_conflict());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn save_batch_is_all_or_nothing() {
    let builder = Builder::new();
    let mut store = SqliteCardStore::open_in_memory().unwrap();
    store.save(&builder.card("4456897922969999")).unwrap();

    let batch = vec![
        builder.card("1234567890123456"),
        builder.card("4456897922969999"),
        builder.card("9876543210987654"),
    ];
    let err = store.save_batch(&batch).unwrap_err();

    assert!(matches!(err, CoreError::DuplicateCard));
    assert_eq!(store.count().unwrap(), 1);
    assert!(store
        .find_by_hash(&SearchHash::digest("1234567890123456"))
        .unwrap()
        .is_none());
}

#[test]
fn save_batch_commits_every_card() {
    let builder = Builder::new();
    let mut store = SqliteCardStore::open_in_memory().unwrap();

    let batch = vec![
        builder.card("1234567890123456"),
        builder.card("9876543210987654"),
    ];
    assert_eq!(store.save_batch(&batch).unwrap(), 2);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn page_is_ordered_by_id() {
    let builder = Builder::new();
    let mut store = SqliteCardStore::open_in_memory().unwrap();
    let numbers = [
        "1000000000000001",
        "1000000000000002",
        "1000000000000003",
        "1000000000000004",
        "1000000000000005",
    ];
    let saved: Vec<_> = numbers
        .iter()
        .map(|n| store.save(&builder.card(n)).unwrap())
        .collect();

    let page = store.page(1, 3).unwrap();
    let ids: Vec<i64> = page.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![saved[1].id, saved[2].id, saved[3].id]);

    assert!(store.page(10, 3).unwrap().is_empty());
}

#[test]
fn plaintext_never_reaches_the_database() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("cards.db");
    let builder = Builder::new();

    {
        let mut store = SqliteCardStore::open(&db_path).unwrap();
        store.save(&builder.card("4456897922969999")).unwrap();
    }

    let store = SqliteCardStore::open(&db_path).unwrap();
    let (stored, hash): (String, String) = store
        .connection()
        .query_row(
            "SELECT card_number, card_number_hash FROM cards",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();

    assert!(!stored.contains("4456897922969999"));
    assert_eq!(hash, SearchHash::digest("4456897922969999").as_str());

    let record = store
        .find_by_hash(&SearchHash::digest("4456897922969999"))
        .unwrap()
        .unwrap();
    let revealed = record.reveal(&builder.cipher).unwrap();
    assert_eq!(revealed.expose_secret(), "4456897922969999");
}
