use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use helpdesk_lib::{
    HelpdeskError, JsonFileStore, NewTicket, Ticket, TicketDocument, TicketService, TicketStore,
    TicketUpdate,
};
use proptest::prelude::*;

fn fixed_doc() -> TicketDocument {
    TicketDocument {
        tickets: vec![
            Ticket {
                id: "k3v9x0a1b".to_string(),
                name: "Printer broken".to_string(),
                description: String::new(),
                status: false,
                created: 1_700_000_000_000,
            },
            Ticket {
                id: "z8y7w6v5u".to_string(),
                name: "Update OS".to_string(),
                description: "Laptop in room 4".to_string(),
                status: true,
                created: 1_699_913_600_000,
            },
        ],
    }
}

#[test]
fn persisted_format_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");
    JsonFileStore::new(&path).save(&fixed_doc()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(raw.trim_end(), @r#"
{
  "tickets": [
    {
      "id": "k3v9x0a1b",
      "name": "Printer broken",
      "description": "",
      "status": false,
      "created": 1700000000000
    },
    {
      "id": "z8y7w6v5u",
      "name": "Update OS",
      "description": "Laptop in room 4",
      "status": true,
      "created": 1699913600000
    }
  ]
}
"#);
}

#[test]
fn deleted_file_recovers_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");
    let service = TicketService::new(JsonFileStore::new(&path));

    service.create(NewTicket::named("Temporary")).unwrap();
    assert_eq!(service.list_summaries().unwrap().len(), 3);

    fs::remove_file(&path).unwrap();
    let summaries = service.list_summaries().unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(!summaries[0].status);
    assert!(summaries[1].status);

    let rewritten: TicketDocument =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rewritten.len(), 2);
}

#[test]
fn corrupted_file_recovers_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");
    fs::write(&path, r#"{"tickets": [{"id": 1}]}"#).unwrap();

    let doc = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.tickets[1].created, doc.tickets[0].created - 86_400_000);
}

#[test]
fn end_to_end_create_then_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let service = TicketService::new(JsonFileStore::new(dir.path().join("tickets.json")));

    let created = service.create(NewTicket::named("Printer broken")).unwrap();
    assert!(!created.id.is_empty());

    // A second service over the same file sees the persisted ticket.
    let reopened = TicketService::new(JsonFileStore::new(dir.path().join("tickets.json")));
    let fetched = reopened.get_by_id(&created.id).unwrap();
    assert_eq!(fetched, created);
    assert!(!fetched.status);
    assert_eq!(fetched.description, "");
}

#[test]
fn concurrent_creates_all_survive() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 10;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");
    let service = Arc::new(TicketService::new(JsonFileStore::new(&path)));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| {
                        service
                            .create(NewTicket::named(format!("worker {t} ticket {i}")))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut created = HashSet::new();
    for handle in handles {
        created.extend(handle.join().unwrap());
    }
    assert_eq!(created.len(), THREADS * PER_THREAD);

    let on_disk: TicketDocument =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    // Two seed tickets plus every create.
    assert_eq!(on_disk.len(), THREADS * PER_THREAD + 2);
    assert!(created.iter().all(|id| on_disk.contains(id)));
}

#[test]
fn failed_update_does_not_touch_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");
    let mut store = JsonFileStore::new(&path);
    store.save(&fixed_doc()).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let service = TicketService::new(store);
    let result = service.update(
        "nonexistent",
        TicketUpdate {
            name: Some("X".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(HelpdeskError::TicketNotFound { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn created_ids_are_pairwise_distinct(names in prop::collection::vec("[a-zA-Z ]{1,12}", 1..40)) {
        let service = TicketService::new(helpdesk_lib::MemoryStore::with_document(TicketDocument::default()));
        let mut ids = HashSet::new();
        for name in names {
            let ticket = service.create(NewTicket::named(name)).unwrap();
            prop_assert!(ids.insert(ticket.id));
        }
        let stored: HashSet<String> = service
            .list_summaries()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        prop_assert_eq!(stored, ids);
    }
}
