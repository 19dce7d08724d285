//! Property-based tests for the directory.
//!
//! Random sequences of creates, updates and deletes are applied to a fresh
//! directory, then checked against the guarantees callers rely on:
//! - Ids are unique, increasing and never reused
//! - Listings are always in canonical order
//! - Search finds exactly the contacts whose fields contain the query,
//!   including any piece of a stored name
//! - Updates only touch the fields they carry
//! - A snapshot reloads into the same directory

use agenda::directory::{Directory, DEFAULT_SEARCH_FIELDS};
use agenda::model::{Contact, ContactFields, ContactId, Field};
use agenda::normalize::normalize;
use agenda::store::Snapshot;
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Pérez", "perez", "PÉREZ", "Gómez", "Núñez", "Ana", "ÁNGEL", "angel", "Zoë", "María José",
            "",
        ])
        .prop_map(String::from),
        "[a-zA-Zéñü ]{0,8}",
    ]
}

fn fields_strategy() -> impl Strategy<Value = ContactFields> {
    (
        prop::option::of(name_strategy()),
        prop::option::of(name_strategy()),
        prop::option::of("[0-9]{0,3}"),
        prop::option::of("[0-9 +-]{0,10}"),
        prop::option::of("[a-z]{1,6}@[a-z]{1,6}\\.com"),
    )
        .prop_map(|(given, family, age, phone, email)| ContactFields {
            given_name: given,
            family_name: family,
            age,
            phone,
            email,
        })
}

#[derive(Debug, Clone)]
enum Op {
    Create(ContactFields),
    Update(u64, ContactFields),
    Delete(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => fields_strategy().prop_map(Op::Create),
        1 => (1u64..12, fields_strategy()).prop_map(|(id, f)| Op::Update(id, f)),
        1 => (1u64..12).prop_map(Op::Delete),
    ]
}

fn id(raw: u64) -> ContactId {
    ContactId::new(raw).unwrap()
}

/// Applies `ops` and returns the directory plus every id ever assigned.
fn build(ops: &[Op]) -> (Directory, Vec<ContactId>) {
    let mut directory = Directory::new();
    let mut assigned = Vec::new();
    for op in ops {
        match op {
            Op::Create(fields) => assigned.push(directory.create(fields).unwrap().id()),
            Op::Update(raw, patch) => {
                directory.update(id(*raw), patch);
            }
            Op::Delete(raw) => {
                directory.delete(id(*raw));
            }
        }
    }
    (directory, assigned)
}

fn sort_key(contact: &Contact) -> (String, String, ContactId) {
    (
        normalize(&contact.family_name),
        normalize(&contact.given_name),
        contact.id(),
    )
}

// =============================================================================
// IDENTITY
// =============================================================================

mod identity_properties {
    use super::*;

    proptest! {
        /// Every create gets a fresh id, larger than all before it
        #[test]
        fn ids_strictly_increase(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let (directory, assigned) = build(&ops);

            for pair in assigned.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            if let Some(last) = assigned.last() {
                prop_assert!(directory.next_id() > Some(*last));
            }
        }

        /// Deleting the newest contact does not free its id
        #[test]
        fn deleted_ids_are_not_reused(fields in prop::collection::vec(fields_strategy(), 1..10)) {
            let mut directory = Directory::new();
            let mut seen = HashSet::new();
            for f in &fields {
                let created = directory.create(f).unwrap();
                prop_assert!(seen.insert(created.id()));
                directory.delete(created.id());
            }
            prop_assert!(directory.is_empty());
            prop_assert_eq!(directory.next_id(), ContactId::new(fields.len() as u64 + 1));
        }

        /// Live ids are unique and match their records
        #[test]
        fn listed_ids_are_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let (directory, _) = build(&ops);
            let listed = directory.list();
            let ids: HashSet<ContactId> = listed.iter().map(|c| c.id()).collect();

            prop_assert_eq!(ids.len(), listed.len());
            prop_assert_eq!(listed.len(), directory.len());
            for contact in listed {
                prop_assert_eq!(directory.get(contact.id()), Some(contact));
            }
        }
    }
}

// =============================================================================
// ORDER AND READS
// =============================================================================

mod order_properties {
    use super::*;

    proptest! {
        /// list() is sorted by (family, given, id) after normalization
        #[test]
        fn list_is_canonically_sorted(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let (directory, _) = build(&ops);
            let keys: Vec<_> = directory.list().into_iter().map(sort_key).collect();

            for pair in keys.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        /// Reading twice gives the same answer
        #[test]
        fn reads_are_repeatable(
            ops in prop::collection::vec(op_strategy(), 0..30),
            query in name_strategy(),
        ) {
            let (directory, _) = build(&ops);
            prop_assert_eq!(directory.list(), directory.list());
            prop_assert_eq!(directory.search(&query), directory.search(&query));
        }
    }
}

// =============================================================================
// SEARCH
// =============================================================================

mod search_properties {
    use super::*;

    proptest! {
        /// Search returns exactly the matching contacts, in list order
        #[test]
        fn search_is_sound_and_complete(
            ops in prop::collection::vec(op_strategy(), 0..40),
            query in name_strategy(),
        ) {
            let (directory, _) = build(&ops);
            let needle = normalize(&query);

            let expected: Vec<&Contact> = directory
                .list()
                .into_iter()
                .filter(|c| {
                    needle.is_empty()
                        || DEFAULT_SEARCH_FIELDS
                            .iter()
                            .any(|f| normalize(c.field(*f)).contains(&needle))
                })
                .collect();

            prop_assert_eq!(directory.search(&query), expected);
        }

        /// Any non-blank piece of a stored family name finds that contact
        #[test]
        fn search_finds_contact_by_name_substring(
            ops in prop::collection::vec(op_strategy(), 0..20),
            family in "[a-zA-Zéñü]{1,4}( [a-zA-Zéñü]{1,4})?",
            start in any::<prop::sample::Index>(),
            len in any::<prop::sample::Index>(),
        ) {
            let (mut directory, _) = build(&ops);
            let target = directory
                .create(&ContactFields::new().family(family.as_str()))
                .unwrap()
                .id();

            let chars: Vec<char> = normalize(&family).chars().collect();
            let from = start.index(chars.len());
            let to = from + 1 + len.index(chars.len() - from);
            let piece: String = chars[from..to].iter().collect();
            prop_assume!(!piece.trim().is_empty());

            let found = directory.search(&piece);
            prop_assert!(found.iter().any(|c| c.id() == target));
        }

        /// Case and accents never change the result
        #[test]
        fn search_ignores_case_and_accents(ops in prop::collection::vec(op_strategy(), 0..30)) {
            let (directory, _) = build(&ops);
            prop_assert_eq!(directory.search("PÉREZ"), directory.search("perez"));
            prop_assert_eq!(directory.search("Ángel"), directory.search("angel"));
        }

        /// A blank query is the full listing
        #[test]
        fn blank_query_lists_everything(
            ops in prop::collection::vec(op_strategy(), 0..30),
            blank in "[ \t]{0,4}",
        ) {
            let (directory, _) = build(&ops);
            prop_assert_eq!(directory.search(&blank), directory.list());
        }
    }
}

// =============================================================================
// MUTATION
// =============================================================================

mod mutation_properties {
    use super::*;

    proptest! {
        /// Fields missing from the patch keep their old value
        #[test]
        fn update_touches_only_provided_fields(
            original in fields_strategy(),
            patch in fields_strategy(),
        ) {
            let mut directory = Directory::new();
            let before = directory.create(&original).unwrap();
            prop_assert!(directory.update(before.id(), &patch));
            let after = directory.get(before.id()).unwrap();

            for field in Field::ALL {
                match patch.provided(field) {
                    Some(value) => prop_assert_eq!(after.field(field), value),
                    None => prop_assert_eq!(after.field(field), before.field(field)),
                }
            }
        }

        /// Operations on unknown ids leave the directory untouched
        #[test]
        fn unknown_ids_change_nothing(
            ops in prop::collection::vec(op_strategy(), 0..30),
            patch in fields_strategy(),
        ) {
            let (mut directory, _) = build(&ops);
            let unknown = directory.next_id().unwrap();
            let before = directory.snapshot();

            prop_assert!(!directory.update(unknown, &patch));
            prop_assert!(directory.delete(unknown).is_none());
            prop_assert_eq!(directory.snapshot(), before);
        }
    }
}

// =============================================================================
// PERSISTENCE
// =============================================================================

mod snapshot_properties {
    use super::*;

    proptest! {
        /// Snapshot -> JSON -> directory keeps contacts, order and counter
        #[test]
        fn snapshot_reload_preserves_state(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let (directory, _) = build(&ops);
            let json = directory.snapshot().to_json().unwrap();
            let reloaded = Directory::from_snapshot(Snapshot::from_json(&json).unwrap());

            prop_assert_eq!(reloaded.list(), directory.list());
            prop_assert_eq!(reloaded.next_id(), directory.next_id());
        }
    }
}
