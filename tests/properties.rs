use canondiff::json::{canonicalize, diff_json, to_string_pretty, Value};
use canondiff::text::diff_chars;
use canondiff::{diff_hunks, ChangeTag, Hunk};
use proptest::prelude::*;

fn lcs_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            table[i][j] = if old[i] == new[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }
    table[0][0]
}

fn rebuild<T: Clone>(hunks: &[Hunk<Vec<T>>], skip: ChangeTag) -> Vec<T> {
    hunks
        .iter()
        .filter(|h| h.tag() != skip)
        .flat_map(|h| h.value().iter().cloned())
        .collect()
}

fn object_from(entries: &[(String, i64)], reversed: bool) -> Value {
    let mut items: Vec<(String, Value)> = entries
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(*v)))
        .collect();
    if reversed {
        items.reverse();
    }
    let nested = Value::object(items.clone());
    items.push(("~nested".to_string(), nested));
    Value::object(items)
}

proptest! {
    #[test]
    fn test_hunks_reconstruct_both_sides(
        old in prop::collection::vec(0u8..4, 0..40),
        new in prop::collection::vec(0u8..4, 0..40),
    ) {
        let hunks: Vec<Hunk<Vec<u8>>> = diff_hunks(&old, &new);
        prop_assert_eq!(rebuild(&hunks, ChangeTag::Insert), old);
        prop_assert_eq!(rebuild(&hunks, ChangeTag::Delete), new);
    }

    #[test]
    fn test_hunks_are_minimal(
        old in prop::collection::vec(0u8..4, 0..40),
        new in prop::collection::vec(0u8..4, 0..40),
    ) {
        let hunks: Vec<Hunk<Vec<u8>>> = diff_hunks(&old, &new);
        let edits: usize = hunks.iter().filter(|h| !h.is_equal()).map(|h| h.count()).sum();
        prop_assert_eq!(edits, old.len() + new.len() - 2 * lcs_len(&old, &new));
    }

    #[test]
    fn test_hunks_are_merged_and_ordered(
        old in prop::collection::vec(0u8..3, 0..30),
        new in prop::collection::vec(0u8..3, 0..30),
    ) {
        let hunks: Vec<Hunk<Vec<u8>>> = diff_hunks(&old, &new);
        for hunk in &hunks {
            prop_assert!(hunk.count() > 0);
            prop_assert_eq!(hunk.count(), hunk.value().len());
        }
        for pair in hunks.windows(2) {
            prop_assert_ne!(pair[0].tag(), pair[1].tag());
            prop_assert!(!(pair[0].added() && pair[1].removed()));
        }
    }

    #[test]
    fn test_char_diff_reconstructs_text(old in "[ab ]{0,20}", new in "[ab ]{0,20}") {
        let hunks = diff_chars(&old, &new);
        let old_side: String = hunks.iter().filter(|h| !h.added()).map(|h| h.value().as_str()).collect();
        let new_side: String = hunks.iter().filter(|h| !h.removed()).map(|h| h.value().as_str()).collect();
        prop_assert_eq!(old_side, old);
        prop_assert_eq!(new_side, new);
    }

    #[test]
    fn test_canonicalize_is_idempotent(
        entries in prop::collection::btree_map("[a-z]{1,3}", any::<i64>(), 0..8),
    ) {
        let entries: Vec<(String, i64)> = entries.into_iter().collect();
        let value = object_from(&entries, true);
        let once = canonicalize(&value);
        let twice = canonicalize(&once);
        prop_assert_eq!(to_string_pretty(&once).unwrap(), to_string_pretty(&twice).unwrap());
    }

    #[test]
    fn test_key_order_does_not_matter(
        entries in prop::collection::btree_map("[a-z]{1,3}", any::<i64>(), 0..8),
    ) {
        let entries: Vec<(String, i64)> = entries.into_iter().collect();
        let forward = object_from(&entries, false);
        let backward = object_from(&entries, true);
        let hunks = diff_json(&forward, &backward).unwrap();
        prop_assert_eq!(hunks.len(), 1);
        prop_assert!(hunks[0].is_equal());
    }
}
