use super::LookupIndex;
use crate::Record;

fn names() -> LookupIndex<char, String> {
    [
        ('a', "Ahmed"),
        ('a', "Anatole"),
        ('a', "Anais"),
        ('b', "Beatrice"),
    ]
    .into_iter()
    .map(|(k, v)| Record::new(k, v.to_owned()))
    .collect()
}

fn values(index: &LookupIndex<char, String>, key: char) -> Vec<&str> {
    index.get(&key).iter().map(|r| r.value().as_str()).collect()
}

#[test]
fn grouped_and_sorted() {
    let index = names();

    assert_eq!(index.len(), 4);
    assert_eq!(index.group_count(), 2);
    assert_eq!(values(&index, 'a'), ["Ahmed", "Anais", "Anatole"]);
    assert_eq!(values(&index, 'b'), ["Beatrice"]);
    assert!(values(&index, 'c').is_empty());
}

#[test]
fn cascading_delete() {
    let mut index = names();

    assert!(index.delete_record(&Record::new('b', String::from("Beatrice"))));
    assert!(index.find(&'b').is_none());
    assert!(!index.contains_key(&'b'));
    assert_eq!(index.len(), 3);
    assert_eq!(index.group_count(), 1);

    assert!(!index.delete_record(&Record::new('b', String::from("Beatrice"))));
    assert!(!index.delete_record(&Record::new('a', String::from("Alice"))));
    assert_eq!(index.len(), 3);
}

#[test]
fn delete_keeps_non_empty_group() {
    let mut index = names();

    assert!(index.delete_record(&Record::new('a', String::from("Anais"))));
    assert_eq!(values(&index, 'a'), ["Ahmed", "Anatole"]);
    assert!(index.find(&'a').is_some());
}

#[test]
fn groups_sorted_by_key() {
    let mut index = LookupIndex::new();

    for key in [42, 7, 19, 7, -3, 42, 0] {
        index.insert(key, key * 10);
    }

    let keys = index.groups().map(|g| *g.key()).collect::<Vec<_>>();
    assert_eq!(keys, [-3, 0, 7, 19, 42]);
    assert_eq!(index.len(), 7);
    assert_eq!(index.get(&7).len(), 2);
}

#[test]
fn add_group_is_idempotent() {
    let mut index = LookupIndex::<i32, i32>::new();

    index.add_group(&5);
    index.add_group(&5);
    assert_eq!(index.group_count(), 1);
    assert_eq!(index.len(), 0);
    assert!(index.get(&5).is_empty());

    index.insert(5, 1);
    assert_eq!(index.group_count(), 1);
    assert_eq!(index.len(), 1);
}

#[test]
fn delete_group() {
    let mut index = names();

    assert!(index.delete_group(&'a'));
    assert_eq!(index.len(), 1);
    assert!(!index.delete_group(&'a'));
    assert!(index.get(&'a').is_empty());
}

#[test]
fn records_in_key_then_value_order() {
    let index = names();
    let records = index.records().cloned().collect::<Vec<_>>();

    let mut sorted = records.clone();
    sorted.sort();
    assert_eq!(records, sorted);
}

#[test]
fn size_is_sum_of_groups() {
    let mut index = LookupIndex::new();

    for n in 0..50 {
        index.insert(n % 7, n);
    }

    let sum = index.groups().map(|g| g.len()).sum::<usize>();
    assert_eq!(index.len(), 50);
    assert_eq!(sum, 50);

    for n in 0..50 {
        assert!(index.delete_record(&Record::new(n % 7, n)));
    }

    assert!(index.is_empty());
    assert_eq!(index.group_count(), 0);
}

#[test]
fn display() {
    let index = names();
    assert_eq!(
        index.to_string(),
        "Index {\n  a (3): [Ahmed, Anais, Anatole]\n  b (1): [Beatrice]\n}"
    );
    assert_eq!(LookupIndex::<char, String>::new().to_string(), "Index {\n}");
}

#[test]
fn load_str() {
    let mut index = LookupIndex::<i32, i32>::new();
    let report = index.load_str("200 ; 267\n200;12\nbroken\n");

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 1);

    let values = index.get(&200).iter().map(|r| *r.value()).collect::<Vec<_>>();
    assert_eq!(values, [12, 267]);
}
