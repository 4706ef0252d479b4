use super::*;

#[test]
fn put_get_list_remove_round_trip() {
    let store: InMemoryRunStore<i32> = InMemoryRunStore::new();
    let id = Uuid::new_v4();
    store.put(id, 42);
    assert_eq!(store.get(&id), Some(42));
    assert_eq!(store.list(), vec![id]);
    assert_eq!(store.remove(&id), Some(42));
    assert_eq!(store.get(&id), None);
}
