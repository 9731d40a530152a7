use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use treap_bimap::{Bimap, Error};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_matches_model(map: &Bimap<u32, u32>, by_left: &BTreeMap<u32, u32>, by_right: &BTreeMap<u32, u32>) {
    assert_eq!(map.len(), by_left.len());
    assert_eq!(map.len(), by_right.len());

    let actual: Vec<(u32, u32)> = map.iter_left().map(|(l, r)| (*l, *r)).collect();
    let expected: Vec<(u32, u32)> = by_left.iter().map(|(l, r)| (*l, *r)).collect();
    assert_eq!(actual, expected);

    let actual: Vec<(u32, u32)> = map.iter_right().map(|(l, r)| (*r, *l)).collect();
    let expected: Vec<(u32, u32)> = by_right.iter().map(|(r, l)| (*r, *l)).collect();
    assert_eq!(actual, expected);

    let mut count = 0;
    let mut cursor = map.begin_left();
    while cursor != map.end_left() {
        count += 1;
        cursor.move_next();
    }
    assert_eq!(count, map.len());
}

#[test]
fn int_test_bimap() {
    init_logger();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut map = Bimap::with_seed(2);
    let mut by_left = BTreeMap::new();
    let mut by_right = BTreeMap::new();

    for _ in 0..20_000 {
        let left: u32 = rng.gen_range(0..2_000);
        let right: u32 = rng.gen_range(0..2_000);
        match rng.gen_range(0..4) {
            0 | 1 => {
                let position = map.insert(left, right);
                if by_left.contains_key(&left) || by_right.contains_key(&right) {
                    assert!(position.is_end());
                } else {
                    assert_eq!(map.cursor_left_at(position).get(), Some(&left));
                    by_left.insert(left, right);
                    by_right.insert(right, left);
                }
            }
            2 => {
                let expected = by_left.remove(&left);
                if let Some(old_right) = expected {
                    by_right.remove(&old_right);
                }
                assert_eq!(map.remove_left(&left), expected.map(|r| (left, r)));
            }
            _ => {
                let expected = by_right.remove(&right);
                if let Some(old_left) = expected {
                    by_left.remove(&old_left);
                }
                assert_eq!(map.erase_right(&right), expected.is_some());
            }
        }
    }

    assert_matches_model(&map, &by_left, &by_right);

    for (left, right) in &by_left {
        assert!(map.find_left(left).flip() == map.find_right(right));
        assert!(map.find_right(right).flip() == map.find_left(left));
        assert_eq!(map.at_left(left), Ok(right));
        assert_eq!(map.at_right(right), Ok(left));
    }

    for key in 0..2_000 {
        let expected = by_left.range(key..).next().map(|(l, _)| l);
        assert_eq!(map.lower_bound_left(&key).get(), expected);
        let expected = by_right.range(key + 1..).next().map(|(r, _)| r);
        assert_eq!(map.upper_bound_right(&key).get(), expected);
        if !by_left.contains_key(&key) {
            assert_eq!(map.at_left(&key), Err(Error::NotFound));
        }
    }
}

#[test]
fn int_test_cursor_round_trip() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut map = Bimap::new();
    for i in 0..200u32 {
        map.insert(i, rng.gen::<u64>());
    }

    for start in (0..200).step_by(17) {
        for steps in &[0usize, 1, 5, 40] {
            let origin = map.find_left(&start);
            let mut cursor = origin;
            for _ in 0..*steps {
                cursor.move_next();
            }
            for _ in 0..*steps {
                cursor.move_prev();
            }
            assert!(cursor == origin);
        }
    }
}

#[test]
fn int_test_erase_while_iterating() {
    let mut map: Bimap<u32, u32> = (0..100).map(|i| (i, 1_000 - i)).collect();
    let mut position = map.begin_right().position();
    let kept = map.find_left(&50).position();
    while !position.is_end() {
        let left = *map.cursor_right_at(position).flip().get().unwrap();
        if left % 2 == 1 {
            position = map.erase_right_at(position);
        } else {
            let mut cursor = map.cursor_right_at(position);
            cursor.move_next();
            position = cursor.position();
        }
    }
    assert_eq!(map.len(), 50);
    assert_eq!(map.cursor_left_at(kept).get(), Some(&50));
    assert!(map.iter_left().all(|(left, _)| left % 2 == 0));
}

#[test]
fn int_test_copy_independence() {
    let mut original = Bimap::new();
    for i in 0..50 {
        original.insert(i, i.to_string());
    }
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.insert(100, String::from("x"));
    copy.erase_left(&0);
    assert_eq!(original.len(), 50);
    assert_eq!(original.at_left(&0), Ok(&String::from("0")));
    assert!(original.find_right(&String::from("x")).is_end());
    assert_ne!(copy, original);
}

#[test]
fn int_test_default_fallback() {
    init_logger();
    let mut map = Bimap::new();
    map.insert(5, 0);
    assert_eq!(*map.at_left_or_default(7), 0);
    assert_eq!(map.len(), 1);
    assert!(map.find_left(&5).is_end());
    assert_eq!(map.find_left(&7).flip().get(), Some(&0));

    map.insert(1, 1);
    assert_eq!(*map.at_left_or_default(1), 1);
    assert_eq!(map.len(), 2);
}
