//! Red-black index invariants and search.

use rstest::rstest;

use socgraph::domain::{Color, DomainError, OrderedUserIndex, User, UserDirectory, UserId};

/// Distinct ids in scrambled order (7919 is coprime with 1009).
fn scrambled(n: i64) -> Vec<UserId> {
    (0..n).map(|i| (i * 7919) % 1009).collect()
}

fn insert_checked(ids: &[UserId]) -> OrderedUserIndex {
    let mut index = OrderedUserIndex::new();
    for &id in ids {
        index.insert(User::new(id, format!("user-{id}")));
        if let Err(violation) = index.validate() {
            panic!("after inserting {id}: {violation}");
        }
        assert_eq!(index.root_color(), Some(Color::Black));
    }
    index
}

#[rstest]
#[case::ascending((1..=64).collect())]
#[case::descending((1..=64).rev().collect())]
#[case::zigzag(vec![50, 10, 90, 20, 80, 30, 70, 40, 60, 55, 45, 65, 35])]
#[case::scrambled(scrambled(500))]
#[case::single(vec![7])]
fn given_insert_sequence_when_building_then_invariants_hold_after_every_insert(
    #[case] ids: Vec<UserId>,
) {
    // Act
    let index = insert_checked(&ids);

    // Assert: every id found, in-order walk strictly increasing
    for &id in &ids {
        assert_eq!(index.search(id).unwrap().id, id);
    }
    let walked: Vec<_> = index.iter().map(|u| u.id).collect();
    assert!(walked.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(walked.len(), ids.len());

    // Assert: height within the red-black bound 2*log2(n+1)
    let bound = 2.0 * ((ids.len() + 1) as f64).log2();
    assert!(index.height() as f64 <= bound, "height {} > {}", index.height(), bound);
}

#[test]
fn given_index_when_searching_missing_ids_then_not_found() {
    let index = insert_checked(&[10, 20, 30, 40, 50]);
    for id in [0, 15, 35, 55, -1] {
        assert_eq!(index.search(id), Err(DomainError::NotFound(id)));
    }
}

#[test]
fn given_directory_when_indexed_then_names_preserved() {
    // Arrange
    let mut directory = UserDirectory::new();
    directory.add_user(3, "Cem").unwrap();
    directory.add_user(1, "Ana").unwrap();
    directory.add_user(2, "Bora").unwrap();

    // Act
    let index = OrderedUserIndex::from_directory(&directory);

    // Assert
    assert_eq!(index.len(), 3);
    assert_eq!(index.search(1).unwrap().name, "Ana");
    assert_eq!(
        index.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Ana", "Bora", "Cem"]
    );
    assert!(index.validate().is_ok());
}
