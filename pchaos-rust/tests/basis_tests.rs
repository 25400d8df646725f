mod common;

use common::SimpleRng;
use pchaos_rust::{BasisIndexSet, BasisType};
use std::collections::HashSet;

fn check_tensor_set(pmax: &[usize]) {
    let set = BasisIndexSet::tensor(pmax).unwrap();
    let expected: usize = pmax.iter().map(|&p| p + 1).product();
    assert_eq!(set.num_terms(), expected, "pmax = {:?}", pmax);
    assert_eq!(set.num_vars(), pmax.len());

    let tuples: Vec<Vec<usize>> = set.iter().collect();
    assert_eq!(tuples[0], vec![0; pmax.len()]);

    let unique: HashSet<&Vec<usize>> = tuples.iter().collect();
    assert_eq!(unique.len(), tuples.len(), "duplicate tuples for {:?}", pmax);

    for t in &tuples {
        assert!(t.iter().zip(pmax).all(|(d, p)| d <= p));
    }
    for k in 1..set.num_terms() {
        assert!(set.total_degree(k - 1) <= set.total_degree(k));
    }
}

#[test]
fn test_tensor_sets_random_degrees() {
    let mut rng = SimpleRng::new(42);
    for nvars in 1..=5 {
        for _ in 0..10 {
            let pmax: Vec<usize> = (0..nvars).map(|_| rng.next_in(0, 4)).collect();
            check_tensor_set(&pmax);
        }
    }
}

#[test]
fn test_tensor_sets_fixed_degrees() {
    check_tensor_set(&[3]);
    check_tensor_set(&[3, 3]);
    check_tensor_set(&[3, 3, 4]);
    check_tensor_set(&[3, 3, 4, 4]);
    check_tensor_set(&[3, 3, 4, 4, 2]);
}

#[test]
fn test_complete_set_is_subset_of_tensor() {
    let pmax = [3, 2, 4];
    let tensor: HashSet<Vec<usize>> = BasisIndexSet::tensor(&pmax).unwrap().iter().collect();
    let complete = BasisIndexSet::build(BasisType::Complete, &pmax).unwrap();
    assert!(complete.num_terms() < tensor.len());
    for t in complete.iter() {
        assert!(tensor.contains(&t));
        assert!(t.iter().sum::<usize>() <= 4);
    }
}
