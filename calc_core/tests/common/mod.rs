#![allow(dead_code)]

use calc_core::calculations::crt::Congruence;
use calc_core::CalcResult;
use calc_core::{solve, CrtSolution};
use num_bigint::BigInt;

pub fn system(pairs: &[(i64, i64)]) -> Vec<Congruence> {
    pairs.iter().map(|&(r, m)| Congruence::new(r, m)).collect()
}

pub fn solve_pairs(pairs: &[(i64, i64)]) -> CalcResult<CrtSolution> {
    solve(&system(pairs))
}

pub fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.abs()
}

/// Every permutation of `items`, Heap's algorithm.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        heap(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            heap(k - 1, items, out);
        }
    }

    let mut items = items.to_vec();
    let mut out = Vec::new();
    let k = items.len();
    heap(k, &mut items, &mut out);
    out
}

pub fn big(n: i64) -> BigInt {
    BigInt::from(n)
}
