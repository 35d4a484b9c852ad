// Copyright 2023-2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Pseudo-random helpers for synthetic elections. Everything takes an explicit generator,
//! so a seeded [ChaCha8Rng] gives reproducible data.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A reproducible generator.
pub fn seeded_rng(seed:u64) -> ChaCha8Rng { ChaCha8Rng::seed_from_u64(seed) }

/// Make a boolean array of length len such that num_true of them are true.
/// ```
/// use pb::random_util::{make_array_with_some_randomly_true,seeded_rng};
/// let mut rng = seeded_rng(1);
/// let a4_10 = make_array_with_some_randomly_true(10,4,&mut rng);
/// assert_eq!(10,a4_10.len());
/// assert_eq!(4,a4_10.iter().filter(|v|**v).count());
/// let a7_10 = make_array_with_some_randomly_true(10,7,&mut rng);
/// assert_eq!(7,a7_10.iter().filter(|v|**v).count());
/// ```
pub fn make_array_with_some_randomly_true<R:Rng>(len:usize,num_true:usize,rng:&mut R) -> Vec<bool> {
    let num_true = num_true.min(len);
    let inverse = num_true>len/2;
    let mut res = vec![inverse;len];
    let mut togo = if inverse {len-num_true} else {num_true};
    while togo>0 {
        let pos = rng.random_range(0..len);
        if res[pos]==inverse { res[pos]=!inverse; togo-=1; }
    }
    res
}

/// A subset of the items, of size uniform in 0..=items.len(), each subset of that size equally likely.
/// Order of the items is kept.
pub fn random_subset<'a,T,R:Rng>(items:&'a [T],rng:&mut R) -> Vec<&'a T> {
    let size = rng.random_range(0..=items.len());
    let chosen = make_array_with_some_randomly_true(items.len(),size,rng);
    items.iter().zip(chosen).filter(|(_,c)|*c).map(|(t,_)|t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        let mut rng = seeded_rng(7);
        assert!(make_array_with_some_randomly_true(5,0,&mut rng).iter().all(|v|!*v));
        assert!(make_array_with_some_randomly_true(5,5,&mut rng).iter().all(|v|*v));
        assert!(make_array_with_some_randomly_true(0,0,&mut rng).is_empty());
    }

    #[test]
    fn test_random_subset_reproducible() {
        let items = ["a","b","c","d","e","f"];
        let first = random_subset(&items,&mut seeded_rng(3));
        let second = random_subset(&items,&mut seeded_rng(3));
        assert_eq!(first,second);
        let mut rng = seeded_rng(4);
        for _ in 0..50 {
            let subset = random_subset(&items,&mut rng);
            assert!(subset.len()<=items.len());
            assert!(subset.windows(2).all(|w|w[0]<w[1]));
        }
    }
}
