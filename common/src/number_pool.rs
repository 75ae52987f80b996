use borsh::{BorshDeserialize, BorshSerialize};

use crate::types::{is_valid_ball, BallNumber, MAX_BALL};

/// Bits 1..=90 set, bit 0 unused.
const FULL_MASK: u128 = ((1u128 << (MAX_BALL as u32 + 1)) - 1) & !1;

/// The balls still inside the cage, one bit per number.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberPool {
    mask: u128,
}

impl Default for NumberPool {
    fn default() -> Self {
        Self::full()
    }
}

impl NumberPool {
    pub fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    pub fn empty() -> Self {
        Self { mask: 0 }
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn is_full(&self) -> bool {
        self.mask == FULL_MASK
    }

    pub fn contains(&self, number: BallNumber) -> bool {
        is_valid_ball(number) && self.mask & (1u128 << number) != 0
    }

    /// Returns false if the number was not in the pool.
    pub fn remove(&mut self, number: BallNumber) -> bool {
        if !self.contains(number) {
            return false;
        }
        self.mask &= !(1u128 << number);
        true
    }

    /// Returns false if the number is out of range or already present.
    pub fn insert(&mut self, number: BallNumber) -> bool {
        if !is_valid_ball(number) || self.contains(number) {
            return false;
        }
        self.mask |= 1u128 << number;
        true
    }

    pub fn refill(&mut self) {
        self.mask = FULL_MASK;
    }

    /// Ascending order.
    pub fn iter(&self) -> Iter {
        Iter { mask: self.mask }
    }

    pub fn to_vec(&self) -> Vec<BallNumber> {
        self.iter().collect()
    }
}

pub struct Iter {
    mask: u128,
}

impl Iterator for Iter {
    type Item = BallNumber;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == 0 {
            return None;
        }
        let number = self.mask.trailing_zeros() as BallNumber;
        self.mask &= self.mask - 1;

        Some(number)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mask.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter {}

impl<'a> IntoIterator for &'a NumberPool {
    type Item = BallNumber;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
