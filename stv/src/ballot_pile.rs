// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Things to do with piles of ballots.

use std::collections::HashSet;
use std::fmt;
use std::fmt::{Debug, Display};
use std::ops::AddAssign;
use num::BigRational;
use num::One;
use serde::{Deserialize, Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::ballot_paper::Ballot;

/// A number representing a count of pieces of paper.
/// This is distinct from votes, which are fractional once transfers have happened.
#[derive(Copy,Clone,Eq, PartialEq,Serialize,Deserialize,Ord, PartialOrd)]
pub struct BallotPaperCount(pub usize);

impl AddAssign for BallotPaperCount {
    fn add_assign(&mut self, rhs: Self) { self.0+=rhs.0; }
}
// type alias really, don't want long display
impl Display for BallotPaperCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl Debug for BallotPaperCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
/// a ballot, referred to by position in the tabulation's ballot arena, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash,Serialize,Deserialize)]
pub struct BallotIndex(pub usize);
// type alias really, don't want long display
impl Display for BallotIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl Debug for BallotIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "b{}", self.0) }
}

/// A ballot as the tabulation sees it: the voter's preference list, a cursor
/// into it, and the fractional weight the ballot currently carries.
///
/// The cursor only moves forward; preferences behind it are gone for good.
/// The weight starts at 1 and is multiplied by a transfer value each time the
/// ballot leaves an elected candidate, so it only ever shrinks.
#[derive(Clone,Debug)]
pub struct TabulationBallot {
    prefs : Vec<CandidateIndex>,
    upto : usize,
    pub value : BigRational,
}

impl TabulationBallot {
    pub fn new(ballot:&Ballot) -> Self {
        TabulationBallot{
            prefs: ballot.rankings.clone(),
            upto: 0,
            value: BigRational::one(),
        }
    }

    /// true iff the ballot has run out of usable preferences.
    pub fn exhausted(&self) -> bool { self.upto>=self.prefs.len() }

    /// the preference the ballot currently stands at, if any.
    pub fn current_candidate(&self) -> Option<CandidateIndex> {
        self.prefs.get(self.upto).copied()
    }

    /// Abandon the current preference and move forward to the next preference
    /// naming a hopeful candidate, skipping preferences for candidates who are
    /// not. Returns that candidate, leaving the cursor on the corresponding
    /// preference, or None if the ballot exhausts first.
    ///
    /// Each call strictly advances the cursor, so a ballot ranking the same
    /// candidate repeatedly terminates like any other. Not idempotent: skipped
    /// preferences cannot be revisited.
    pub fn advance(&mut self,hopeful:&HashSet<CandidateIndex>) -> Option<CandidateIndex> {
        self.upto+=1;
        while self.upto<self.prefs.len() && !hopeful.contains(&self.prefs[self.upto]) {
            self.upto+=1;
        }
        self.current_candidate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(prefs:&[usize]) -> TabulationBallot {
        TabulationBallot::new(&Ballot::new(prefs.iter().map(|&i|CandidateIndex(i)).collect()))
    }

    fn hopefuls(indices:&[usize]) -> HashSet<CandidateIndex> {
        indices.iter().map(|&i|CandidateIndex(i)).collect()
    }

    #[test]
    fn test_advance_skips_non_hopeful() {
        let mut b = ballot(&[0,1,2,3]);
        let hopeful = hopefuls(&[0,2,3]); // candidate 1 eliminated
        assert_eq!(Some(CandidateIndex(2)),b.advance(&hopeful));
        assert_eq!(Some(CandidateIndex(2)),b.current_candidate());
        assert_eq!(Some(CandidateIndex(3)),b.advance(&hopeful));
        assert!(!b.exhausted());
        assert_eq!(None,b.advance(&hopeful));
        assert!(b.exhausted());
    }

    #[test]
    fn test_single_preference_ballot_exhausts() {
        let mut b = ballot(&[0]);
        assert_eq!(None,b.advance(&hopefuls(&[0,1])));
        assert!(b.exhausted());
    }

    #[test]
    fn test_duplicate_consecutive_preference() {
        // a voter error: same candidate ranked twice in a row. Once that
        // candidate stops being hopeful both entries get skipped.
        let mut b = ballot(&[0,0,1]);
        assert_eq!(Some(CandidateIndex(1)),b.advance(&hopefuls(&[1])));
        assert_eq!(None,b.advance(&hopefuls(&[1])));
    }

    #[test]
    fn test_weight_starts_at_one() {
        let b = ballot(&[0,1]);
        assert!(b.value.is_one());
    }
}
