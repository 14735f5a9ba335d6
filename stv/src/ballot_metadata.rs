// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Information about the contest, such as candidates.

use serde::{Serialize,Deserialize};
use std::fmt;

/// a candidate, referred to by position in the candidate list, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash,Serialize,Deserialize)]
pub struct CandidateIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// The number of candidates to be elected, aka the number of vacancies.
#[derive(Copy,Clone,Debug,Eq,PartialEq,Serialize,Deserialize)]
pub struct NumberOfCandidates(pub usize);

impl fmt::Display for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// information about a candidate in the contest.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct Candidate {
    /// The identifier on the ballot paper, unique within the contest.
    pub id : String,
}

/// Information about the election
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct ElectionMetadata {
    /// the overall name of the contest, e.g. a ward name.
    pub name : String,
    pub candidates : Vec<Candidate>,
}

impl ElectionMetadata {
    pub fn candidate(&self,index:CandidateIndex) -> &Candidate { &self.candidates[index.0] }
    pub fn num_candidates(&self) -> usize { self.candidates.len() }
    /// Look up a candidate by identifier.
    pub fn candidate_index(&self,id:&str) -> Option<CandidateIndex> {
        self.candidates.iter().position(|c|c.id==id).map(CandidateIndex)
    }
}
