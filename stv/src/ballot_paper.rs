// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Information about a raw vote. That is, something written on a ballot paper.

use crate::ballot_metadata::CandidateIndex;
use serde::{Deserialize,Serialize};

/// One voter's ranked preferences, most favoured candidate first.
///
/// Duplicate rankings are kept as cast. A voter who writes the same candidate
/// twice has made an error; the count deals with it, the data model does not
/// repair it. The ballot itself is never mutated by the count; the tabulation
/// works on its own copies.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq)]
#[serde(transparent)]
pub struct Ballot {
    /// Candidate indices, in preference order.
    pub rankings : Vec<CandidateIndex>,
}

impl Ballot {
    pub fn new(rankings:Vec<CandidateIndex>) -> Self { Ballot{rankings} }
    /// A ballot with no rankings at all contributes nothing to the count.
    pub fn is_empty(&self) -> bool { self.rankings.is_empty() }
}
