// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


use serde::{Deserialize,Serialize};
use crate::ballot_metadata::ElectionMetadata;
use crate::ballot_paper::Ballot;

/// Formal votes for the election. This is the structure stored in a .stv file.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct ElectionData {
    pub metadata : ElectionMetadata,
    pub ballots : Vec<Ballot>,
}

impl ElectionData {
    /// Number of ballots cast, including ballots with no rankings at all.
    /// This is the number the quota is computed from.
    pub fn num_ballots(&self) -> usize {
        self.ballots.len()
    }
    /// Number of ballots that actually name at least one candidate.
    pub fn num_formal(&self) -> usize {
        self.ballots.iter().filter(|b|!b.is_empty()).count()
    }

    pub fn print_summary(&self) {
        println!("Summary for {}",self.metadata.name);
        println!("{} candidates, {} ballots ({} naming at least one candidate)",
                 self.metadata.num_candidates(),self.num_ballots(),self.num_formal());
    }
}
