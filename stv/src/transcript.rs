// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Store the history of the tabulation, round by round.

use serde::{Serialize,Deserialize};
use crate::ballot_metadata::{CandidateIndex, ElectionMetadata, NumberOfCandidates};
use crate::ballot_pile::BallotPaperCount;
use crate::transfer_value::{StringSerializedRational, TransferValue};

#[derive(Clone,Serialize,Deserialize)]
pub struct QuotaInfo {
    /// the total number of ballot papers the quota was computed from.
    pub papers : BallotPaperCount,
    pub vacancies : NumberOfCandidates,
    pub quota : StringSerializedRational,
}

/// The single action a round took.
#[derive(Clone,Serialize,Deserialize,PartialEq,Debug)]
pub enum RoundAction {
    /// round 0: every non-empty ballot placed on its first preference.
    FirstPreferences,
    /// a candidate reached the quota; their surplus was distributed.
    Elected(CandidateIndex),
    /// the lowest candidate was excluded; their ballots transferred at full value.
    Eliminated(CandidateIndex),
    /// terminal transition: no more hopeful candidates than open seats, so all
    /// remaining hopefuls were elected, highest tally first.
    ElectedAllRemaining(Vec<CandidateIndex>),
}

/// Status at the end of one round.
#[derive(Clone,Serialize,Deserialize)]
pub struct RoundRecord {
    pub action : RoundAction,
    /// present iff the action created a transfer value (a surplus distribution).
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub transfer_value : Option<TransferValue>,
    /// tallies for each candidate at the end of the round.
    pub tallies : Vec<StringSerializedRational>,
    /// the number of pieces of paper in each candidate's pool.
    pub papers : Vec<BallotPaperCount>,
    /// total weight carried by ballots that have exhausted so far.
    pub exhausted : StringSerializedRational,
    pub exhausted_papers : BallotPaperCount,
}

#[derive(Clone,Serialize,Deserialize)]
pub struct Transcript {
    pub quota : QuotaInfo,
    pub rounds : Vec<RoundRecord>,
    /// candidates in order of election.
    pub elected : Vec<CandidateIndex>,
}

#[derive(Clone,Serialize,Deserialize)]
pub struct TranscriptWithMetadata {
    pub metadata : ElectionMetadata,
    pub transcript : Transcript,
}
