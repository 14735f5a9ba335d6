// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The Scottish STV count with the Droop quota.
//!
//! One action per round: either the first hopeful candidate at or above the
//! quota is elected and their surplus distributed, or the lowest hopeful
//! candidate is excluded and their ballots transferred at full value. The
//! round loop stops once the vacancies are filled, or via the terminal
//! transition when the hopeful candidates cannot outnumber the open seats.

use std::collections::HashSet;
use num::{BigInt, BigRational, One, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use crate::ballot_pile::{BallotIndex, BallotPaperCount, TabulationBallot};
use crate::election_data::ElectionData;
use crate::transcript::{QuotaInfo, RoundAction, RoundRecord, Transcript};
use crate::transfer_value::{StringSerializedRational, TransferValue};

#[derive(Error,Debug)]
pub enum TabulationError {
    #[error("at least one vacancy is required")]
    NoVacancies,
    #[error("{candidates} candidates cannot fill {vacancies} vacancies")]
    TooFewCandidates{ candidates:usize, vacancies:usize },
    #[error("duplicate candidate identifier {0}")]
    DuplicateCandidate(String),
    #[error("a ballot ranks candidate {0} but there are only {1} candidates")]
    InvalidCandidateIndex(CandidateIndex,usize),
    #[error("candidate {0} is not hopeful and cannot be declared a winner")]
    NotHopeful(CandidateIndex),
    #[error("no hopeful candidate available to eliminate")]
    NoOneToEliminate,
}

/// The state of a candidate during the count. Transitions are one way; a
/// candidate never leaves Elected or Eliminated.
#[derive(Copy,Clone,Debug,Eq,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateState {
    Hopeful,
    Elected,
    Eliminated,
}

impl std::fmt::Display for CandidateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateState::Hopeful => write!(f,"hopeful"),
            CandidateState::Elected => write!(f,"elected"),
            CandidateState::Eliminated => write!(f,"eliminated"),
        }
    }
}

/// A candidate's side of the count: their state and the pool of ballots they
/// currently hold. A ballot index appears in at most one pool at a time.
struct CandidateStanding {
    state : CandidateState,
    pile : Vec<BallotIndex>,
}

/// The per-candidate result view handed to reporting and tests.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct CandidateSnapshot {
    pub candidate : CandidateIndex,
    pub id : String,
    pub first_preference_votes : StringSerializedRational,
    pub state : CandidateState,
}

/// The main workhorse class that runs the count.
pub struct Tabulator<'a> {
    data : &'a ElectionData,
    vacancies : NumberOfCandidates,
    /// papers / vacancies + 1, exact. Fixed at construction; the classical
    /// Droop formula does not recompute it as ballots exhaust.
    quota : BigRational,
    /// denominator for every transfer value, also fixed at construction.
    total_papers : BallotPaperCount,
    ballots : Vec<TabulationBallot>,
    candidates : Vec<CandidateStanding>,
    hopeful : HashSet<CandidateIndex>,
    elected_candidates : Vec<CandidateIndex>,
    exhausted : BigRational,
    exhausted_papers : BallotPaperCount,
    first_preferences_distributed : bool,
    transcript : Transcript,
    verbose : bool,
}

impl <'a> Tabulator<'a> {
    pub fn new(data:&'a ElectionData,vacancies:NumberOfCandidates,verbose:bool) -> Result<Self,TabulationError> {
        if vacancies.0==0 { return Err(TabulationError::NoVacancies); }
        let num_candidates = data.metadata.num_candidates();
        if num_candidates<vacancies.0 {
            return Err(TabulationError::TooFewCandidates{ candidates: num_candidates, vacancies: vacancies.0 });
        }
        let mut seen_ids : HashSet<&str> = HashSet::default();
        for candidate in &data.metadata.candidates {
            if !seen_ids.insert(candidate.id.as_str()) {
                return Err(TabulationError::DuplicateCandidate(candidate.id.clone()));
            }
        }
        for ballot in &data.ballots {
            for &ranking in &ballot.rankings {
                if ranking.0>=num_candidates {
                    return Err(TabulationError::InvalidCandidateIndex(ranking,num_candidates));
                }
            }
        }
        let total_papers = BallotPaperCount(data.num_ballots());
        let quota = BigRational::new(BigInt::from(total_papers.0),BigInt::from(vacancies.0))+BigRational::one();
        if verbose { println!("Quota = {}",quota); }
        let ballots : Vec<TabulationBallot> = data.ballots.iter().map(TabulationBallot::new).collect();
        let mut candidates = vec![];
        let mut hopeful = HashSet::default();
        for i in 0..num_candidates {
            candidates.push(CandidateStanding{ state: CandidateState::Hopeful, pile: vec![] });
            hopeful.insert(CandidateIndex(i));
        }
        Ok(Tabulator{
            data,
            vacancies,
            quota : quota.clone(),
            total_papers,
            ballots,
            candidates,
            hopeful,
            elected_candidates : vec![],
            exhausted : BigRational::zero(),
            exhausted_papers : BallotPaperCount(0),
            first_preferences_distributed : false,
            transcript : Transcript{
                quota : QuotaInfo{ papers: total_papers, vacancies, quota: StringSerializedRational(quota) },
                rounds : vec![],
                elected : vec![],
            },
            verbose,
        })
    }

    pub fn quota(&self) -> &BigRational { &self.quota }
    pub fn elected(&self) -> &[CandidateIndex] { &self.elected_candidates }
    pub fn transcript(&self) -> &Transcript { &self.transcript }
    pub fn into_transcript(self) -> Transcript { self.transcript }

    /// Derived on demand from the candidate's current pool, never cached.
    pub fn first_preference_votes(&self,candidate:CandidateIndex) -> BigRational {
        let mut res = BigRational::zero();
        for &b in &self.candidates[candidate.0].pile {
            res+=self.ballots[b.0].value.clone();
        }
        res
    }

    pub fn num_papers(&self,candidate:CandidateIndex) -> BallotPaperCount {
        BallotPaperCount(self.candidates[candidate.0].pile.len())
    }

    pub fn candidate_state(&self,candidate:CandidateIndex) -> CandidateState {
        self.candidates[candidate.0].state
    }

    pub fn remaining_to_elect(&self) -> usize { self.vacancies.0-self.elected_candidates.len() }

    /// Assign every ballot naming at least one candidate to its first
    /// preference. Ballots with no rankings exhaust immediately; their weight
    /// is accounted as exhausted so the total weight is conserved.
    ///
    /// Doing this twice would double every pool, so a second call is a no-op.
    pub fn distribute_first_preferences(&mut self) {
        if self.first_preferences_distributed { return; }
        self.first_preferences_distributed=true;
        for (index,ballot) in self.ballots.iter().enumerate() {
            match ballot.current_candidate() {
                Some(first) => { self.candidates[first.0].pile.push(BallotIndex(index)); }
                None => {
                    self.exhausted+=ballot.value.clone();
                    self.exhausted_papers+=BallotPaperCount(1);
                }
            }
        }
        if self.verbose { self.print_candidate_names(); }
        self.end_of_round(RoundAction::FirstPreferences,None);
    }

    // declare that a candidate is no longer hopeful.
    fn no_longer_hopeful(&mut self,candidate:CandidateIndex,state:CandidateState) {
        self.candidates[candidate.0].state=state;
        self.hopeful.remove(&candidate);
    }

    /// Move every ballot out of the given candidate's pool: each advances to
    /// its next hopeful candidate (scaled by the transfer value if one is
    /// given, as in a surplus distribution) or exhausts at the weight it
    /// carried. The pool is empty afterwards.
    fn transfer_pile(&mut self,candidate:CandidateIndex,transfer_value:Option<&TransferValue>) {
        let pile = std::mem::take(&mut self.candidates[candidate.0].pile);
        for b in pile {
            let next = self.ballots[b.0].advance(&self.hopeful);
            match next {
                Some(next_candidate) => {
                    if let Some(tv) = transfer_value {
                        let ballot = &mut self.ballots[b.0];
                        ballot.value=tv.mul(&ballot.value);
                    }
                    self.candidates[next_candidate.0].pile.push(b);
                }
                None => {
                    self.exhausted+=self.ballots[b.0].value.clone();
                    self.exhausted_papers+=BallotPaperCount(1);
                }
            }
        }
    }

    /// Elect the given candidate and distribute their surplus. The transfer
    /// value is quota relative: (papers - quota) / papers over the original
    /// ballot total, in every round.
    pub fn declare_winner(&mut self,candidate:CandidateIndex) -> Result<(),TabulationError> {
        if self.candidates[candidate.0].state!=CandidateState::Hopeful {
            return Err(TabulationError::NotHopeful(candidate));
        }
        if self.verbose { println!("Elected {}",self.data.metadata.candidate(candidate).id); }
        let surplus = BigRational::new(BigInt::from(self.total_papers.0),BigInt::one())-self.quota.clone();
        let transfer_value = TransferValue::from_surplus(surplus,self.total_papers);
        self.no_longer_hopeful(candidate,CandidateState::Elected);
        self.elected_candidates.push(candidate);
        self.transcript.elected.push(candidate);
        self.transfer_pile(candidate,Some(&transfer_value));
        self.end_of_round(RoundAction::Elected(candidate),Some(transfer_value));
        Ok(())
    }

    /// Exclude the hopeful candidate with the fewest first preference votes,
    /// transferring their ballots at full value. Ties go to the candidate
    /// supplied earliest.
    pub fn eliminate_lowest(&mut self) -> Result<(),TabulationError> {
        let mut lowest : Option<(CandidateIndex,BigRational)> = None;
        for i in 0..self.candidates.len() {
            let candidate = CandidateIndex(i);
            if self.candidates[i].state==CandidateState::Hopeful {
                let votes = self.first_preference_votes(candidate);
                let is_lower = match &lowest { None => true, Some((_,best)) => votes<*best };
                if is_lower { lowest=Some((candidate,votes)); }
            }
        }
        let (candidate,_) = lowest.ok_or(TabulationError::NoOneToEliminate)?;
        if self.verbose { println!("Excluding {}",self.data.metadata.candidate(candidate).id); }
        self.no_longer_hopeful(candidate,CandidateState::Eliminated);
        self.transfer_pile(candidate,None);
        self.end_of_round(RoundAction::Eliminated(candidate),None);
        Ok(())
    }

    /// Complete one round: elect the first hopeful candidate at or above the
    /// quota (in the order candidates were supplied), or exclude the lowest.
    pub fn round(&mut self) -> Result<(),TabulationError> {
        let mut winner : Option<CandidateIndex> = None;
        for i in 0..self.candidates.len() {
            let candidate = CandidateIndex(i);
            if self.candidates[i].state==CandidateState::Hopeful && self.first_preference_votes(candidate)>=self.quota {
                winner=Some(candidate);
                break;
            }
        }
        match winner {
            Some(candidate) => self.declare_winner(candidate),
            None => self.eliminate_lowest(),
        }
    }

    /// Terminal transition: the hopeful candidates can no longer outnumber the
    /// open seats, so elect them all, highest tally first. Without this the
    /// round loop would spin forever on a count that cannot fill its seats by
    /// quota or elimination.
    fn elect_all_remaining(&mut self) {
        let mut remaining : Vec<CandidateIndex> = (0..self.candidates.len()).map(CandidateIndex)
            .filter(|c|self.candidates[c.0].state==CandidateState::Hopeful).collect();
        // stable sort; equal tallies stay in supply order.
        remaining.sort_by(|a,b|self.first_preference_votes(*b).cmp(&self.first_preference_votes(*a)));
        for &candidate in &remaining {
            if self.verbose { println!("Elected {}",self.data.metadata.candidate(candidate).id); }
            self.no_longer_hopeful(candidate,CandidateState::Elected);
            self.elected_candidates.push(candidate);
            self.transcript.elected.push(candidate);
        }
        self.end_of_round(RoundAction::ElectedAllRemaining(remaining),None);
    }

    /// Run the whole count.
    pub fn run(&mut self) -> Result<(),TabulationError> {
        self.distribute_first_preferences();
        while self.remaining_to_elect()>0 {
            if self.hopeful.len()<=self.remaining_to_elect() {
                self.elect_all_remaining();
                break;
            }
            self.round()?;
        }
        Ok(())
    }

    /// The current standing of every candidate, in the order supplied.
    pub fn snapshot(&self) -> Vec<CandidateSnapshot> {
        (0..self.candidates.len()).map(|i|{
            let candidate = CandidateIndex(i);
            CandidateSnapshot{
                candidate,
                id: self.data.metadata.candidate(candidate).id.clone(),
                first_preference_votes: StringSerializedRational(self.first_preference_votes(candidate)),
                state: self.candidates[i].state,
            }
        }).collect()
    }

    fn end_of_round(&mut self,action:RoundAction,transfer_value:Option<TransferValue>) {
        if self.verbose { self.print_tallys(); }
        let tallies = (0..self.candidates.len()).map(|i|StringSerializedRational(self.first_preference_votes(CandidateIndex(i)))).collect();
        let papers = (0..self.candidates.len()).map(|i|self.num_papers(CandidateIndex(i))).collect();
        self.transcript.rounds.push(RoundRecord{
            action,
            transfer_value,
            tallies,
            papers,
            exhausted: StringSerializedRational(self.exhausted.clone()),
            exhausted_papers: self.exhausted_papers,
        });
    }

    pub fn print_candidate_names(&self) {
        println!("{}",self.data.metadata.candidates.iter().map(|c|c.id.clone()).collect::<Vec<String>>().join("\t")+"\tExhausted");
    }
    pub fn print_tallys(&self) {
        println!("{}",(0..self.candidates.len()).map(|i|self.first_preference_votes(CandidateIndex(i)).to_string()).collect::<Vec<String>>().join("\t")+"\t"+&self.exhausted.to_string());
    }
}
