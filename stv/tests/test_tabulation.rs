// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Whole of count tests: run complete elections and check the outcome and
//! the properties the count is supposed to preserve.

use num::{BigRational, Zero};
use stv::ballot_metadata::{Candidate, CandidateIndex, ElectionMetadata, NumberOfCandidates};
use stv::ballot_paper::Ballot;
use stv::election_data::ElectionData;
use stv::tabulation::{CandidateState, Tabulator};
use stv::transcript::RoundAction;
use stv::transfer_value::convert_usize_to_rational;

fn election(name:&str,candidates:&[&str],ballots:&[&[usize]]) -> ElectionData {
    ElectionData{
        metadata: ElectionMetadata{
            name: name.to_string(),
            candidates: candidates.iter().map(|&id|Candidate{id:id.to_string()}).collect(),
        },
        ballots: ballots.iter().map(|prefs|Ballot::new(prefs.iter().map(|&i|CandidateIndex(i)).collect())).collect(),
    }
}

/// weight never appears from nowhere: everything in pools plus everything
/// exhausted is at most the number of papers cast.
fn check_conservation(tabulator:&Tabulator) {
    let mut total = BigRational::zero();
    for snapshot in tabulator.snapshot() {
        total+=snapshot.first_preference_votes.0.clone();
    }
    let last_round = tabulator.transcript().rounds.last().unwrap();
    total+=last_round.exhausted.0.clone();
    let papers = convert_usize_to_rational(tabulator.transcript().quota.papers.0);
    assert!(total<=papers,"{} live+exhausted weight exceeds {} papers",total,papers);
}

#[test]
fn test_full_count_with_surplus_distribution() {
    // 8 papers, 2 seats, quota 5. a is elected on first preferences with a
    // surplus of 3 spread over all 8 papers.
    let a_then_b : &[usize] = &[0,1];
    let mut ballots : Vec<&[usize]> = vec![a_then_b;5];
    ballots.push(&[1]);
    ballots.push(&[2]);
    ballots.push(&[3]);
    let data = election("surplus",&["a","b","c","d"],&ballots);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(2),false).unwrap();
    tabulator.run().unwrap();

    assert_eq!(tabulator.elected(),&[CandidateIndex(0),CandidateIndex(1)]);
    let transcript = tabulator.transcript();
    assert_eq!(RoundAction::FirstPreferences,transcript.rounds[0].action);
    assert_eq!(RoundAction::Elected(CandidateIndex(0)),transcript.rounds[1].action);
    assert_eq!("3/8",transcript.rounds[1].transfer_value.as_ref().unwrap().to_string());
    // b picked up 5 papers at 3/8 each on top of its own : 1 + 15/8.
    assert_eq!("23/8",transcript.rounds[1].tallies[1].to_string());
    // c then d are excluded, both their single ranking ballots exhaust.
    assert_eq!(RoundAction::Eliminated(CandidateIndex(2)),transcript.rounds[2].action);
    assert_eq!(RoundAction::Eliminated(CandidateIndex(3)),transcript.rounds[3].action);
    assert_eq!(RoundAction::ElectedAllRemaining(vec![CandidateIndex(1)]),transcript.rounds[4].action);
    assert_eq!(2,transcript.rounds.last().unwrap().exhausted_papers.0);
    check_conservation(&tabulator);
}

#[test]
fn test_full_count_with_elimination_tie() {
    // 5 ballots, 3 candidates, 2 seats, quota 7/2. Nobody reaches quota on
    // first preferences so the count opens with an elimination.
    let data = election("tie",&["c1","c2","c3"],&[
        &[1,0,2],
        &[1,1,2],
        &[2,2,0],
        &[1,2,0],
        &[0,1,2],
    ]);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(2),false).unwrap();
    tabulator.run().unwrap();
    // c1 and c3 tie on 1 first preference; c1 was supplied first so goes
    // first, then two hopefuls remain for two seats.
    assert_eq!(tabulator.elected(),&[CandidateIndex(1),CandidateIndex(2)]);
    assert_eq!(CandidateState::Eliminated,tabulator.snapshot()[0].state);
    check_conservation(&tabulator);
}

#[test]
fn test_terminal_transition_at_start() {
    // as many candidates as seats: everyone is elected before any round runs.
    let data = election("walkover",&["a","b"],&[&[0]]);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(2),false).unwrap();
    tabulator.run().unwrap();
    assert_eq!(tabulator.elected(),&[CandidateIndex(0),CandidateIndex(1)]);
    assert_eq!(2,tabulator.transcript().rounds.len());
    assert_eq!(RoundAction::ElectedAllRemaining(vec![CandidateIndex(0),CandidateIndex(1)]),tabulator.transcript().rounds[1].action);
}

#[test]
fn test_exactly_num_winners_elected_and_states_final() {
    let data = election("final",&["a","b","c","d","e"],&[
        &[0,1,2],
        &[0,2,1],
        &[1,0],
        &[2],
        &[3,4],
        &[4,3],
        &[0,3],
    ]);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(3),false).unwrap();
    tabulator.run().unwrap();
    assert_eq!(3,tabulator.elected().len());
    let snapshot = tabulator.snapshot();
    let elected = snapshot.iter().filter(|s|s.state==CandidateState::Elected).count();
    let eliminated = snapshot.iter().filter(|s|s.state==CandidateState::Eliminated).count();
    assert_eq!(3,elected);
    assert_eq!(2,eliminated);
    assert_eq!(0,snapshot.iter().filter(|s|s.state==CandidateState::Hopeful).count());
    check_conservation(&tabulator);
}

#[test]
fn test_states_monotonic_and_papers_partitioned_every_round() {
    // a is elected with a surplus, then d and c are excluded in turn. Watch
    // the count round by round rather than just at the end.
    let a_then_b : &[usize] = &[0,1];
    let mut ballots : Vec<&[usize]> = vec![a_then_b;4];
    ballots.push(&[0,2]);
    ballots.push(&[1]);
    ballots.push(&[2]);
    ballots.push(&[3]);
    let data = election("rounds",&["a","b","c","d"],&ballots);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(2),false).unwrap();
    tabulator.distribute_first_preferences();
    let mut previous : Vec<CandidateState> = tabulator.snapshot().iter().map(|s|s.state).collect();
    loop {
        let hopeful = previous.iter().filter(|&&s|s==CandidateState::Hopeful).count();
        if tabulator.remaining_to_elect()==0 || hopeful<=tabulator.remaining_to_elect() { break; }
        tabulator.round().unwrap();
        // elected and eliminated are final; only hopeful candidates may move.
        let current : Vec<CandidateState> = tabulator.snapshot().iter().map(|s|s.state).collect();
        for (before,after) in previous.iter().zip(&current) {
            if *before!=CandidateState::Hopeful { assert_eq!(before,after); }
        }
        previous=current;
    }
    assert!(tabulator.transcript().rounds.len()>=4); // surplus and eliminations actually happened
    // every paper is in exactly one pool or exhausted, after every round.
    let total = tabulator.transcript().quota.papers.0;
    for record in &tabulator.transcript().rounds {
        let in_pools : usize = record.papers.iter().map(|p|p.0).sum();
        assert_eq!(total,in_pools+record.exhausted_papers.0);
    }
}

#[test]
fn test_transcript_serializes() {
    let data = election("serialize",&["a","b","c"],&[&[0,1],&[0,1],&[0,2],&[1,0]]);
    let mut tabulator = Tabulator::new(&data,NumberOfCandidates(2),false).unwrap();
    tabulator.run().unwrap();
    let json = serde_json::to_string(tabulator.transcript()).unwrap();
    let back : stv::transcript::Transcript = serde_json::from_str(&json).unwrap();
    assert_eq!(tabulator.transcript().rounds.len(),back.rounds.len());
    assert_eq!(tabulator.transcript().elected,back.elected);
    assert_eq!(tabulator.transcript().quota.quota.to_string(),back.quota.quota.to_string());
}
