// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Some utility routines that make parsing vote files easier.

use std::fs::File;
use std::path::Path;
use anyhow::anyhow;
use crate::ballot_metadata::{Candidate, CandidateIndex, ElectionMetadata};
use crate::ballot_paper::Ballot;
use crate::election_data::ElectionData;

/// Read an election from a CSV file.
///
/// The header row lists the candidate identifiers. Each subsequent row is one
/// ballot, ranked identifiers left to right; cells after the last ranking may
/// be blank, and a fully blank row is a ballot with no rankings. A ranking
/// naming an unknown candidate is an error. Duplicate rankings within a
/// ballot are kept; the count handles them, ingestion does not.
pub fn read_election_csv(path:&Path) -> anyhow::Result<ElectionData> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).has_headers(false).from_path(path)?;
    let mut records = reader.records();
    let header = records.next().ok_or_else(||anyhow!("{} is empty; expected a header row of candidate identifiers",path.display()))??;
    let candidates : Vec<Candidate> = header.iter().map(|id|Candidate{id:id.trim().to_string()}).filter(|c|!c.id.is_empty()).collect();
    if candidates.is_empty() { return Err(anyhow!("{} has no candidate identifiers in its header row",path.display())); }
    let metadata = ElectionMetadata{
        name: path.file_stem().map(|s|s.to_string_lossy().to_string()).unwrap_or_default(),
        candidates,
    };
    let mut ballots = vec![];
    for record in records {
        let record = record?;
        let mut rankings : Vec<CandidateIndex> = vec![];
        for cell in record.iter() {
            let id = cell.trim();
            if id.is_empty() { break; } // blanks end the ranking.
            let index = metadata.candidate_index(id).ok_or_else(||anyhow!("ballot {} ranks unknown candidate {:?}",ballots.len()+1,id))?;
            rankings.push(index);
        }
        ballots.push(Ballot::new(rankings));
    }
    Ok(ElectionData{ metadata, ballots })
}

/// Read an election from a .stv JSON file.
pub fn read_election_stv(path:&Path) -> anyhow::Result<ElectionData> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Read an election from a file, dispatching on extension: .csv for the CSV
/// ballot format, anything else for .stv JSON.
pub fn read_election_file(path:&Path) -> anyhow::Result<ElectionData> {
    match path.extension().and_then(|e|e.to_str()) {
        Some("csv") => read_election_csv(path),
        _ => read_election_stv(path),
    }
}
