// Copyright 2024 Andrew Conway.
// This file is part of ScottishSTV.
// ScottishSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ScottishSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ScottishSTV.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use stv::ballot_metadata::NumberOfCandidates;
use stv::parse_util::read_election_file;
use stv::tabulation::Tabulator;
use stv::transcript::TranscriptWithMetadata;

/// Count a Scottish STV (Droop quota) election.
#[derive(Parser)]
#[command(version, author)]
struct Opts {
    /// The name of the .stv (JSON) or .csv file to get votes from
    votes : PathBuf,

    /// The number of people to elect
    vacancies : usize,

    /// An optional .transcript file to store the round by round history in.
    /// If not specified, defaults to votes.transcript where votes is from above.
    #[arg(short, long)]
    transcript : Option<PathBuf>,

    /// Print the quota and per round tallies while counting
    #[arg(short, long)]
    verbose : bool,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();

    let votes = read_election_file(&opt.votes)?;
    if opt.verbose { votes.print_summary(); }

    let mut tabulator = Tabulator::new(&votes,NumberOfCandidates(opt.vacancies),opt.verbose)?;
    tabulator.run()?;

    for snapshot in tabulator.snapshot() {
        println!("{}\t{}\t{}",snapshot.id,snapshot.first_preference_votes,snapshot.state);
    }
    println!("Elected, in order : {}",tabulator.elected().iter()
        .map(|&c|votes.metadata.candidate(c).id.clone()).collect::<Vec<String>>().join(", "));

    let transcript_file = match &opt.transcript {
        None => opt.votes.with_extension("transcript"),
        Some(tf) => tf.clone(),
    };

    if let Some(parent) = transcript_file.parent() { std::fs::create_dir_all(parent)? }
    let transcript = TranscriptWithMetadata{ metadata: votes.metadata.clone(), transcript: tabulator.into_transcript() };
    serde_json::to_writer(File::create(&transcript_file)?,&transcript)?;

    Ok(())
}
