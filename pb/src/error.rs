// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Errors that can come out of the library.

use thiserror::Error;
use crate::arithmetic::Numeric;
use crate::ballot::BallotKind;
use crate::satisfaction::MeasureKind;

pub type Result<T> = std::result::Result<T,PbError>;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum PbError {
    #[error("No project named {0} in the instance")]
    ProjectNotFound(String),
    #[error("Project {0} is listed more than once")]
    DuplicateProject(String),
    #[error("Profile holds {expected} ballots, but was given a {found} ballot")]
    BallotKindMismatch{expected:BallotKind,found:BallotKind},
    #[error("Satisfaction measure {measure} does not apply to {found} ballots")]
    SatisfactionKindMismatch{measure:MeasureKind,found:BallotKind},
    #[error("Illegal ballot : {0}")]
    Domain(#[from] BallotViolation),
    #[error("Project {0} is already in the ballot")]
    DuplicateInBallot(String),
    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange{index:usize,len:usize},
    #[error("Cannot take anything from an empty {0}")]
    Empty(&'static str),
    #[error("Project {0} has a negative cost")]
    NegativeCost(String),
    #[error("Budget limit {0} is negative")]
    NegativeBudget(Numeric),
    #[error("The tie between {0:?} is not allowed to be broken")]
    UnresolvedTie(Vec<String>),
    #[error("Could not interpret {0} as a number")]
    InvalidNumber(String),
    #[error("Invalid parameter : {0}")]
    InvalidParameter(String),
}

/// The particular way a ballot fails the legality bounds of a profile.
#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum BallotViolation {
    #[error("ballot mentions {length} projects, fewer than the minimum {min}")]
    TooShort{length:usize,min:usize},
    #[error("ballot mentions {length} projects, more than the maximum {max}")]
    TooLong{length:usize,max:usize},
    #[error("approved projects cost {cost}, less than the minimum {min}")]
    CostTooLow{cost:Numeric,min:Numeric},
    #[error("approved projects cost {cost}, more than the maximum {max}")]
    CostTooHigh{cost:Numeric,max:Numeric},
    #[error("score {score} for {project} is below the minimum {min}")]
    ScoreTooLow{project:String,score:Numeric,min:Numeric},
    #[error("score {score} for {project} is above the maximum {max}")]
    ScoreTooHigh{project:String,score:Numeric,max:Numeric},
    #[error("scores total {total}, less than the minimum {min}")]
    TotalScoreTooLow{total:Numeric,min:Numeric},
    #[error("scores total {total}, more than the available {max}")]
    TotalScoreTooHigh{total:Numeric,max:Numeric},
    #[error("project {0} is not in the instance")]
    UnknownProject(String),
    #[error("project {0} is ranked more than once")]
    RankedTwice(String),
}
