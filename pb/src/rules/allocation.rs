// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! The result of running a rule.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use serde::{Deserialize, Serialize};
use crate::arithmetic::{optional_rational_string, Numeric};
use crate::instance::{total_cost, Project};

/// The funded projects, in the order the rule chose them, plus optional information about how.
/// Two allocations are equal if they fund the same projects, whatever the order or details.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
pub struct BudgetAllocation {
    pub projects : Vec<Project>,
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub details : Option<AllocationDetails>,
}

impl BudgetAllocation {
    pub fn new(projects:Vec<Project>) -> Self { BudgetAllocation{ projects, details: None } }
    pub fn empty() -> Self { Self::default() }
    pub fn names(&self) -> BTreeSet<String> { self.projects.iter().map(|p|p.name().to_string()).collect() }
    pub fn contains(&self,project:&str) -> bool { self.projects.iter().any(|p|p.name()==project) }
    pub fn total_cost(&self) -> Numeric { total_cost(&self.projects) }
    /// The same projects, without any details.
    pub fn without_details(&self) -> Self { BudgetAllocation::new(self.projects.clone()) }
}

impl Deref for BudgetAllocation {
    type Target = [Project];
    fn deref(&self) -> &[Project] { &self.projects }
}

impl PartialEq for BudgetAllocation {
    fn eq(&self, other: &Self) -> bool { self.names()==other.names() }
}
impl Eq for BudgetAllocation {}

impl From<Vec<Project>> for BudgetAllocation {
    fn from(projects: Vec<Project>) -> Self { BudgetAllocation::new(projects) }
}

impl Display for BudgetAllocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{{{}}}",self.projects.iter().map(|p|p.name()).collect::<Vec<_>>().join(","))
    }
}

/// Rule specific information about a run.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub enum AllocationDetails {
    GreedyWelfare(GreedyWelfareDetails),
}

/// What happened to each project in a greedy run.
#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct GreedyWelfareDetails {
    pub projects : Vec<GreedyProjectDetails>,
}

impl GreedyWelfareDetails {
    pub fn get(&self,project:&str) -> Option<&GreedyProjectDetails> { self.projects.iter().find(|p|p.project==project) }
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct GreedyProjectDetails {
    pub project : String,
    /// The score it was last given when compared with other candidates.
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub score : Option<Numeric>,
    /// true if never selected by the rule.
    pub discarded : bool,
    /// Budget left just after it was selected.
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub remaining_budget : Option<Numeric>,
}

impl GreedyProjectDetails {
    pub fn new(project:impl Into<String>) -> Self { GreedyProjectDetails{ project: project.into(), score: None, discarded: true, remaining_budget: None } }
}
