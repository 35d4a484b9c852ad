// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Deciding between projects that a rule finds exactly equal.

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use crate::error::{PbError, Result};
use crate::instance::Project;
use crate::profile::ProfileView;

/// A caller supplied comparison. `Less` means the first project is preferred.
#[derive(Clone)]
pub struct CustomComparison(pub Arc<dyn Fn(&Project,&Project) -> Ordering + Send + Sync>);

impl Debug for CustomComparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f,"CustomComparison") }
}

/// How to order tied projects. Whatever the rule, anything it leaves equal is ordered by name,
/// so the outcome never depends on the order candidates were presented in.
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum TieBreakingRule {
    /// Alphabetically first name preferred.
    #[default]
    Lexicographic,
    /// More supporters preferred. Needs a profile.
    ApprovalScore,
    /// Cheaper preferred.
    MinCost,
    /// More expensive preferred.
    MaxCost,
    /// Earlier in the list preferred; projects not listed come after all listed ones.
    /// This is how a decision made by an election official would be recorded.
    Priority(Vec<String>),
    /// Any genuine tie is an error.
    Refuse,
    #[serde(skip)]
    Custom(CustomComparison),
}

impl TieBreakingRule {
    pub fn custom(comparison:impl Fn(&Project,&Project) -> Ordering + Send + Sync + 'static) -> Self {
        TieBreakingRule::Custom(CustomComparison(Arc::new(comparison)))
    }

    /// Sort the projects, most preferred first.
    pub fn order<'p>(&self,profile:Option<&dyn ProfileView>,projects:&[&'p Project]) -> Result<Vec<&'p Project>> {
        let mut res = projects.to_vec();
        match self {
            TieBreakingRule::Lexicographic => res.sort(),
            TieBreakingRule::ApprovalScore => {
                let profile = profile.ok_or_else(||PbError::InvalidParameter("approval score tie breaking needs a profile".to_string()))?;
                res.sort_by_cached_key(|p|(std::cmp::Reverse(profile.approval_score(p.name())),p.name().to_string()));
            }
            TieBreakingRule::MinCost => res.sort_by(|a,b|a.cost().cmp(b.cost()).then_with(||a.cmp(b))),
            TieBreakingRule::MaxCost => res.sort_by(|a,b|b.cost().cmp(a.cost()).then_with(||a.cmp(b))),
            TieBreakingRule::Priority(list) => {
                let rank = |p:&Project| list.iter().position(|n|n==p.name()).unwrap_or(list.len());
                res.sort_by(|a,b|rank(*a).cmp(&rank(*b)).then_with(||a.cmp(b)));
            }
            TieBreakingRule::Refuse => {
                res.sort();
                if res.len()>1 { return Err(PbError::UnresolvedTie(res.iter().map(|p|p.name().to_string()).collect())); }
            }
            TieBreakingRule::Custom(CustomComparison(f)) => res.sort_by(|a,b|f(*a,*b).then_with(||a.cmp(b))),
        }
        Ok(res)
    }

    /// The single most preferred project.
    /// ```
    /// use pb::tie_breaking::TieBreakingRule;
    /// use pb::instance::Project;
    /// use pb::arithmetic::int;
    /// let (a,b) = (Project::new("a",int(5)),Project::new("b",int(3)));
    /// assert_eq!("a",TieBreakingRule::Lexicographic.untie(None,&[&b,&a]).unwrap().name());
    /// assert_eq!("b",TieBreakingRule::MinCost.untie(None,&[&a,&b]).unwrap().name());
    /// assert!(TieBreakingRule::Refuse.untie(None,&[&a,&b]).is_err());
    /// ```
    pub fn untie<'p>(&self,profile:Option<&dyn ProfileView>,projects:&[&'p Project]) -> Result<&'p Project> {
        if projects.is_empty() { return Err(PbError::Empty("set of tied projects")); }
        let ordered = self.order(profile,projects)?;
        ordered.first().copied().ok_or(PbError::Empty("set of tied projects"))
    }
}

impl Display for TieBreakingRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreakingRule::Lexicographic => write!(f,"lexicographic"),
            TieBreakingRule::ApprovalScore => write!(f,"approval_score"),
            TieBreakingRule::MinCost => write!(f,"min_cost"),
            TieBreakingRule::MaxCost => write!(f,"max_cost"),
            TieBreakingRule::Priority(list) => write!(f,"priority:{}",list.join(",")),
            TieBreakingRule::Refuse => write!(f,"refuse"),
            TieBreakingRule::Custom(_) => write!(f,"custom"),
        }
    }
}

impl FromStr for TieBreakingRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(list) = s.strip_prefix("priority:") {
            return Ok(TieBreakingRule::Priority(list.split(',').map(|n|n.trim()).filter(|n|!n.is_empty()).map(|n|n.to_string()).collect()));
        }
        match s {
            "lexicographic" => Ok(TieBreakingRule::Lexicographic),
            "approval_score" => Ok(TieBreakingRule::ApprovalScore),
            "min_cost" => Ok(TieBreakingRule::MinCost),
            "max_cost" => Ok(TieBreakingRule::MaxCost),
            "refuse" => Ok(TieBreakingRule::Refuse),
            _ => Err(anyhow!("Not a valid tie breaking rule : {}",s)),
        }
    }
}
