// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! What a voter said. Four kinds of ballot, each of which can be frozen into an
//! immutable, hashable form for use as a key in a [crate::profile::MultiProfile].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use anyhow::anyhow;
use num::Zero;
use serde::{Deserialize, Serialize};
use crate::arithmetic::{rational_map_string, rational_string, Numeric};
use crate::error::{PbError, Result};
use crate::instance::Instance;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum BallotKind {
    Approval,
    Cardinal,
    Cumulative,
    Ordinal,
}

impl Display for BallotKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BallotKind::Approval => "approval",
            BallotKind::Cardinal => "cardinal",
            BallotKind::Cumulative => "cumulative",
            BallotKind::Ordinal => "ordinal",
        };
        write!(f,"{}",name)
    }
}

impl FromStr for BallotKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approval" => Ok(BallotKind::Approval),
            "cardinal" => Ok(BallotKind::Cardinal),
            "cumulative" => Ok(BallotKind::Cumulative),
            "ordinal" => Ok(BallotKind::Ordinal),
            _ => Err(anyhow!("Not a valid ballot kind : {}",s)),
        }
    }
}

/// The preference content of a ballot, as opposed to who cast it.
/// Equality ignores the voter name and metadata; [BallotContent::hash_content] is consistent with it.
pub trait BallotContent : Clone+PartialEq {
    fn kind(&self) -> BallotKind;
    fn hash_content<H:Hasher>(&self,state:&mut H);
    /// Consume the ballot, producing a frozen (immutable, hashable) version.
    fn freeze(self) -> Frozen<Self> { Frozen(self) }
}

/// An immutable ballot. Read through [Deref]; get a mutable copy with [Frozen::thaw].
#[derive(Clone,Debug,Serialize,Deserialize)]
#[serde(transparent)]
pub struct Frozen<B>(B);

impl<B> Deref for Frozen<B> {
    type Target = B;
    fn deref(&self) -> &B { &self.0 }
}

impl<B:BallotContent> Frozen<B> {
    /// A new mutable ballot equal to this one.
    pub fn thaw(&self) -> B { self.0.clone() }
    pub fn into_inner(self) -> B { self.0 }
}

impl<B:BallotContent> PartialEq for Frozen<B> {
    fn eq(&self, other: &Self) -> bool { self.0==other.0 }
}
impl<B:BallotContent> Eq for Frozen<B> {}
impl<B:BallotContent> Hash for Frozen<B> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.hash_content(state) }
}

pub type FrozenBallot = Frozen<Ballot>;

/// A set of approved projects.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
pub struct ApprovalBallot {
    pub projects : BTreeSet<String>,
    /// voter name
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub name : Option<String>,
    #[serde(default,skip_serializing_if="BTreeMap::is_empty")]
    pub meta : BTreeMap<String,String>,
}

impl ApprovalBallot {
    pub fn new<I:IntoIterator<Item=S>,S:Into<String>>(projects:I) -> Self {
        ApprovalBallot{ projects: projects.into_iter().map(|p|p.into()).collect(), ..Default::default() }
    }
    pub fn with_name(mut self,name:impl Into<String>) -> Self { self.name=Some(name.into()); self }
    /// returns false if already approved.
    pub fn approve(&mut self,project:impl Into<String>) -> bool { self.projects.insert(project.into()) }
    pub fn disapprove(&mut self,project:&str) -> bool { self.projects.remove(project) }
    pub fn approves(&self,project:&str) -> bool { self.projects.contains(project) }
    pub fn len(&self) -> usize { self.projects.len() }
    pub fn is_empty(&self) -> bool { self.projects.is_empty() }
}

impl PartialEq for ApprovalBallot {
    fn eq(&self, other: &Self) -> bool { self.projects==other.projects }
}

impl BallotContent for ApprovalBallot {
    fn kind(&self) -> BallotKind { BallotKind::Approval }
    fn hash_content<H: Hasher>(&self, state: &mut H) { self.projects.hash(state) }
}

fn zero() -> Numeric { Numeric::zero() }

/// A score per project. Projects not mentioned get the default score.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct CardinalBallot {
    #[serde(with="rational_map_string")]
    pub scores : BTreeMap<String,Numeric>,
    #[serde(with="rational_string",default="zero")]
    pub default_score : Numeric,
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub name : Option<String>,
    #[serde(default,skip_serializing_if="BTreeMap::is_empty")]
    pub meta : BTreeMap<String,String>,
}

impl Default for CardinalBallot {
    fn default() -> Self { CardinalBallot{ scores: BTreeMap::new(), default_score: zero(), name: None, meta: BTreeMap::new() } }
}

impl CardinalBallot {
    pub fn new<I:IntoIterator<Item=(S,Numeric)>,S:Into<String>>(scores:I) -> Self {
        CardinalBallot{ scores: scores.into_iter().map(|(p,s)|(p.into(),s)).collect(), ..Default::default() }
    }
    pub fn with_default_score(mut self,default_score:Numeric) -> Self { self.default_score=default_score; self }
    pub fn with_name(mut self,name:impl Into<String>) -> Self { self.name=Some(name.into()); self }
    /// Set a score, returning the previous explicit score if any.
    pub fn set_score(&mut self,project:impl Into<String>,score:Numeric) -> Option<Numeric> { self.scores.insert(project.into(),score) }
    pub fn remove(&mut self,project:&str) -> Option<Numeric> { self.scores.remove(project) }
    /// The score given, or the default score if not mentioned.
    pub fn score(&self,project:&str) -> &Numeric { self.scores.get(project).unwrap_or(&self.default_score) }
    pub fn explicit_score(&self,project:&str) -> Option<&Numeric> { self.scores.get(project) }
    /// Give every project of the instance not yet mentioned the default score explicitly.
    pub fn complete(&mut self,instance:&Instance) {
        for name in instance.project_names() {
            if !self.scores.contains_key(name) { self.scores.insert(name.to_string(),self.default_score.clone()); }
        }
    }
    /// Sum of the explicit scores.
    pub fn total_score(&self) -> Numeric { self.scores.values().sum() }
    pub fn len(&self) -> usize { self.scores.len() }
    pub fn is_empty(&self) -> bool { self.scores.is_empty() }
}

impl PartialEq for CardinalBallot {
    fn eq(&self, other: &Self) -> bool { self.scores==other.scores && self.default_score==other.default_score }
}

impl BallotContent for CardinalBallot {
    fn kind(&self) -> BallotKind { BallotKind::Cardinal }
    fn hash_content<H: Hasher>(&self, state: &mut H) {
        self.scores.hash(state);
        self.default_score.hash(state);
    }
}

/// A cardinal ballot where the voter distributes a limited number of points.
/// The limit is a property of the profile, checked when the ballot is added to one.
#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct CumulativeBallot(pub CardinalBallot);

impl CumulativeBallot {
    pub fn new<I:IntoIterator<Item=(S,Numeric)>,S:Into<String>>(scores:I) -> Self { CumulativeBallot(CardinalBallot::new(scores)) }
}

impl Deref for CumulativeBallot {
    type Target = CardinalBallot;
    fn deref(&self) -> &CardinalBallot { &self.0 }
}
impl DerefMut for CumulativeBallot {
    fn deref_mut(&mut self) -> &mut CardinalBallot { &mut self.0 }
}

impl BallotContent for CumulativeBallot {
    fn kind(&self) -> BallotKind { BallotKind::Cumulative }
    fn hash_content<H: Hasher>(&self, state: &mut H) { self.0.hash_content(state) }
}

/// Projects in preference order, most preferred first. No project appears twice.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
#[serde(try_from="OrdinalBallotRecord")]
pub struct OrdinalBallot {
    ranking : Vec<String>,
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub name : Option<String>,
    #[serde(default,skip_serializing_if="BTreeMap::is_empty")]
    pub meta : BTreeMap<String,String>,
}

/// An [OrdinalBallot] as read in, which may repeat a project.
#[derive(Deserialize)]
struct OrdinalBallotRecord {
    ranking : Vec<String>,
    #[serde(default)]
    name : Option<String>,
    #[serde(default)]
    meta : BTreeMap<String,String>,
}

impl TryFrom<OrdinalBallotRecord> for OrdinalBallot {
    type Error = PbError;
    fn try_from(record: OrdinalBallotRecord) -> Result<Self> {
        let mut res = OrdinalBallot::from_ranking(record.ranking)?;
        res.name = record.name;
        res.meta = record.meta;
        Ok(res)
    }
}

impl OrdinalBallot {
    pub fn new() -> Self { Self::default() }
    /// Make from a list, failing if anything is repeated.
    /// ```
    /// use pb::ballot::OrdinalBallot;
    /// let ballot = OrdinalBallot::from_ranking(["x","y","z"]).unwrap();
    /// assert_eq!(Some(1),ballot.position("y"));
    /// assert!(OrdinalBallot::from_ranking(["x","y","x"]).is_err());
    /// ```
    pub fn from_ranking<I:IntoIterator<Item=S>,S:Into<String>>(ranking:I) -> Result<Self> {
        let mut res = Self::new();
        for p in ranking { res.push(p)?; }
        Ok(res)
    }
    pub fn with_name(mut self,name:impl Into<String>) -> Self { self.name=Some(name.into()); self }
    pub fn ranking(&self) -> &[String] { &self.ranking }
    pub fn len(&self) -> usize { self.ranking.len() }
    pub fn is_empty(&self) -> bool { self.ranking.is_empty() }
    pub fn contains(&self,project:&str) -> bool { self.ranking.iter().any(|p|p==project) }
    /// 0 based position, 0 being most preferred.
    pub fn position(&self,project:&str) -> Option<usize> { self.ranking.iter().position(|p|p==project) }
    /// Add at the least preferred end.
    pub fn push(&mut self,project:impl Into<String>) -> Result<()> {
        let project = project.into();
        if self.contains(&project) { return Err(PbError::DuplicateInBallot(project)); }
        self.ranking.push(project);
        Ok(())
    }
    /// Insert so the project ends up at `index`. `index` may equal the length.
    pub fn insert(&mut self,index:usize,project:impl Into<String>) -> Result<()> {
        let project = project.into();
        if index>self.ranking.len() { return Err(PbError::IndexOutOfRange{index,len:self.ranking.len()}); }
        if self.contains(&project) { return Err(PbError::DuplicateInBallot(project)); }
        self.ranking.insert(index,project);
        Ok(())
    }
    pub fn at(&self,index:usize) -> Result<&str> {
        self.ranking.get(index).map(|s|s.as_str()).ok_or(PbError::IndexOutOfRange{index,len:self.ranking.len()})
    }
    pub fn remove_at(&mut self,index:usize) -> Result<String> {
        if index>=self.ranking.len() { return Err(PbError::IndexOutOfRange{index,len:self.ranking.len()}); }
        Ok(self.ranking.remove(index))
    }
    /// Remove by name, returning where it was.
    pub fn remove(&mut self,project:&str) -> Result<usize> {
        let index = self.position(project).ok_or_else(||PbError::ProjectNotFound(project.to_string()))?;
        self.ranking.remove(index);
        Ok(index)
    }
    /// Remove the least preferred.
    pub fn pop(&mut self) -> Result<String> { self.ranking.pop().ok_or(PbError::Empty("ordinal ballot")) }
}

impl PartialEq for OrdinalBallot {
    fn eq(&self, other: &Self) -> bool { self.ranking==other.ranking }
}

impl BallotContent for OrdinalBallot {
    fn kind(&self) -> BallotKind { BallotKind::Ordinal }
    fn hash_content<H: Hasher>(&self, state: &mut H) { self.ranking.hash(state) }
}

/// Any ballot. Profiles hold these, all of one [BallotKind].
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(tag="kind",rename_all="lowercase")]
pub enum Ballot {
    Approval(ApprovalBallot),
    Cardinal(CardinalBallot),
    Cumulative(CumulativeBallot),
    Ordinal(OrdinalBallot),
}

impl From<ApprovalBallot> for Ballot { fn from(b: ApprovalBallot) -> Self { Ballot::Approval(b) } }
impl From<CardinalBallot> for Ballot { fn from(b: CardinalBallot) -> Self { Ballot::Cardinal(b) } }
impl From<CumulativeBallot> for Ballot { fn from(b: CumulativeBallot) -> Self { Ballot::Cumulative(b) } }
impl From<OrdinalBallot> for Ballot { fn from(b: OrdinalBallot) -> Self { Ballot::Ordinal(b) } }

impl Ballot {
    pub fn name(&self) -> Option<&str> {
        match self {
            Ballot::Approval(b) => b.name.as_deref(),
            Ballot::Cardinal(b) => b.name.as_deref(),
            Ballot::Cumulative(b) => b.name.as_deref(),
            Ballot::Ordinal(b) => b.name.as_deref(),
        }
    }
    pub fn meta(&self) -> &BTreeMap<String,String> {
        match self {
            Ballot::Approval(b) => &b.meta,
            Ballot::Cardinal(b) => &b.meta,
            Ballot::Cumulative(b) => &b.meta,
            Ballot::Ordinal(b) => &b.meta,
        }
    }
    /// Number of projects mentioned.
    pub fn len(&self) -> usize {
        match self {
            Ballot::Approval(b) => b.len(),
            Ballot::Cardinal(b) => b.len(),
            Ballot::Cumulative(b) => b.len(),
            Ballot::Ordinal(b) => b.len(),
        }
    }
    pub fn is_empty(&self) -> bool { self.len()==0 }
    /// The projects mentioned. For ordinal ballots, in preference order.
    pub fn projects(&self) -> Vec<&str> {
        match self {
            Ballot::Approval(b) => b.projects.iter().map(|s|s.as_str()).collect(),
            Ballot::Cardinal(b) => b.scores.keys().map(|s|s.as_str()).collect(),
            Ballot::Cumulative(b) => b.scores.keys().map(|s|s.as_str()).collect(),
            Ballot::Ordinal(b) => b.ranking.iter().map(|s|s.as_str()).collect(),
        }
    }
    /// Whether the project is mentioned at all (approved, scored or ranked).
    pub fn mentions(&self,project:&str) -> bool {
        match self {
            Ballot::Approval(b) => b.approves(project),
            Ballot::Cardinal(b) => b.scores.contains_key(project),
            Ballot::Cumulative(b) => b.scores.contains_key(project),
            Ballot::Ordinal(b) => b.contains(project),
        }
    }
    pub fn as_approval(&self) -> Option<&ApprovalBallot> { if let Ballot::Approval(b) = self { Some(b) } else { None } }
    /// The scores of a cardinal or cumulative ballot.
    pub fn as_cardinal(&self) -> Option<&CardinalBallot> {
        match self {
            Ballot::Cardinal(b) => Some(b),
            Ballot::Cumulative(b) => Some(&b.0),
            _ => None,
        }
    }
    pub fn as_ordinal(&self) -> Option<&OrdinalBallot> { if let Ballot::Ordinal(b) = self { Some(b) } else { None } }
}

impl BallotContent for Ballot {
    fn kind(&self) -> BallotKind {
        match self {
            Ballot::Approval(_) => BallotKind::Approval,
            Ballot::Cardinal(_) => BallotKind::Cardinal,
            Ballot::Cumulative(_) => BallotKind::Cumulative,
            Ballot::Ordinal(_) => BallotKind::Ordinal,
        }
    }
    fn hash_content<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Ballot::Approval(b) => b.hash_content(state),
            Ballot::Cardinal(b) => b.hash_content(state),
            Ballot::Cumulative(b) => b.hash_content(state),
            Ballot::Ordinal(b) => b.hash_content(state),
        }
    }
}
