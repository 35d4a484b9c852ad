// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! The votes cast in an election, either as a list of ballots ([Profile]) or as
//! distinct ballots with a count of how many voters cast each ([MultiProfile]).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use num::{Signed, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::arithmetic::{count, optional_rational_string, Numeric};
use crate::ballot::{ApprovalBallot, Ballot, BallotContent, BallotKind, FrozenBallot};
use crate::error::{BallotViolation, PbError, Result};
use crate::instance::{total_cost, Instance};
use crate::random_util::random_subset;

/// Bounds a ballot must satisfy to be accepted into a profile. Bounds that are `None` are not checked.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct Legality {
    /// Minimum number of projects mentioned.
    #[serde(default)]
    pub min_length : usize,
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub max_length : Option<usize>,
    /// Bounds on the total cost of approved projects. Approval ballots only.
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub min_cost : Option<Numeric>,
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub max_cost : Option<Numeric>,
    /// Bounds on each score. Cardinal and cumulative ballots only.
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub min_score : Option<Numeric>,
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub max_score : Option<Numeric>,
    /// Bounds on the sum of the scores. Cumulative ballots only.
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub min_total_score : Option<Numeric>,
    #[serde(default,with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub max_total_score : Option<Numeric>,
}

impl Legality {
    /// The usual bounds for a kind of ballot: no more projects than the instance has; approved
    /// projects cost at most the total cost of all projects; cumulative scores sum to at least zero.
    pub fn for_kind(kind:BallotKind,instance:&Instance) -> Self {
        let mut res = Legality{ max_length: Some(instance.len()), ..Default::default() };
        match kind {
            BallotKind::Approval => {
                res.min_cost=Some(Numeric::zero());
                res.max_cost=Some(total_cost(instance.projects()));
            }
            BallotKind::Cumulative => { res.min_total_score=Some(Numeric::zero()); }
            BallotKind::Cardinal | BallotKind::Ordinal => {}
        }
        res
    }

    /// A cumulative ballot legality with the given number of points to distribute.
    pub fn cumulative_points(instance:&Instance,points:Numeric) -> Self {
        Legality{ max_total_score: Some(points), ..Self::for_kind(BallotKind::Cumulative,instance) }
    }

    /// Check a ballot against these bounds. Projects must exist in the instance.
    pub fn check(&self,ballot:&Ballot,instance:&Instance) -> std::result::Result<(),BallotViolation> {
        for p in ballot.projects() {
            if !instance.contains(p) { return Err(BallotViolation::UnknownProject(p.to_string())); }
        }
        let length = ballot.len();
        if length<self.min_length { return Err(BallotViolation::TooShort{length,min:self.min_length}); }
        if let Some(max) = self.max_length { if length>max { return Err(BallotViolation::TooLong{length,max}); } }
        match ballot {
            Ballot::Approval(b) => {
                let cost : Numeric = b.projects.iter().filter_map(|p|instance.get_project(p).ok()).map(|p|p.cost()).sum();
                if let Some(min) = &self.min_cost { if cost<*min { return Err(BallotViolation::CostTooLow{cost,min:min.clone()}); } }
                if let Some(max) = &self.max_cost { if cost>*max { return Err(BallotViolation::CostTooHigh{cost,max:max.clone()}); } }
            }
            Ballot::Cardinal(_) | Ballot::Cumulative(_) => {
                if let Some(b) = ballot.as_cardinal() {
                    for (project,score) in &b.scores {
                        if let Some(min) = &self.min_score { if score<min { return Err(BallotViolation::ScoreTooLow{project:project.clone(),score:score.clone(),min:min.clone()}); } }
                        if let Some(max) = &self.max_score { if score>max { return Err(BallotViolation::ScoreTooHigh{project:project.clone(),score:score.clone(),max:max.clone()}); } }
                    }
                    if let Ballot::Cumulative(_) = ballot {
                        let total = b.total_score();
                        if let Some(min) = &self.min_total_score { if total<*min { return Err(BallotViolation::TotalScoreTooLow{total,min:min.clone()}); } }
                        if let Some(max) = &self.max_total_score { if total>*max { return Err(BallotViolation::TotalScoreTooHigh{total,max:max.clone()}); } }
                    }
                }
            }
            Ballot::Ordinal(b) => {
                let mut seen = HashSet::new();
                for p in b.ranking() {
                    if !seen.insert(p) { return Err(BallotViolation::RankedTwice(p.clone())); }
                }
            }
        }
        Ok(())
    }
}

/// Read access common to both shapes of profile.
pub trait ProfileView {
    fn instance(&self) -> &Instance;
    fn ballot_kind(&self) -> BallotKind;
    fn legality(&self) -> &Legality;
    /// Each distinct stored ballot with how many voters it stands for.
    fn ballots_with_multiplicity(&self) -> Box<dyn Iterator<Item=(&Ballot,usize)>+'_>;

    /// Number of voters.
    fn num_ballots(&self) -> usize { self.ballots_with_multiplicity().map(|(_,n)|n).sum() }

    /// Whether the ballot could be added: right kind, and within the legality bounds.
    fn validate_ballot(&self,ballot:&Ballot) -> Result<()> {
        if ballot.kind()!=self.ballot_kind() { return Err(PbError::BallotKindMismatch{expected:self.ballot_kind(),found:ballot.kind()}); }
        self.legality().check(ballot,self.instance())?;
        Ok(())
    }
    fn is_valid_ballot(&self,ballot:&Ballot) -> bool { self.validate_ballot(ballot).is_ok() }

    /// Number of voters supporting the project: approving it, giving it a positive score, or ranking it.
    fn approval_score(&self,project:&str) -> usize {
        self.ballots_with_multiplicity().filter(|(b,_)|supports(b,project)).map(|(_,n)|n).sum()
    }
    /// [ProfileView::approval_score] for every project in the instance.
    fn approval_scores(&self) -> BTreeMap<String,usize> {
        let mut res : BTreeMap<String,usize> = self.instance().project_names().map(|p|(p.to_string(),0)).collect();
        for (ballot,n) in self.ballots_with_multiplicity() {
            for p in ballot.projects() {
                if supports(ballot,p) { if let Some(score) = res.get_mut(p) { *score+=n; } }
            }
        }
        res
    }
    /// Sum over voters of the score given to the project. Cardinal and cumulative profiles only.
    fn total_score(&self,project:&str) -> Result<Numeric> {
        let mut res = Numeric::zero();
        for (ballot,n) in self.ballots_with_multiplicity() {
            let cardinal = ballot.as_cardinal().ok_or(PbError::BallotKindMismatch{expected:BallotKind::Cardinal,found:ballot.kind()})?;
            res+=cardinal.score(project)*count(n);
        }
        Ok(res)
    }
    /// Projects supported by at least one voter.
    fn approved_projects(&self) -> BTreeSet<String> {
        let mut res = BTreeSet::new();
        for (ballot,_) in self.ballots_with_multiplicity() {
            for p in ballot.projects() {
                if supports(ballot,p) { res.insert(p.to_string()); }
            }
        }
        res
    }
    /// An approval profile where any two ballots are either identical or disjoint.
    fn is_party_list(&self) -> bool {
        if self.ballot_kind()!=BallotKind::Approval { return false; }
        let ballots : Vec<&ApprovalBallot> = self.ballots_with_multiplicity().filter_map(|(b,_)|b.as_approval()).collect();
        ballots.iter().enumerate().all(|(i,b1)|ballots[i+1..].iter().all(|b2|b1.projects==b2.projects || b1.projects.is_disjoint(&b2.projects)))
    }
    /// No voter supports a project that could be afforded on its own.
    fn is_trivial(&self) -> bool {
        let budget = self.instance().budget_limit();
        self.approved_projects().iter().all(|p|self.instance().get_project(p).map(|p|p.cost()>budget).unwrap_or(true))
    }
}

fn supports(ballot:&Ballot,project:&str) -> bool {
    match ballot.as_cardinal() {
        Some(cardinal) => cardinal.explicit_score(project).map(|s|s.is_positive()).unwrap_or(false),
        None => ballot.mentions(project),
    }
}

/// A list of ballots, all of one kind, for one instance.
#[derive(Clone,Debug)]
pub struct Profile<'a> {
    instance : &'a Instance,
    kind : BallotKind,
    legality : Legality,
    validation : bool,
    ballots : Vec<Ballot>,
}

/// A profile with the instance reference removed, for serialization.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct ProfileRecord {
    pub kind : BallotKind,
    pub legality : Legality,
    #[serde(default="default_validation")]
    pub validation : bool,
    pub ballots : Vec<Ballot>,
}

fn default_validation() -> bool { true }

impl<'a> Profile<'a> {
    /// An empty profile with the default legality bounds for the kind, validating ballots as they are added.
    pub fn new(instance:&'a Instance,kind:BallotKind) -> Self {
        Profile{ instance, kind, legality: Legality::for_kind(kind,instance), validation: true, ballots: vec![] }
    }
    pub fn with_legality(mut self,legality:Legality) -> Self { self.legality=legality; self }
    /// Only check the ballot kind on insertion, not the legality bounds.
    pub fn without_validation(mut self) -> Self { self.validation=false; self }
    pub fn validation(&self) -> bool { self.validation }

    /// A profile of the given kind containing the given ballots.
    pub fn from_ballots<I:IntoIterator<Item=B>,B:Into<Ballot>>(instance:&'a Instance,kind:BallotKind,ballots:I) -> Result<Self> {
        let mut res = Self::new(instance,kind);
        res.extend(ballots)?;
        Ok(res)
    }

    fn admit(&self,ballot:&Ballot) -> Result<()> {
        if self.validation { self.validate_ballot(ballot) }
        else if ballot.kind()!=self.kind { Err(PbError::BallotKindMismatch{expected:self.kind,found:ballot.kind()}) }
        else { Ok(()) }
    }

    pub fn push(&mut self,ballot:impl Into<Ballot>) -> Result<()> {
        let ballot = ballot.into();
        self.admit(&ballot)?;
        self.ballots.push(ballot);
        Ok(())
    }
    /// Add several ballots. Stops at the first rejected ballot, keeping those before it.
    pub fn extend<I:IntoIterator<Item=B>,B:Into<Ballot>>(&mut self,ballots:I) -> Result<()> {
        for b in ballots { self.push(b)?; }
        Ok(())
    }
    pub fn insert(&mut self,index:usize,ballot:impl Into<Ballot>) -> Result<()> {
        if index>self.ballots.len() { return Err(PbError::IndexOutOfRange{index,len:self.ballots.len()}); }
        let ballot = ballot.into();
        self.admit(&ballot)?;
        self.ballots.insert(index,ballot);
        Ok(())
    }
    /// Replace the ballot at index, returning the old one.
    pub fn set(&mut self,index:usize,ballot:impl Into<Ballot>) -> Result<Ballot> {
        if index>=self.ballots.len() { return Err(PbError::IndexOutOfRange{index,len:self.ballots.len()}); }
        let ballot = ballot.into();
        self.admit(&ballot)?;
        Ok(std::mem::replace(&mut self.ballots[index],ballot))
    }
    pub fn get(&self,index:usize) -> Option<&Ballot> { self.ballots.get(index) }
    pub fn remove(&mut self,index:usize) -> Result<Ballot> {
        if index>=self.ballots.len() { return Err(PbError::IndexOutOfRange{index,len:self.ballots.len()}); }
        Ok(self.ballots.remove(index))
    }
    pub fn pop(&mut self) -> Result<Ballot> { self.ballots.pop().ok_or(PbError::Empty("profile")) }
    pub fn len(&self) -> usize { self.ballots.len() }
    pub fn is_empty(&self) -> bool { self.ballots.is_empty() }
    pub fn ballots(&self) -> &[Ballot] { &self.ballots }
    pub fn iter(&self) -> impl Iterator<Item=&Ballot> { self.ballots.iter() }

    /// Number of ballots with the same content as the given one.
    pub fn multiplicity(&self,ballot:&Ballot) -> usize { self.ballots.iter().filter(|b|*b==ballot).count() }

    /// Group equal ballots. The first ballot of each group (with its voter name and metadata) represents it.
    pub fn as_multiprofile(&self) -> MultiProfile<'a> {
        let mut res = MultiProfile{ instance: self.instance, kind: self.kind, legality: self.legality.clone(), validation: self.validation, entries: vec![], index: HashMap::new() };
        for b in &self.ballots { res.add_unchecked(b.clone().freeze(),1); }
        res
    }

    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord{ kind: self.kind, legality: self.legality.clone(), validation: self.validation, ballots: self.ballots.clone() }
    }
    pub fn from_record(instance:&'a Instance,record:ProfileRecord) -> Result<Self> {
        let mut res = Profile{ instance, kind: record.kind, legality: record.legality, validation: record.validation, ballots: vec![] };
        res.extend(record.ballots)?;
        Ok(res)
    }

    /// A random approval profile: each voter approves a uniformly sized random subset of the projects.
    pub fn random_approval<R:Rng>(instance:&'a Instance,num_voters:usize,rng:&mut R) -> Result<Self> {
        let names : Vec<&str> = instance.project_names().collect();
        let mut res = Self::new(instance,BallotKind::Approval);
        for _ in 0..num_voters {
            res.push(ApprovalBallot::new(random_subset(&names,rng).into_iter().copied()))?;
        }
        Ok(res)
    }
}

impl ProfileView for Profile<'_> {
    fn instance(&self) -> &Instance { self.instance }
    fn ballot_kind(&self) -> BallotKind { self.kind }
    fn legality(&self) -> &Legality { &self.legality }
    fn ballots_with_multiplicity(&self) -> Box<dyn Iterator<Item=(&Ballot,usize)>+'_> { Box::new(self.ballots.iter().map(|b|(b,1))) }
    fn num_ballots(&self) -> usize { self.ballots.len() }
}

/// Distinct ballots with their multiplicities, in order of first insertion.
#[derive(Clone,Debug)]
pub struct MultiProfile<'a> {
    instance : &'a Instance,
    kind : BallotKind,
    legality : Legality,
    validation : bool,
    entries : Vec<(FrozenBallot,usize)>,
    /// ballot -> position in entries.
    index : HashMap<FrozenBallot,usize>,
}

/// A multi-profile with the instance reference removed, for serialization.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct MultiProfileRecord {
    pub kind : BallotKind,
    pub legality : Legality,
    #[serde(default="default_validation")]
    pub validation : bool,
    pub ballots : Vec<(Ballot,usize)>,
}

impl<'a> MultiProfile<'a> {
    pub fn new(instance:&'a Instance,kind:BallotKind) -> Self {
        MultiProfile{ instance, kind, legality: Legality::for_kind(kind,instance), validation: true, entries: vec![], index: HashMap::new() }
    }
    pub fn with_legality(mut self,legality:Legality) -> Self { self.legality=legality; self }
    pub fn without_validation(mut self) -> Self { self.validation=false; self }

    fn add_unchecked(&mut self,ballot:FrozenBallot,multiplicity:usize) {
        if multiplicity==0 { return; }
        match self.index.get(&ballot) {
            Some(&position) => self.entries[position].1+=multiplicity,
            None => {
                self.index.insert(ballot.clone(),self.entries.len());
                self.entries.push((ballot,multiplicity));
            }
        }
    }

    pub fn add(&mut self,ballot:FrozenBallot) -> Result<()> { self.add_multiple(ballot,1) }
    /// Add `multiplicity` voters casting this ballot.
    pub fn add_multiple(&mut self,ballot:FrozenBallot,multiplicity:usize) -> Result<()> {
        if self.validation { self.validate_ballot(&ballot)?; }
        else if ballot.kind()!=self.kind { return Err(PbError::BallotKindMismatch{expected:self.kind,found:ballot.kind()}); }
        self.add_unchecked(ballot,multiplicity);
        Ok(())
    }

    pub fn multiplicity(&self,ballot:&FrozenBallot) -> usize {
        self.index.get(ballot).map(|&position|self.entries[position].1).unwrap_or(0)
    }

    /// Remove up to `multiplicity` voters casting this ballot. Ballots whose count reaches zero are dropped.
    pub fn subtract(&mut self,ballot:&FrozenBallot,multiplicity:usize) {
        if let Some(&position) = self.index.get(ballot) {
            let remaining = self.entries[position].1.saturating_sub(multiplicity);
            if remaining==0 {
                self.entries.remove(position);
                self.reindex();
            } else { self.entries[position].1=remaining; }
        }
    }
    /// Subtract every ballot of other.
    pub fn subtract_profile(&mut self,other:&MultiProfile) {
        for (ballot,n) in &other.entries { self.subtract(ballot,*n); }
    }

    fn reindex(&mut self) {
        self.index = self.entries.iter().enumerate().map(|(i,(b,_))|(b.clone(),i)).collect();
    }

    /// The `n` most common ballots (all if `None`), most common first. Equal counts keep insertion order.
    pub fn most_common(&self,n:Option<usize>) -> Vec<(&FrozenBallot,usize)> {
        let mut res : Vec<(&FrozenBallot,usize)> = self.entries.iter().map(|(b,c)|(b,*c)).collect();
        res.sort_by(|a,b|b.1.cmp(&a.1));
        if let Some(n) = n { res.truncate(n); }
        res
    }

    /// Each ballot repeated as many times as its multiplicity.
    pub fn elements(&self) -> impl Iterator<Item=&FrozenBallot> {
        self.entries.iter().flat_map(|(b,n)|std::iter::repeat_n(b,*n))
    }

    fn check_compatible(&self,other:&MultiProfile) -> Result<()> {
        if self.kind!=other.kind { Err(PbError::BallotKindMismatch{expected:self.kind,found:other.kind}) } else { Ok(()) }
    }

    /// Multiset union: each ballot with the larger of its two multiplicities.
    pub fn union(&self,other:&MultiProfile) -> Result<MultiProfile<'a>> {
        self.check_compatible(other)?;
        let mut res = self.clone();
        for (ballot,n) in &other.entries {
            let existing = res.multiplicity(ballot);
            if *n>existing { res.add_unchecked(ballot.clone(),n-existing); }
        }
        Ok(res)
    }
    /// Multiset sum: multiplicities added.
    pub fn sum(&self,other:&MultiProfile) -> Result<MultiProfile<'a>> {
        self.check_compatible(other)?;
        let mut res = self.clone();
        for (ballot,n) in &other.entries { res.add_unchecked(ballot.clone(),*n); }
        Ok(res)
    }

    /// Number of voters.
    pub fn total(&self) -> usize { self.entries.iter().map(|(_,n)|*n).sum() }
    /// Number of distinct ballots.
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item=(&FrozenBallot,usize)> { self.entries.iter().map(|(b,n)|(b,*n)) }

    /// Expand into a list, each ballot repeated by its multiplicity.
    pub fn as_profile(&self) -> Profile<'a> {
        Profile{ instance: self.instance, kind: self.kind, legality: self.legality.clone(), validation: self.validation, ballots: self.elements().map(|b|b.thaw()).collect() }
    }

    pub fn to_record(&self) -> MultiProfileRecord {
        MultiProfileRecord{ kind: self.kind, legality: self.legality.clone(), validation: self.validation, ballots: self.entries.iter().map(|(b,n)|(b.thaw(),*n)).collect() }
    }
    pub fn from_record(instance:&'a Instance,record:MultiProfileRecord) -> Result<Self> {
        let mut res = MultiProfile{ instance, kind: record.kind, legality: record.legality, validation: record.validation, entries: vec![], index: HashMap::new() };
        for (ballot,n) in record.ballots { res.add_multiple(ballot.freeze(),n)?; }
        Ok(res)
    }
}

impl ProfileView for MultiProfile<'_> {
    fn instance(&self) -> &Instance { self.instance }
    fn ballot_kind(&self) -> BallotKind { self.kind }
    fn legality(&self) -> &Legality { &self.legality }
    fn ballots_with_multiplicity(&self) -> Box<dyn Iterator<Item=(&Ballot,usize)>+'_> { Box::new(self.entries.iter().map(|(b,n)|(&**b,*n))) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::int;
    use crate::ballot::{CardinalBallot, CumulativeBallot, OrdinalBallot};
    use crate::instance::Project;

    fn instance() -> Instance {
        Instance::new(vec![Project::new("p1",int(10)),Project::new("p2",int(10)),Project::new("p3",int(15))],int(20)).unwrap()
    }

    #[test]
    fn test_kind_mismatch_rejected_even_without_validation() {
        let instance = instance();
        let mut profile = Profile::new(&instance,BallotKind::Approval).without_validation();
        let err = profile.push(OrdinalBallot::from_ranking(["p1"]).unwrap()).unwrap_err();
        assert_eq!(PbError::BallotKindMismatch{expected:BallotKind::Approval,found:BallotKind::Ordinal},err);
        profile.push(ApprovalBallot::new(["nonexistent"])).unwrap();
        assert_eq!(1,profile.len());
    }

    #[test]
    fn test_unknown_project_and_length() {
        let instance = instance();
        let legality = Legality{ min_length: 1, max_length: Some(2), ..Legality::for_kind(BallotKind::Approval,&instance) };
        let mut profile = Profile::new(&instance,BallotKind::Approval).with_legality(legality);
        assert_eq!(Err(PbError::Domain(BallotViolation::UnknownProject("p9".to_string()))),profile.push(ApprovalBallot::new(["p9"])));
        assert_eq!(Err(PbError::Domain(BallotViolation::TooShort{length:0,min:1})),profile.push(ApprovalBallot::default()));
        assert_eq!(Err(PbError::Domain(BallotViolation::TooLong{length:3,max:2})),profile.push(ApprovalBallot::new(["p1","p2","p3"])));
        profile.push(ApprovalBallot::new(["p1","p3"])).unwrap();
        assert_eq!(1,profile.len());
    }

    #[test]
    fn test_approval_cost_bounds() {
        let instance = instance();
        let legality = Legality{ max_cost: Some(int(20)), ..Legality::for_kind(BallotKind::Approval,&instance) };
        let profile = Profile::new(&instance,BallotKind::Approval).with_legality(legality);
        assert!(profile.is_valid_ballot(&ApprovalBallot::new(["p1","p2"]).into()));
        assert_eq!(Err(PbError::Domain(BallotViolation::CostTooHigh{cost:int(25),max:int(20)})),profile.validate_ballot(&ApprovalBallot::new(["p1","p3"]).into()));
    }

    #[test]
    fn test_cumulative_total() {
        let instance = instance();
        let profile = Profile::new(&instance,BallotKind::Cumulative).with_legality(Legality::cumulative_points(&instance,int(10)));
        assert!(profile.is_valid_ballot(&CumulativeBallot::new([("p1",int(6)),("p2",int(4))]).into()));
        assert_eq!(Err(PbError::Domain(BallotViolation::TotalScoreTooHigh{total:int(11),max:int(10)})),profile.validate_ballot(&CumulativeBallot::new([("p1",int(6)),("p2",int(5))]).into()));
        // a cardinal ballot with the same scores is the wrong kind.
        assert!(!profile.is_valid_ballot(&CardinalBallot::new([("p1",int(6))]).into()));
    }

    #[test]
    fn test_score_bounds() {
        let instance = instance();
        let legality = Legality{ min_score: Some(int(0)), max_score: Some(int(5)), ..Legality::for_kind(BallotKind::Cardinal,&instance) };
        let profile = Profile::new(&instance,BallotKind::Cardinal).with_legality(legality);
        assert!(profile.is_valid_ballot(&CardinalBallot::new([("p1",int(5))]).into()));
        assert!(!profile.is_valid_ballot(&CardinalBallot::new([("p1",int(6))]).into()));
        assert!(!profile.is_valid_ballot(&CardinalBallot::new([("p1",int(-1))]).into()));
    }

    #[test]
    fn test_positional_operations() {
        let instance = instance();
        let mut profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["p1"]),ApprovalBallot::new(["p2"])]).unwrap();
        profile.insert(0,ApprovalBallot::new(["p3"])).unwrap();
        assert!(profile.insert(5,ApprovalBallot::new(["p3"])).is_err());
        assert_eq!(Some(&Ballot::from(ApprovalBallot::new(["p3"]))),profile.get(0));
        let old = profile.set(1,ApprovalBallot::new(["p2"])).unwrap();
        assert_eq!(Ballot::from(ApprovalBallot::new(["p1"])),old);
        assert_eq!(2,profile.multiplicity(&ApprovalBallot::new(["p2"]).into()));
        assert!(profile.remove(3).is_err());
        profile.remove(0).unwrap();
        profile.pop().unwrap();
        profile.pop().unwrap();
        assert_eq!(Err(PbError::Empty("profile")),profile.pop());
    }

    #[test]
    fn test_multiprofile_operations() {
        let instance = instance();
        let a = || Ballot::from(ApprovalBallot::new(["p1"])).freeze();
        let b = || Ballot::from(ApprovalBallot::new(["p2","p3"])).freeze();
        let mut multi = MultiProfile::new(&instance,BallotKind::Approval);
        multi.add(a()).unwrap();
        multi.add_multiple(b(),3).unwrap();
        multi.add(a()).unwrap();
        assert_eq!(2,multi.len());
        assert_eq!(5,multi.total());
        assert_eq!(vec![(&b(),3),(&a(),2)],multi.most_common(None));
        assert_eq!(1,multi.most_common(Some(1)).len());
        assert_eq!(5,multi.elements().count());

        let mut other = MultiProfile::new(&instance,BallotKind::Approval);
        other.add_multiple(a(),4).unwrap();
        let union = multi.union(&other).unwrap();
        assert_eq!(4,union.multiplicity(&a()));
        assert_eq!(3,union.multiplicity(&b()));
        let sum = multi.sum(&other).unwrap();
        assert_eq!(6,sum.multiplicity(&a()));

        multi.subtract(&b(),1);
        assert_eq!(2,multi.multiplicity(&b()));
        multi.subtract_profile(&other);
        assert_eq!(0,multi.multiplicity(&a()));
        assert_eq!(1,multi.len());
        assert_eq!(2,multi.multiplicity(&b()));

        let ordinal = MultiProfile::new(&instance,BallotKind::Ordinal);
        assert!(multi.sum(&ordinal).is_err());
    }

    #[test]
    fn test_shape_round_trip() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[
            ApprovalBallot::new(["p1"]).with_name("v1"),
            ApprovalBallot::new(["p2"]).with_name("v2"),
            ApprovalBallot::new(["p1"]).with_name("v3"),
        ]).unwrap();
        let multi = profile.as_multiprofile();
        assert_eq!(2,multi.len());
        assert_eq!(3,multi.num_ballots());
        // the first of a group represents it.
        assert_eq!(Some("v1"),multi.iter().next().and_then(|(b,_)|b.name()));
        let back = multi.as_profile();
        assert_eq!(3,back.len());
        assert_eq!(profile.multiplicity(&ApprovalBallot::new(["p1"]).into()),back.multiplicity(&ApprovalBallot::new(["p1"]).into()));
        assert_eq!(profile.approval_scores(),back.approval_scores());
    }

    #[test]
    fn test_approval_helpers() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[
            ApprovalBallot::new(["p1","p2"]),
            ApprovalBallot::new(["p1","p2"]),
            ApprovalBallot::new(["p3"]),
        ]).unwrap();
        assert_eq!(2,profile.approval_score("p1"));
        assert_eq!(vec![("p1".to_string(),2),("p2".to_string(),2),("p3".to_string(),1)],profile.approval_scores().into_iter().collect::<Vec<_>>());
        assert!(profile.is_party_list());
        assert!(!profile.is_trivial());
        let mut overlapping = profile.clone();
        overlapping.push(ApprovalBallot::new(["p2","p3"])).unwrap();
        assert!(!overlapping.is_party_list());
        let expensive = Instance::new(vec![Project::new("p1",int(30))],int(20)).unwrap();
        let trivial = Profile::from_ballots(&expensive,BallotKind::Approval,[ApprovalBallot::new(["p1"])]).unwrap();
        assert!(trivial.is_trivial());
    }

    #[test]
    fn test_total_score() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Cardinal,[
            CardinalBallot::new([("p1",int(3))]).with_default_score(int(1)),
            CardinalBallot::new([("p1",int(2)),("p2",int(0))]),
        ]).unwrap();
        assert_eq!(int(5),profile.total_score("p1").unwrap());
        assert_eq!(int(1),profile.total_score("p2").unwrap());
        // a zero or default score is not support.
        assert_eq!(2,profile.approval_score("p1"));
        assert_eq!(0,profile.approval_score("p2"));
        let approval = Profile::new(&instance,BallotKind::Approval);
        assert_eq!(int(0),approval.total_score("p1").unwrap());
    }

    #[test]
    fn test_random_approval() {
        let instance = instance();
        let mut rng = crate::random_util::seeded_rng(11);
        let profile = Profile::random_approval(&instance,25,&mut rng).unwrap();
        assert_eq!(25,profile.len());
        assert!(profile.iter().all(|b|profile.is_valid_ballot(b)));
    }
}
