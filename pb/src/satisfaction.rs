// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! How happy is a voter with a budget allocation?
//!
//! A [MeasureKind] says how to turn a ballot and a set of funded projects into a [Numeric].
//! A [SatisfactionProfile] or [SatisfactionMultiProfile] holds one such measure for every voter of a
//! profile, with anything that only depends on the profile (approval scores, per voter normalisers)
//! worked out once when it is built.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use anyhow::anyhow;
use num::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::arithmetic::{count, gini_coefficient, mean, ArithmeticMode, Numeric};
use crate::ballot::{Ballot, BallotContent, BallotKind};
use crate::error::{PbError, Result};
use crate::instance::{Instance, Project};
use crate::profile::{MultiProfile, Profile, ProfileView};

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum MeasureFamily {
    /// Sum over funded projects of a per project value.
    Additive,
    /// A function of the set of funded approved projects as a whole.
    Functional,
    /// Depends on where funded projects are ranked.
    Positional,
}

/// The satisfaction functions available.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum MeasureKind {
    /// Number of funded approved projects.
    Cardinality,
    /// Total cost of funded approved projects.
    Cost,
    /// Each funded approved project contributes its cost divided by its approval score.
    Effort,
    /// Each funded approved project contributes sqrt(cost).
    AdditiveCostSqrt,
    /// Each funded approved project contributes ln(1+cost).
    AdditiveCostLog,
    /// Cardinality divided by the most approved projects the voter could have funded together.
    RelativeCardinality,
    /// Cost divided by the most the voter could have had spent on approved projects.
    RelativeCost,
    /// Cost divided by min(cost of approved projects, budget limit).
    RelativeCostApprox,
    /// Sum of the scores the voter gave funded projects.
    AdditiveCardinal,
    /// 1 if any funded project is approved, else 0.
    ChamberlinCourant,
    /// sqrt of the total cost of funded approved projects.
    CostSqrt,
    /// ln(1+total cost of funded approved projects).
    CostLog,
    /// A project ranked at 0 based position i on a ballot of length L is worth L-1-i; summed over funded projects.
    Borda,
    /// As [MeasureKind::Borda], but the best funded project counts rather than the sum.
    BordaMax,
}

impl MeasureKind {
    pub const ALL : [MeasureKind;14] = [MeasureKind::Cardinality,MeasureKind::Cost,MeasureKind::Effort,MeasureKind::AdditiveCostSqrt,MeasureKind::AdditiveCostLog,MeasureKind::RelativeCardinality,MeasureKind::RelativeCost,MeasureKind::RelativeCostApprox,MeasureKind::AdditiveCardinal,MeasureKind::ChamberlinCourant,MeasureKind::CostSqrt,MeasureKind::CostLog,MeasureKind::Borda,MeasureKind::BordaMax];

    pub fn family(self) -> MeasureFamily {
        match self {
            MeasureKind::ChamberlinCourant | MeasureKind::CostSqrt | MeasureKind::CostLog => MeasureFamily::Functional,
            MeasureKind::Borda | MeasureKind::BordaMax => MeasureFamily::Positional,
            _ => MeasureFamily::Additive,
        }
    }

    /// Whether the satisfaction from a set of projects is the sum of the satisfactions from each.
    pub fn is_additive(self) -> bool { self.family()==MeasureFamily::Additive || self==MeasureKind::Borda }

    /// Whether this can be applied to ballots of the given kind.
    pub fn accepts(self,kind:BallotKind) -> bool {
        match self {
            MeasureKind::AdditiveCardinal => kind==BallotKind::Cardinal || kind==BallotKind::Cumulative,
            MeasureKind::Borda | MeasureKind::BordaMax => kind==BallotKind::Ordinal,
            _ => kind==BallotKind::Approval,
        }
    }

    fn name(self) -> &'static str {
        match self {
            MeasureKind::Cardinality => "cardinality",
            MeasureKind::Cost => "cost",
            MeasureKind::Effort => "effort",
            MeasureKind::AdditiveCostSqrt => "additive_cost_sqrt",
            MeasureKind::AdditiveCostLog => "additive_cost_log",
            MeasureKind::RelativeCardinality => "relative_cardinality",
            MeasureKind::RelativeCost => "relative_cost",
            MeasureKind::RelativeCostApprox => "relative_cost_approx",
            MeasureKind::AdditiveCardinal => "additive_cardinal",
            MeasureKind::ChamberlinCourant => "chamberlin_courant",
            MeasureKind::CostSqrt => "cost_sqrt",
            MeasureKind::CostLog => "cost_log",
            MeasureKind::Borda => "borda",
            MeasureKind::BordaMax => "borda_max",
        }
    }
}

impl Display for MeasureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f,"{}",self.name()) }
}

impl FromStr for MeasureKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace(['-',' '],"_");
        MeasureKind::ALL.iter().copied().find(|m|m.name()==wanted).ok_or_else(||anyhow!("Not a valid satisfaction measure : {}",s))
    }
}

/// Most reachable totals kept when working out the [MeasureKind::RelativeCost] normaliser.
const MAX_REACHABLE_TOTALS : usize = 1<<16;

/// What is known about one voter before any allocation is considered.
#[derive(Clone,Debug)]
pub struct VoterSatisfaction<'a> {
    pub ballot : &'a Ballot,
    /// Divisor for the relative measures.
    pub normaliser : Option<Numeric>,
}

/// A measure bound to an instance, with the profile wide data it needs.
#[derive(Clone,Debug)]
pub struct Measure<'a> {
    pub instance : &'a Instance,
    pub kind : MeasureKind,
    pub arithmetic : ArithmeticMode,
    approval_scores : BTreeMap<String,usize>,
}

impl<'a> Measure<'a> {
    /// Bind the measure to an instance, usually the profile's own, although a rule may evaluate
    /// against a modified budget. Fails if the profile's ballots are the wrong kind.
    pub fn new<P:ProfileView+?Sized>(instance:&'a Instance,profile:&P,kind:MeasureKind,arithmetic:ArithmeticMode) -> Result<Self> {
        if !kind.accepts(profile.ballot_kind()) { return Err(PbError::SatisfactionKindMismatch{measure:kind,found:profile.ballot_kind()}); }
        let approval_scores = if kind==MeasureKind::Effort { profile.approval_scores() } else { BTreeMap::new() };
        Ok(Measure{ instance, kind, arithmetic, approval_scores })
    }

    /// Do the per voter preprocessing.
    pub fn voter(&self,ballot:&'a Ballot) -> Result<VoterSatisfaction<'a>> {
        if !self.kind.accepts(ballot.kind()) { return Err(PbError::SatisfactionKindMismatch{measure:self.kind,found:ballot.kind()}); }
        let normaliser = match self.kind {
            MeasureKind::RelativeCardinality => Some(self.max_fundable_count(ballot)),
            MeasureKind::RelativeCost => Some(self.max_fundable_cost(ballot)),
            MeasureKind::RelativeCostApprox => {
                let approved : Numeric = self.approved(ballot).map(|p|p.cost()).sum();
                Some(approved.min(self.instance.budget_limit().clone()))
            }
            _ => None,
        };
        Ok(VoterSatisfaction{ ballot, normaliser })
    }

    fn approved(&self,ballot:&'a Ballot) -> impl Iterator<Item=&'a Project> {
        let instance = self.instance;
        ballot.as_approval().into_iter().flat_map(|b|b.projects.iter()).filter_map(move |p|instance.get_project(p).ok())
    }

    /// Most approved projects that fit in the budget together: take the cheapest first.
    fn max_fundable_count(&self,ballot:&'a Ballot) -> Numeric {
        let mut costs : Vec<&Numeric> = self.approved(ballot).map(|p|p.cost()).collect();
        costs.sort();
        let mut left = self.instance.budget_limit().clone();
        let mut funded = 0;
        for c in costs {
            if *c>left { break; }
            left-=c;
            funded+=1;
        }
        count(funded)
    }

    fn max_fundable_cost(&self,ballot:&'a Ballot) -> Numeric { self.max_fundable_cost_bounded(ballot,MAX_REACHABLE_TOTALS) }

    /// Largest total cost of approved projects that fit in the budget together, by subset sum
    /// over the reachable totals.
    ///
    /// With k approved projects of unrelated rational costs there can be 2^k reachable totals.
    /// Once there are more than `limit` of them, give up and return the budget, which is the
    /// [MeasureKind::RelativeCostApprox] normaliser as the approved projects cost more than it.
    fn max_fundable_cost_bounded(&self,ballot:&'a Ballot,limit:usize) -> Numeric {
        let budget = self.instance.budget_limit();
        let approved : Vec<&Project> = self.approved(ballot).collect();
        let total : Numeric = approved.iter().map(|p|p.cost()).sum();
        if &total<=budget { return total; }
        let mut reachable : BTreeSet<Numeric> = BTreeSet::new();
        reachable.insert(Numeric::zero());
        for p in approved {
            let extended : Vec<Numeric> = reachable.iter().map(|s|s+p.cost()).filter(|s|s<=budget).collect();
            reachable.extend(extended);
            if reachable.last()==Some(budget) { return budget.clone(); }
            if reachable.len()>limit {
                warn!(event="relative_cost_approximated",voter=?ballot.name(),reachable=reachable.len(),limit);
                return budget.clone();
            }
        }
        reachable.into_iter().next_back().unwrap_or_else(Numeric::zero)
    }

    fn relative(&self,value:Numeric,voter:&VoterSatisfaction) -> Numeric {
        match &voter.normaliser {
            Some(n) if !n.is_zero() => self.arithmetic.div(&value,n),
            _ => Numeric::zero(),
        }
    }

    fn borda_value(ballot:&Ballot,project:&Project) -> Numeric {
        match ballot.as_ordinal() {
            Some(ordinal) => match ordinal.position(project.name()) {
                Some(i) => count(ordinal.len()-1-i),
                None => Numeric::zero(),
            },
            None => Numeric::zero(),
        }
    }

    /// What a single funded project is worth to the voter. For additive measures the satisfaction
    /// with an allocation is the sum of these.
    pub fn project_value(&self,voter:&VoterSatisfaction,project:&Project) -> Numeric {
        let ballot = voter.ballot;
        match self.kind {
            MeasureKind::AdditiveCardinal => ballot.as_cardinal().map(|c|c.score(project.name()).clone()).unwrap_or_else(Numeric::zero),
            MeasureKind::Borda | MeasureKind::BordaMax => Self::borda_value(ballot,project),
            _ if !ballot.as_approval().map(|a|a.approves(project.name())).unwrap_or(false) => Numeric::zero(),
            MeasureKind::Cardinality => Numeric::one(),
            MeasureKind::Cost => project.cost().clone(),
            MeasureKind::Effort => {
                let supporters = self.approval_scores.get(project.name()).copied().unwrap_or(0);
                if supporters==0 { Numeric::zero() } else { self.arithmetic.div(project.cost(),&count(supporters)) }
            }
            MeasureKind::AdditiveCostSqrt => self.arithmetic.sqrt(project.cost()),
            MeasureKind::AdditiveCostLog => self.arithmetic.ln_1p(project.cost()),
            MeasureKind::RelativeCardinality => self.relative(Numeric::one(),voter),
            MeasureKind::RelativeCost | MeasureKind::RelativeCostApprox => self.relative(project.cost().clone(),voter),
            // functional measures: the satisfaction from this project alone.
            MeasureKind::ChamberlinCourant => Numeric::one(),
            MeasureKind::CostSqrt => self.arithmetic.sqrt(project.cost()),
            MeasureKind::CostLog => self.arithmetic.ln_1p(project.cost()),
        }
    }

    /// The voter's satisfaction with the allocation. Zero for an empty allocation.
    pub fn satisfaction(&self,voter:&VoterSatisfaction,allocation:&[Project]) -> Numeric {
        if allocation.is_empty() { return Numeric::zero(); }
        match self.kind {
            MeasureKind::BordaMax => allocation.iter().map(|p|Self::borda_value(voter.ballot,p)).max().unwrap_or_else(Numeric::zero),
            MeasureKind::ChamberlinCourant | MeasureKind::CostSqrt | MeasureKind::CostLog => {
                let approval = match voter.ballot.as_approval() { Some(a) => a, None => return Numeric::zero() };
                let funded : Vec<&Project> = allocation.iter().filter(|p|approval.approves(p.name())).collect();
                let cost : Numeric = funded.iter().map(|p|p.cost()).sum();
                match self.kind {
                    MeasureKind::ChamberlinCourant => if funded.is_empty() { Numeric::zero() } else { Numeric::one() },
                    MeasureKind::CostSqrt => self.arithmetic.sqrt(&cost),
                    _ => self.arithmetic.ln_1p(&cost),
                }
            }
            _ => allocation.iter().map(|p|self.project_value(voter,p)).sum(),
        }
    }
}

/// Satisfaction of a whole electorate with an allocation.
pub trait GroupSatisfaction<'a> {
    fn measure(&self) -> &Measure<'a>;
    /// Each distinct voter with the number of voters it stands for.
    fn voters(&self) -> Box<dyn Iterator<Item=(&VoterSatisfaction<'a>,usize)>+'_>;

    fn measure_kind(&self) -> MeasureKind { self.measure().kind }
    fn instance(&self) -> &'a Instance { self.measure().instance }
    fn num_voters(&self) -> usize { self.voters().map(|(_,n)|n).sum() }

    /// Each voter's satisfaction, with multiplicity.
    fn satisfactions(&self,allocation:&[Project]) -> Vec<(Numeric,usize)> {
        let measure = self.measure();
        self.voters().map(|(v,n)|(measure.satisfaction(v,allocation),n)).collect()
    }
    /// Sum of satisfaction over all voters.
    fn total_satisfaction(&self,allocation:&[Project]) -> Numeric {
        self.satisfactions(allocation).into_iter().map(|(s,n)|s*count(n)).sum()
    }
    /// Sum over all voters of the value of one project. Only meaningful for additive measures.
    fn total_satisfaction_project(&self,project:&Project) -> Result<Numeric> {
        let measure = self.measure();
        if !measure.kind.is_additive() { return Err(PbError::InvalidParameter(format!("{} satisfaction is not additive",measure.kind))); }
        Ok(self.voters().map(|(v,n)|measure.project_value(v,project)*count(n)).sum())
    }
    fn average_satisfaction(&self,allocation:&[Project]) -> Numeric { mean(self.satisfactions(allocation)) }
    /// Gini coefficient of the voters' satisfactions, each voter counted once.
    fn satisfaction_gini(&self,allocation:&[Project]) -> Result<Numeric> {
        let expanded : Vec<Numeric> = self.satisfactions(allocation).into_iter().flat_map(|(s,n)|std::iter::repeat_n(s,n)).collect();
        gini_coefficient(&expanded)
    }
}

/// One entry per ballot of a [Profile].
#[derive(Clone,Debug)]
pub struct SatisfactionProfile<'a> {
    measure : Measure<'a>,
    voters : Vec<VoterSatisfaction<'a>>,
}

/// One entry per distinct ballot, with its multiplicity.
#[derive(Clone,Debug)]
pub struct SatisfactionMultiProfile<'a> {
    measure : Measure<'a>,
    voters : Vec<(VoterSatisfaction<'a>,usize)>,
}

impl<'a> SatisfactionProfile<'a> {
    pub fn new(profile:&'a Profile<'_>,kind:MeasureKind) -> Result<Self> { Self::with_arithmetic(profile,kind,ArithmeticMode::Exact) }
    pub fn with_arithmetic(profile:&'a Profile<'_>,kind:MeasureKind,arithmetic:ArithmeticMode) -> Result<Self> {
        let measure = Measure::new(profile.instance(),profile,kind,arithmetic)?;
        let voters = profile.ballots().iter().map(|b|measure.voter(b)).collect::<Result<Vec<_>>>()?;
        Ok(SatisfactionProfile{ measure, voters })
    }
    pub fn len(&self) -> usize { self.voters.len() }
    pub fn is_empty(&self) -> bool { self.voters.is_empty() }
    pub fn get(&self,index:usize) -> Option<&VoterSatisfaction<'a>> { self.voters.get(index) }

    /// Group voters with equal ballots.
    pub fn as_multi(&self) -> SatisfactionMultiProfile<'a> {
        let mut positions : HashMap<ByContent,usize> = HashMap::new();
        let mut voters : Vec<(VoterSatisfaction<'a>,usize)> = vec![];
        for v in &self.voters {
            match positions.get(&ByContent(v.ballot)) {
                Some(&i) => voters[i].1+=1,
                None => {
                    positions.insert(ByContent(v.ballot),voters.len());
                    voters.push((v.clone(),1));
                }
            }
        }
        SatisfactionMultiProfile{ measure: self.measure.clone(), voters }
    }
}

impl<'a> SatisfactionMultiProfile<'a> {
    pub fn new(profile:&'a MultiProfile<'_>,kind:MeasureKind) -> Result<Self> { Self::from_view(profile,kind,ArithmeticMode::Exact) }
    /// Build from either shape of profile.
    pub fn from_view<P:ProfileView+?Sized>(profile:&'a P,kind:MeasureKind,arithmetic:ArithmeticMode) -> Result<Self> {
        Self::with_instance(profile.instance(),profile,kind,arithmetic)
    }
    /// As [SatisfactionMultiProfile::from_view], measured against a different instance (such as one with a larger budget).
    pub fn with_instance<P:ProfileView+?Sized>(instance:&'a Instance,profile:&'a P,kind:MeasureKind,arithmetic:ArithmeticMode) -> Result<Self> {
        let measure = Measure::new(instance,profile,kind,arithmetic)?;
        let voters = profile.ballots_with_multiplicity().map(|(b,n)|measure.voter(b).map(|v|(v,n))).collect::<Result<Vec<_>>>()?;
        Ok(SatisfactionMultiProfile{ measure, voters })
    }
    /// Number of distinct ballots.
    pub fn len(&self) -> usize { self.voters.len() }
    pub fn is_empty(&self) -> bool { self.voters.is_empty() }

    /// One entry per voter.
    pub fn as_list(&self) -> SatisfactionProfile<'a> {
        SatisfactionProfile{ measure: self.measure.clone(), voters: self.voters.iter().flat_map(|(v,n)|std::iter::repeat_n(v.clone(),*n)).collect() }
    }
}

impl<'a> GroupSatisfaction<'a> for SatisfactionProfile<'a> {
    fn measure(&self) -> &Measure<'a> { &self.measure }
    fn voters(&self) -> Box<dyn Iterator<Item=(&VoterSatisfaction<'a>,usize)>+'_> { Box::new(self.voters.iter().map(|v|(v,1))) }
    fn num_voters(&self) -> usize { self.voters.len() }
}

impl<'a> GroupSatisfaction<'a> for SatisfactionMultiProfile<'a> {
    fn measure(&self) -> &Measure<'a> { &self.measure }
    fn voters(&self) -> Box<dyn Iterator<Item=(&VoterSatisfaction<'a>,usize)>+'_> { Box::new(self.voters.iter().map(|(v,n)|(v,*n))) }
}

/// Hash and compare a ballot by content, for grouping.
struct ByContent<'a>(&'a Ballot);
impl PartialEq for ByContent<'_> {
    fn eq(&self, other: &Self) -> bool { self.0==other.0 }
}
impl Eq for ByContent<'_> {}
impl Hash for ByContent<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.hash_content(state) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::{frac, int};
    use crate::ballot::{ApprovalBallot, CardinalBallot, OrdinalBallot};

    /// Ten projects "0".."9" costing 10..19, budget 90.
    fn instance() -> Instance {
        Instance::new((0..10).map(|i|Project::new(i.to_string(),int(10+i))),int(90)).unwrap()
    }
    fn approvals() -> Vec<ApprovalBallot> {
        vec![ApprovalBallot::new(["0","1","2","3"]),ApprovalBallot::new(["0"]),ApprovalBallot::new(["0"]),ApprovalBallot::new(["5","6"]),ApprovalBallot::new(["8","9"])]
    }
    fn pick(instance:&Instance,names:&[&str]) -> Vec<Project> {
        names.iter().map(|n|instance.get_project(n).unwrap().clone()).collect()
    }

    #[test]
    fn test_measure_names() {
        for m in MeasureKind::ALL { assert_eq!(m,m.to_string().parse::<MeasureKind>().unwrap()); }
        assert_eq!(MeasureKind::ChamberlinCourant,"Chamberlin-Courant".parse::<MeasureKind>().unwrap());
        assert!("happiness".parse::<MeasureKind>().is_err());
        assert!(MeasureKind::Borda.is_additive());
        assert!(!MeasureKind::BordaMax.is_additive());
        assert!(!MeasureKind::CostSqrt.is_additive());
    }

    #[test]
    fn test_cost_and_cardinality() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        let allocation = pick(&instance,&["0","1","8","9"]);
        let cost = SatisfactionProfile::new(&profile,MeasureKind::Cost).unwrap();
        assert_eq!(frac(78,5),cost.average_satisfaction(&allocation));
        let multi = profile.as_multiprofile();
        let cost_multi = SatisfactionMultiProfile::new(&multi,MeasureKind::Cost).unwrap();
        assert_eq!(4,cost_multi.len());
        assert_eq!(int(78),cost_multi.total_satisfaction(&allocation));
        let cardinality = SatisfactionProfile::new(&profile,MeasureKind::Cardinality).unwrap();
        assert_eq!(frac(1,3),cardinality.satisfaction_gini(&allocation).unwrap());
        assert_eq!(int(6),cardinality.total_satisfaction(&allocation));
        assert_eq!(int(3),cardinality.total_satisfaction_project(instance.get_project("0").unwrap()).unwrap());
    }

    #[test]
    fn test_empty_allocation_is_zero() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        for m in MeasureKind::ALL.iter().copied().filter(|m|m.accepts(BallotKind::Approval)) {
            let sat = SatisfactionProfile::new(&profile,m).unwrap();
            assert_eq!(int(0),sat.total_satisfaction(&[]),"measure {}",m);
        }
    }

    #[test]
    fn test_relative_measures() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        let allocation = pick(&instance,&["0","1","2","5"]);
        let relative = SatisfactionProfile::new(&profile,MeasureKind::RelativeCardinality).unwrap();
        let sats : Vec<Numeric> = relative.satisfactions(&allocation).into_iter().map(|(s,_)|s).collect();
        assert_eq!(vec![frac(3,4),int(1),int(1),frac(1,2),int(0)],sats);

        // budget 25: best feasible spend for {10,11,12} is 23 (11+12), more than the greedy 21.
        let small = Instance::new((0..3).map(|i|Project::new(i.to_string(),int(10+i))),int(25)).unwrap();
        let profile = Profile::from_ballots(&small,BallotKind::Approval,[ApprovalBallot::new(["0","1","2"])]).unwrap();
        let relative_cost = SatisfactionProfile::new(&profile,MeasureKind::RelativeCost).unwrap();
        assert_eq!(Some(int(23)),relative_cost.get(0).and_then(|v|v.normaliser.clone()));
        assert_eq!(frac(12,23),relative_cost.total_satisfaction(&pick(&small,&["2"])));
        let approx = SatisfactionProfile::new(&profile,MeasureKind::RelativeCostApprox).unwrap();
        assert_eq!(frac(12,25),approx.total_satisfaction(&pick(&small,&["2"])));
        // too many reachable totals to search, so the budget is used instead.
        let measure = Measure::new(&small,&profile,MeasureKind::RelativeCost,ArithmeticMode::Exact).unwrap();
        let ballot = &profile.ballots()[0];
        assert_eq!(int(23),measure.max_fundable_cost_bounded(ballot,100));
        assert_eq!(int(25),measure.max_fundable_cost_bounded(ballot,2));
        // everything fits, or the budget can be hit exactly.
        let roomy = Instance::new((0..3).map(|i|Project::new(i.to_string(),int(10+i))),int(40)).unwrap();
        assert_eq!(int(33),Measure::new(&roomy,&profile,MeasureKind::RelativeCost,ArithmeticMode::Exact).unwrap().max_fundable_cost_bounded(ballot,2));
        let exact_fit = Instance::new((0..3).map(|i|Project::new(i.to_string(),int(10+i))),int(21)).unwrap();
        assert_eq!(int(21),Measure::new(&exact_fit,&profile,MeasureKind::RelativeCost,ArithmeticMode::Exact).unwrap().max_fundable_cost_bounded(ballot,2));
    }

    #[test]
    fn test_effort() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        let effort = SatisfactionProfile::new(&profile,MeasureKind::Effort).unwrap();
        // "0" costs 10, approved by 3; "1" costs 11, approved by 1.
        assert_eq!(vec![(frac(10,3)+int(11),1),(frac(10,3),1),(frac(10,3),1),(int(0),1),(int(0),1)],effort.satisfactions(&pick(&instance,&["0","1"])));
        // the project's full cost is shared out.
        assert_eq!(int(10),effort.total_satisfaction_project(instance.get_project("0").unwrap()).unwrap());
    }

    #[test]
    fn test_functional() {
        let instance = Instance::new(vec![Project::new("a",int(3)),Project::new("b",int(6)),Project::new("c",int(7))],int(20)).unwrap();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["a","b"]),ApprovalBallot::new(["c"])]).unwrap();
        let allocation = pick(&instance,&["a","b"]);
        let cc = SatisfactionProfile::new(&profile,MeasureKind::ChamberlinCourant).unwrap();
        assert_eq!(int(1),cc.total_satisfaction(&allocation));
        assert_eq!(int(2),cc.total_satisfaction(&pick(&instance,&["a","c"])));
        let sqrt = SatisfactionProfile::new(&profile,MeasureKind::CostSqrt).unwrap();
        assert_eq!(int(3),sqrt.total_satisfaction(&allocation));
        assert!(cc.total_satisfaction_project(instance.get_project("a").unwrap()).is_err());
        let log = SatisfactionProfile::new(&profile,MeasureKind::CostLog).unwrap();
        assert!(log.total_satisfaction(&allocation)>int(2));
    }

    #[test]
    fn test_borda() {
        let instance = instance();
        let ballots = [vec!["0","1","2","3"],vec!["0"],vec!["0"],vec!["5","6"],vec!["8","9"]].map(|r|OrdinalBallot::from_ranking(r).unwrap());
        let profile = Profile::from_ballots(&instance,BallotKind::Ordinal,ballots).unwrap();
        let allocation = pick(&instance,&["0","1","8","9"]);
        let borda = SatisfactionProfile::new(&profile,MeasureKind::Borda).unwrap();
        // 3+2, 0, 0, 0, 1+0
        assert_eq!(int(6),borda.total_satisfaction(&allocation));
        assert_eq!(frac(6,5),borda.average_satisfaction(&allocation));
        assert_eq!(frac(6,5),borda.as_multi().average_satisfaction(&allocation));
        let multi = profile.as_multiprofile();
        assert_eq!(frac(6,5),SatisfactionMultiProfile::new(&multi,MeasureKind::Borda).unwrap().average_satisfaction(&allocation));
        let best = SatisfactionProfile::new(&profile,MeasureKind::BordaMax).unwrap();
        // 3, 0, 0, 0, 1
        assert_eq!(int(4),best.total_satisfaction(&allocation));
        // the last ranked project is worth nothing.
        assert_eq!(int(0),borda.total_satisfaction(&pick(&instance,&["3","6","9"])));
    }

    #[test]
    fn test_additive_cardinal() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Cardinal,[CardinalBallot::new([("0",int(5)),("1",int(2))]).with_default_score(int(1))]).unwrap();
        let sat = SatisfactionProfile::new(&profile,MeasureKind::AdditiveCardinal).unwrap();
        assert_eq!(int(8),sat.total_satisfaction(&pick(&instance,&["0","1","9"])));
    }

    #[test]
    fn test_kind_mismatch() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        assert_eq!(Err(PbError::SatisfactionKindMismatch{measure:MeasureKind::Borda,found:BallotKind::Approval}),SatisfactionProfile::new(&profile,MeasureKind::Borda).map(|_|()));
    }

    #[test]
    fn test_list_multi_duality() {
        let instance = instance();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,approvals()).unwrap();
        let list = SatisfactionProfile::new(&profile,MeasureKind::Cost).unwrap();
        let multi = list.as_multi();
        assert_eq!(4,multi.len());
        assert_eq!(5,multi.num_voters());
        let back = multi.as_list();
        assert_eq!(5,back.len());
        let allocation = pick(&instance,&["0","5"]);
        assert_eq!(list.total_satisfaction(&allocation),multi.total_satisfaction(&allocation));
        assert_eq!(list.total_satisfaction(&allocation),back.total_satisfaction(&allocation));
    }
}
