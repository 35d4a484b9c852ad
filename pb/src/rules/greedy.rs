// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Greedy maximisation of utilitarian welfare.
//!
//! Projects are funded one at a time, each round taking the affordable project that adds the
//! most to the total satisfaction of the voters (optionally per unit of cost).

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use num::{Signed, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::arithmetic::{ArithmeticMode, Numeric};
use crate::error::{PbError, Result};
use crate::instance::{total_cost, Instance, Project};
use crate::profile::ProfileView;
use crate::rules::allocation::{AllocationDetails, BudgetAllocation, GreedyProjectDetails, GreedyWelfareDetails};
use crate::rules::AllocationRule;
use crate::satisfaction::{GroupSatisfaction, MeasureKind, SatisfactionMultiProfile};
use crate::tie_breaking::TieBreakingRule;

/// What is maximised each round.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum GreedyCriterion {
    /// The marginal welfare, ignoring cost.
    Welfare,
    /// The marginal welfare divided by the cost. A zero cost project beats any project with a positive cost.
    #[default]
    WelfarePerCost,
}

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum Resoluteness {
    /// Ties are broken, giving one outcome.
    #[default]
    Resolute,
    /// Every tie is explored, giving every outcome reachable by some way of breaking ties.
    Irresolute,
}

/// The knobs on the greedy rule.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
#[serde(default)]
pub struct GreedyWelfareConfig {
    pub criterion : GreedyCriterion,
    /// Stop as soon as the best candidate would add nothing.
    pub stop_on_non_positive_gain : bool,
    pub tie_breaking : TieBreakingRule,
    pub resoluteness : Resoluteness,
    pub arithmetic : ArithmeticMode,
}

/// The greedy rule with a particular satisfaction measure.
#[derive(Clone,Debug)]
pub struct GreedyWelfare {
    pub measure : MeasureKind,
    pub config : GreedyWelfareConfig,
}

impl GreedyWelfare {
    pub fn new(measure:MeasureKind) -> Self { GreedyWelfare{ measure, config: GreedyWelfareConfig::default() } }
    pub fn with_config(measure:MeasureKind,config:GreedyWelfareConfig) -> Self { GreedyWelfare{ measure, config } }
    /// Cost agnostic variant.
    pub fn welfare(measure:MeasureKind) -> Self {
        GreedyWelfare::with_config(measure,GreedyWelfareConfig{ criterion: GreedyCriterion::Welfare, ..Default::default() })
    }
}

impl AllocationRule for GreedyWelfare {
    fn name(&self) -> String {
        match self.config.criterion {
            GreedyCriterion::Welfare => format!("greedy_welfare({})",self.measure),
            GreedyCriterion::WelfarePerCost => format!("greedy_welfare_per_cost({})",self.measure),
        }
    }

    /// The resolute outcome, whatever [GreedyWelfareConfig::resoluteness] says.
    fn allocate(&self, instance: &Instance, profile: &dyn ProfileView, initial: &BudgetAllocation) -> Result<BudgetAllocation> {
        let run = GreedyRun::new(instance,profile,self.measure,&self.config,initial)?;
        info!(event="greedy_start",rule=%self.name(),projects=instance.len(),voters=profile.num_ballots(),budget=%instance.budget_limit());
        let res = run.go(initial)?;
        info!(event="greedy_end",rule=%self.name(),funded=res.len(),spent=%res.total_cost());
        Ok(res)
    }

    fn allocate_all(&self, instance: &Instance, profile: &dyn ProfileView, initial: &BudgetAllocation) -> Result<Vec<BudgetAllocation>> {
        match self.config.resoluteness {
            Resoluteness::Resolute => Ok(vec![self.allocate(instance,profile,initial)?]),
            Resoluteness::Irresolute => {
                let run = GreedyRun::new(instance,profile,self.measure,&self.config,initial)?;
                info!(event="greedy_start",rule=%self.name(),projects=instance.len(),voters=profile.num_ballots(),budget=%instance.budget_limit(),irresolute=true);
                let res = run.all_outcomes(initial)?;
                info!(event="greedy_end",rule=%self.name(),outcomes=res.len());
                Ok(res)
            }
        }
    }
}

/// How good a candidate looks. Any `Free` beats any `Finite`.
/// A zero cost project that adds nothing is `Finite(0)`, not `Free`.
#[derive(Clone,Debug,PartialEq,Eq,PartialOrd,Ord)]
enum Score {
    Finite(Numeric),
    /// A project costing nothing, with its positive gain.
    Free(Numeric),
}

impl Score {
    fn value(&self) -> &Numeric {
        match self { Score::Finite(v) => v, Score::Free(v) => v }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Finite(v) => write!(f,"{}",v),
            Score::Free(v) => write!(f,"free({})",v),
        }
    }
}

/// The best candidates in one round; all have the same score.
struct Round<'a> {
    tied : Vec<(&'a Project,Numeric)>,
    score : Score,
}

/// The state needed for one run of the rule.
struct GreedyRun<'a> {
    instance : &'a Instance,
    profile : &'a dyn ProfileView,
    config : &'a GreedyWelfareConfig,
    satisfaction : SatisfactionMultiProfile<'a>,
    /// Per project totals when the measure is additive, so that gains need not be recomputed.
    additive_totals : Option<HashMap<&'a str,Numeric>>,
}

impl <'a> GreedyRun<'a> {
    fn new(instance:&'a Instance,profile:&'a dyn ProfileView,measure:MeasureKind,config:&'a GreedyWelfareConfig,initial:&BudgetAllocation) -> Result<Self> {
        instance.validate()?;
        for p in initial.iter() {
            if !instance.contains(p.name()) { return Err(PbError::ProjectNotFound(p.name().to_string())); }
        }
        if !instance.is_feasible(initial) {
            return Err(PbError::InvalidParameter(format!("initial allocation {} costs more than the budget {}",initial,instance.budget_limit())));
        }
        let satisfaction = SatisfactionMultiProfile::with_instance(instance,profile,measure,config.arithmetic)?;
        let additive_totals = if measure.is_additive() {
            let mut totals = HashMap::new();
            for p in instance.projects() { totals.insert(p.name(),satisfaction.total_satisfaction_project(p)?); }
            Some(totals)
        } else { None };
        Ok(GreedyRun{ instance, profile, config, satisfaction, additive_totals })
    }

    fn gain(&self,selected:&[Project],welfare:&Numeric,project:&Project) -> Numeric {
        match &self.additive_totals {
            Some(totals) => totals.get(project.name()).cloned().unwrap_or_else(Numeric::zero),
            None => {
                let mut extended = selected.to_vec();
                extended.push(project.clone());
                self.satisfaction.total_satisfaction(&extended)-welfare
            }
        }
    }

    fn score(&self,project:&Project,gain:Numeric) -> Score {
        match self.config.criterion {
            GreedyCriterion::Welfare => Score::Finite(gain),
            GreedyCriterion::WelfarePerCost if project.cost().is_zero() => if gain.is_positive() { Score::Free(gain) } else { Score::Finite(gain) },
            GreedyCriterion::WelfarePerCost => Score::Finite(self.config.arithmetic.div(&gain,project.cost())),
        }
    }

    /// The top scoring affordable unfunded projects, or None if nothing is affordable.
    fn best_candidates(&self,selected:&[Project],remaining:&Numeric,mut details:Option<&mut GreedyWelfareDetails>) -> Option<Round<'a>> {
        let welfare = if self.additive_totals.is_some() { Numeric::zero() } else { self.satisfaction.total_satisfaction(selected) };
        let mut best : Option<Round<'a>> = None;
        for project in self.instance.projects() {
            if project.cost()>remaining || selected.contains(project) { continue; }
            let gain = self.gain(selected,&welfare,project);
            let score = self.score(project,gain.clone());
            if let Some(d) = details.as_deref_mut().and_then(|d|d.projects.iter_mut().find(|d|d.project==project.name())) {
                d.score=Some(score.value().clone());
            }
            match best.as_ref().map(|round|score.cmp(&round.score)) {
                Some(Ordering::Less) => {}
                Some(Ordering::Equal) => if let Some(round) = best.as_mut() { round.tied.push((project,gain)); },
                _ => best = Some(Round{ tied: vec![(project,gain)], score }),
            }
        }
        best
    }

    fn should_stop(&self,gain:&Numeric) -> bool { self.config.stop_on_non_positive_gain && !gain.is_positive() }

    /// Run the rule, breaking ties with the configured tie breaking rule.
    fn go(&self,initial:&BudgetAllocation) -> Result<BudgetAllocation> {
        let mut selected = initial.projects.clone();
        let mut remaining = self.instance.budget_limit()-total_cost(&selected);
        let mut details = GreedyWelfareDetails{ projects: self.instance.projects().map(|p|{
            let mut d = GreedyProjectDetails::new(p.name());
            d.discarded = !initial.contains(p.name());
            d
        }).collect() };
        let mut round = 0;
        while let Some(best) = self.best_candidates(&selected,&remaining,Some(&mut details)) {
            round+=1;
            let tied : Vec<&'a Project> = best.tied.iter().map(|(p,_)|*p).collect();
            let chosen = self.config.tie_breaking.untie(Some(self.profile),&tied)?;
            let gain = best.tied.iter().find(|(p,_)|*p==chosen).map(|(_,g)|g.clone()).unwrap_or_else(Numeric::zero);
            if self.should_stop(&gain) {
                debug!(event="greedy_stop",round,project=%chosen,gain=%gain);
                break;
            }
            remaining -= chosen.cost();
            selected.push(chosen.clone());
            if let Some(d) = details.projects.iter_mut().find(|d|d.project==chosen.name()) {
                d.discarded=false;
                d.remaining_budget=Some(remaining.clone());
            }
            debug!(event="greedy_round",round,project=%chosen,score=%best.score,tied=tied.len(),remaining=%remaining);
        }
        Ok(BudgetAllocation{ projects: selected, details: Some(AllocationDetails::GreedyWelfare(details)) })
    }

    /// Every outcome reachable by some way of breaking ties, each funded set once.
    fn all_outcomes(&self,initial:&BudgetAllocation) -> Result<Vec<BudgetAllocation>> {
        let mut visited = BTreeSet::new();
        let mut res = vec![];
        let remaining = self.instance.budget_limit()-initial.total_cost();
        self.explore(initial.projects.clone(),remaining,&mut visited,&mut res);
        Ok(res)
    }

    /// The future of a run depends only on the set funded so far, so each set is expanded once.
    fn explore(&self,selected:Vec<Project>,remaining:Numeric,visited:&mut BTreeSet<BTreeSet<String>>,res:&mut Vec<BudgetAllocation>) {
        let key : BTreeSet<String> = selected.iter().map(|p|p.name().to_string()).collect();
        if !visited.insert(key) { return; }
        let mut continued = false;
        if let Some(best) = self.best_candidates(&selected,&remaining,None) {
            let mut tied = best.tied;
            tied.sort_by(|(a,_),(b,_)|a.cmp(b));
            for (project,gain) in tied {
                if self.should_stop(&gain) { continue; }
                continued = true;
                let mut extended = selected.clone();
                extended.push(project.clone());
                self.explore(extended,&remaining-project.cost(),visited,res);
            }
        }
        if !continued {
            debug!(event="greedy_outcome",funded=selected.len(),remaining=%remaining);
            res.push(BudgetAllocation::new(selected));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::{frac, int};
    use crate::ballot::{ApprovalBallot, BallotKind};
    use crate::profile::Profile;
    use crate::satisfaction::SatisfactionProfile;

    fn names(allocation:&BudgetAllocation) -> Vec<&str> {
        let mut res : Vec<&str> = allocation.iter().map(|p|p.name()).collect();
        res.sort();
        res
    }

    fn outcomes(allocations:&[BudgetAllocation]) -> BTreeSet<Vec<String>> {
        allocations.iter().map(|a|names(a).into_iter().map(|n|n.to_string()).collect()).collect()
    }

    fn expect(list:&[&[&str]]) -> BTreeSet<Vec<String>> {
        list.iter().map(|a|a.iter().map(|n|n.to_string()).collect()).collect()
    }

    fn scenario_a() -> Instance {
        Instance::new(vec![Project::new("P1",int(10)),Project::new("P2",int(10)),Project::new("P3",int(15))],int(20)).unwrap()
    }

    /// Two voters approving everything.
    fn app_ex_1() -> Instance {
        Instance::new(vec![Project::new("p0",int(1)),Project::new("p1",int(3)),Project::new("p2",int(2)),Project::new("p3",int(1))],int(3)).unwrap()
    }

    /// Has a project costing nothing.
    fn app_ex_4() -> Instance {
        Instance::new(vec![Project::new("p0",int(0)),Project::new("p1",int(1)),Project::new("p2",int(2))],int(2)).unwrap()
    }

    fn app_ex_4_profile(instance:&Instance) -> Profile<'_> {
        Profile::from_ballots(instance,BallotKind::Approval,[ApprovalBallot::new(["p0"]),ApprovalBallot::new(["p0","p1","p2"]),ApprovalBallot::new(["p2"])]).unwrap()
    }

    #[test]
    fn test_cost_agnostic_cardinality() {
        let instance = scenario_a();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["P1","P2","P3"])]).unwrap();
        let rule = GreedyWelfare::welfare(MeasureKind::Cardinality);
        let res = rule.allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["P1","P2"],names(&res));
        assert!(res.total_cost()<=*instance.budget_limit());
        assert!(instance.is_exhaustive(&res,None));
        let Some(AllocationDetails::GreedyWelfare(details)) = &res.details else { panic!("no details") };
        let p1 = details.get("P1").unwrap();
        assert!(!p1.discarded);
        assert_eq!(Some(int(10)),p1.remaining_budget);
        assert_eq!(Some(int(0)),details.get("P2").unwrap().remaining_budget);
        let p3 = details.get("P3").unwrap();
        assert!(p3.discarded);
        assert_eq!(None,p3.remaining_budget);
        assert_eq!(Some(int(1)),p3.score);
        assert_eq!("greedy_welfare(cardinality)",rule.name());
    }

    #[test]
    fn test_everything_too_expensive() {
        let instance = Instance::new(vec![Project::new("big",int(30))],int(20)).unwrap();
        assert!(instance.is_trivial());
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["big"])]).unwrap();
        let res = GreedyWelfare::new(MeasureKind::Cost).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn test_irresolute_ties_explored() {
        let instance = app_ex_1();
        let all = ["p0","p1","p2","p3"];
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(all),ApprovalBallot::new(all)]).unwrap();
        let config = GreedyWelfareConfig{ resoluteness: Resoluteness::Irresolute, ..Default::default() };
        let cost = GreedyWelfare::with_config(MeasureKind::Cost,config.clone()).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(expect(&[&["p0","p2"],&["p0","p3"],&["p1"],&["p2","p3"]]),outcomes(&cost));
        assert_eq!(4,cost.len());
        let cardinality = GreedyWelfare::with_config(MeasureKind::Cardinality,config).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(expect(&[&["p0","p3"]]),outcomes(&cardinality));
        // resolute picks the alphabetically first of the tied projects.
        let resolute = GreedyWelfare::new(MeasureKind::Cost).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(expect(&[&["p0","p2"]]),outcomes(&resolute));
    }

    #[test]
    fn test_zero_cost_project_first() {
        let instance = app_ex_4();
        let profile = app_ex_4_profile(&instance);
        let cardinality = GreedyWelfare::new(MeasureKind::Cardinality).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!("p0",cardinality.projects[0].name());
        // under cost p0 is worth nothing, so it only comes once the money is gone.
        let cost = GreedyWelfare::new(MeasureKind::Cost).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["p2","p0"],cost.iter().map(|p|p.name()).collect::<Vec<_>>());
        let config = GreedyWelfareConfig{ resoluteness: Resoluteness::Irresolute, ..Default::default() };
        let cardinality = GreedyWelfare::with_config(MeasureKind::Cardinality,config).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(expect(&[&["p0","p1"],&["p0","p2"]]),outcomes(&cardinality));
    }

    #[test]
    fn test_stop_on_non_positive_gain() {
        let instance = Instance::new(vec![Project::new("liked",int(1)),Project::new("unloved",int(1))],int(2)).unwrap();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["liked"])]).unwrap();
        let keep_going = GreedyWelfare::new(MeasureKind::Cardinality).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["liked","unloved"],names(&keep_going));
        let config = GreedyWelfareConfig{ stop_on_non_positive_gain: true, ..Default::default() };
        let stop = GreedyWelfare::with_config(MeasureKind::Cardinality,config).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["liked"],names(&stop));
    }

    #[test]
    fn test_unwanted_free_project() {
        let instance = Instance::new(vec![Project::new("free",int(0)),Project::new("liked",int(1))],int(1)).unwrap();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["liked"])]).unwrap();
        let config = GreedyWelfareConfig{ stop_on_non_positive_gain: true, ..Default::default() };
        let stop = GreedyWelfare::with_config(MeasureKind::Cardinality,config.clone()).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["liked"],names(&stop));
        let all = GreedyWelfare::with_config(MeasureKind::Cardinality,GreedyWelfareConfig{ resoluteness: Resoluteness::Irresolute, ..config }).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(expect(&[&["liked"]]),outcomes(&all));
        // without the stop it costs nothing to fund as well.
        let keep_going = GreedyWelfare::new(MeasureKind::Cardinality).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        assert_eq!(vec!["liked","free"],keep_going.iter().map(|p|p.name()).collect::<Vec<_>>());
    }

    #[test]
    fn test_approximate_arithmetic_keeps_ties() {
        let instance = Instance::new(["a","b","c","d"].map(|n|Project::new(n,int(1))),int(3)).unwrap();
        // each voter can afford all they approve, so every approved project is worth a third.
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["a","b","c"]),ApprovalBallot::new(["a","b","d"])]).unwrap();
        let rounded = SatisfactionProfile::with_arithmetic(&profile,MeasureKind::RelativeCost,ArithmeticMode::Approximate).unwrap();
        assert_ne!(frac(1,3),rounded.total_satisfaction(&[instance.get_project("c").unwrap().clone()]));
        let run = |arithmetic:ArithmeticMode,resoluteness:Resoluteness| {
            let config = GreedyWelfareConfig{ arithmetic, resoluteness, ..Default::default() };
            GreedyWelfare::with_config(MeasureKind::RelativeCost,config).allocate_all(&instance,&profile,&BudgetAllocation::empty()).unwrap()
        };
        let exact = run(ArithmeticMode::Exact,Resoluteness::Resolute);
        let approximate = run(ArithmeticMode::Approximate,Resoluteness::Resolute);
        assert_eq!(vec!["a","b","c"],exact[0].iter().map(|p|p.name()).collect::<Vec<_>>());
        assert_eq!(exact,approximate);
        assert!(instance.is_feasible(&approximate[0]));
        let exact_all = run(ArithmeticMode::Exact,Resoluteness::Irresolute);
        let approximate_all = run(ArithmeticMode::Approximate,Resoluteness::Irresolute);
        assert_eq!(expect(&[&["a","b","c"],&["a","b","d"]]),outcomes(&exact_all));
        assert_eq!(outcomes(&exact_all),outcomes(&approximate_all));
    }

    #[test]
    fn test_non_additive_measure() {
        let instance = Instance::new(vec![Project::new("a",int(1)),Project::new("b",int(1)),Project::new("c",int(1))],int(2)).unwrap();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["a"]),ApprovalBallot::new(["a","b"]),ApprovalBallot::new(["c"])]).unwrap();
        let res = GreedyWelfare::welfare(MeasureKind::ChamberlinCourant).allocate(&instance,&profile,&BudgetAllocation::empty()).unwrap();
        // once a is funded, b adds nothing to anyone.
        assert_eq!(vec!["a","c"],names(&res));
    }

    #[test]
    fn test_initial_allocation() {
        let instance = scenario_a();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["P1","P2","P3"])]).unwrap();
        let rule = GreedyWelfare::welfare(MeasureKind::Cardinality);
        let p3 = instance.get_project("P3").unwrap().clone();
        let res = rule.allocate(&instance,&profile,&BudgetAllocation::new(vec![p3.clone()])).unwrap();
        assert_eq!(vec!["P3"],names(&res));
        let p1 = instance.get_project("P1").unwrap().clone();
        assert!(matches!(rule.allocate(&instance,&profile,&BudgetAllocation::new(vec![p3,p1])),Err(PbError::InvalidParameter(_))));
        let stranger = BudgetAllocation::new(vec![Project::new("stranger",int(1))]);
        assert_eq!(Err(PbError::ProjectNotFound("stranger".to_string())),rule.allocate(&instance,&profile,&stranger).map(|a|a.len()));
    }

    #[test]
    fn test_refusing_ties() {
        let instance = scenario_a();
        let profile = Profile::from_ballots(&instance,BallotKind::Approval,[ApprovalBallot::new(["P1","P2","P3"])]).unwrap();
        let config = GreedyWelfareConfig{ criterion: GreedyCriterion::Welfare, tie_breaking: TieBreakingRule::Refuse, ..Default::default() };
        let res = GreedyWelfare::with_config(MeasureKind::Cardinality,config).allocate(&instance,&profile,&BudgetAllocation::empty());
        assert_eq!(Err(PbError::UnresolvedTie(vec!["P1".to_string(),"P2".to_string(),"P3".to_string()])),res.map(|a|a.len()));
    }

    #[test]
    fn test_score_order() {
        assert!(Score::Free(int(0))>Score::Finite(int(1000)));
        assert!(Score::Finite(int(2))>Score::Finite(int(1)));
        assert!(Score::Free(int(2))>Score::Free(int(1)));
    }
}
