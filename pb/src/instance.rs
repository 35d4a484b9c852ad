// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Information about the election, such as the projects and the budget limit.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use num::{Signed, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::arithmetic::{ceil_to_granularity, count, int, rational_map_string, rational_string, Numeric};
use crate::error::{PbError, Result};

/// A project that could be funded. Identified by its name.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct Project {
    name : String,
    #[serde(with="rational_string")]
    cost : Numeric,
    #[serde(default,skip_serializing_if="BTreeSet::is_empty")]
    categories : BTreeSet<String>,
    /// target group -> minimum.
    #[serde(default,with="rational_map_string",skip_serializing_if="BTreeMap::is_empty")]
    targets : BTreeMap<String,Numeric>,
}

impl Project {
    pub fn new(name:impl Into<String>,cost:Numeric) -> Self {
        Project{ name: name.into(), cost, categories: BTreeSet::new(), targets: BTreeMap::new() }
    }
    pub fn with_categories<I:IntoIterator<Item=S>,S:Into<String>>(mut self,categories:I) -> Self {
        self.categories.extend(categories.into_iter().map(|c|c.into()));
        self
    }
    pub fn with_targets<I:IntoIterator<Item=(S,Numeric)>,S:Into<String>>(mut self,targets:I) -> Self {
        self.targets.extend(targets.into_iter().map(|(k,v)|(k.into(),v)));
        self
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn cost(&self) -> &Numeric { &self.cost }
    pub fn categories(&self) -> &BTreeSet<String> { &self.categories }
    pub fn targets(&self) -> &BTreeMap<String,Numeric> { &self.targets }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool { self.name==other.name }
}
impl Eq for Project {}
impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) { self.name.hash(state) }
}
impl PartialOrd for Project {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl Ord for Project {
    fn cmp(&self, other: &Self) -> Ordering { self.name.cmp(&other.name) }
}
impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.name) }
}

/// The total cost of some projects.
/// ```
/// use pb::instance::{total_cost,Project};
/// use pb::arithmetic::int;
/// let projects = vec![Project::new("a",int(3)),Project::new("b",int(4))];
/// assert_eq!(int(7),total_cost(&projects));
/// assert_eq!(int(0),total_cost(&[]));
/// ```
pub fn total_cost<'a,I:IntoIterator<Item=&'a Project>>(projects:I) -> Numeric {
    projects.into_iter().map(|p|&p.cost).sum()
}

/// A problem a parser met while reading an instance, kept rather than aborting.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct ParsingError {
    #[serde(default,skip_serializing_if="Option::is_none")]
    pub line : Option<usize>,
    pub message : String,
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f,"line {} : {}",line,self.message),
            None => write!(f,"{}",self.message),
        }
    }
}

/// The projects on offer and the money available.
///
/// Project names are unique. Constructors reject duplicates; [Instance::add_project] replaces
/// and hands back the project previously held under that name.
#[derive(Clone,Debug,Serialize,Deserialize)]
#[serde(try_from="InstanceRecord")]
pub struct Instance {
    #[serde(with="project_list")]
    projects : BTreeMap<String,Project>,
    #[serde(with="rational_string")]
    budget_limit : Numeric,
    #[serde(default,skip_serializing_if="BTreeMap::is_empty")]
    pub meta : BTreeMap<String,String>,
    /// project name -> metadata about it.
    #[serde(default,skip_serializing_if="BTreeMap::is_empty")]
    pub project_meta : BTreeMap<String,BTreeMap<String,String>>,
    #[serde(default,skip_serializing_if="Vec::is_empty")]
    pub parsing_errors : Vec<ParsingError>,
}

/// What is read in, before it is checked to be a valid [Instance].
#[derive(Deserialize)]
struct InstanceRecord {
    #[serde(with="project_list")]
    projects : BTreeMap<String,Project>,
    #[serde(with="rational_string")]
    budget_limit : Numeric,
    #[serde(default)]
    meta : BTreeMap<String,String>,
    #[serde(default)]
    project_meta : BTreeMap<String,BTreeMap<String,String>>,
    #[serde(default)]
    parsing_errors : Vec<ParsingError>,
}

impl TryFrom<InstanceRecord> for Instance {
    type Error = PbError;
    fn try_from(record: InstanceRecord) -> Result<Self> {
        let res = Instance{ projects: record.projects, budget_limit: record.budget_limit, meta: record.meta, project_meta: record.project_meta, parsing_errors: record.parsing_errors };
        res.validate()?;
        Ok(res)
    }
}

/// Serialize the projects as a list. Duplicate names are an error on the way back in.
mod project_list {
    use super::*;
    use serde::{Deserializer, Serializer};
    pub fn serialize<S:Serializer>(projects:&BTreeMap<String,Project>,serializer:S) -> std::result::Result<S::Ok,S::Error> {
        serializer.collect_seq(projects.values())
    }
    pub fn deserialize<'de,D:Deserializer<'de>>(deserializer:D) -> std::result::Result<BTreeMap<String,Project>,D::Error> {
        let list = Vec::<Project>::deserialize(deserializer)?;
        collect_unique(list).map_err(serde::de::Error::custom)
    }
}

fn collect_unique<I:IntoIterator<Item=Project>>(projects:I) -> Result<BTreeMap<String,Project>> {
    let mut res = BTreeMap::new();
    for p in projects {
        if res.contains_key(&p.name) { return Err(PbError::DuplicateProject(p.name)); }
        res.insert(p.name.clone(),p);
    }
    Ok(res)
}

impl Instance {
    /// Make an instance, failing on duplicate names, negative costs or a negative budget.
    /// ```
    /// use pb::instance::{Instance,Project};
    /// use pb::arithmetic::int;
    /// let instance = Instance::new(vec![Project::new("p1",int(10)),Project::new("p2",int(15))],int(20)).unwrap();
    /// assert_eq!(2,instance.len());
    /// assert!(Instance::new(vec![Project::new("p1",int(10)),Project::new("p1",int(15))],int(20)).is_err());
    /// ```
    pub fn new<I:IntoIterator<Item=Project>>(projects:I,budget_limit:Numeric) -> Result<Self> {
        Self::from_parts(projects,budget_limit,BTreeMap::new(),BTreeMap::new(),vec![])
    }

    /// Everything a parser may have collected.
    pub fn from_parts<I:IntoIterator<Item=Project>>(projects:I,budget_limit:Numeric,meta:BTreeMap<String,String>,project_meta:BTreeMap<String,BTreeMap<String,String>>,parsing_errors:Vec<ParsingError>) -> Result<Self> {
        let res = Instance{ projects: collect_unique(projects)?, budget_limit, meta, project_meta, parsing_errors };
        res.validate()?;
        Ok(res)
    }

    /// Check no cost or budget is negative.
    pub fn validate(&self) -> Result<()> {
        if self.budget_limit.is_negative() { return Err(PbError::NegativeBudget(self.budget_limit.clone())); }
        if let Some(p) = self.projects.values().find(|p|p.cost.is_negative()) { return Err(PbError::NegativeCost(p.name.clone())); }
        Ok(())
    }

    pub fn budget_limit(&self) -> &Numeric { &self.budget_limit }
    pub fn set_budget_limit(&mut self,budget_limit:Numeric) -> Result<()> {
        if budget_limit.is_negative() { return Err(PbError::NegativeBudget(budget_limit)); }
        self.budget_limit=budget_limit;
        Ok(())
    }

    pub fn len(&self) -> usize { self.projects.len() }
    pub fn is_empty(&self) -> bool { self.projects.is_empty() }
    /// The projects, sorted by name.
    pub fn projects(&self) -> impl Iterator<Item=&Project> { self.projects.values() }
    pub fn project_names(&self) -> impl Iterator<Item=&str> { self.projects.keys().map(|k|k.as_str()) }
    pub fn contains(&self,name:&str) -> bool { self.projects.contains_key(name) }
    pub fn get_project(&self,name:&str) -> Result<&Project> {
        self.projects.get(name).ok_or_else(||PbError::ProjectNotFound(name.to_string()))
    }

    /// Add a project. If there was already one of the same name it is replaced and returned.
    pub fn add_project(&mut self,project:Project) -> Result<Option<Project>> {
        if project.cost.is_negative() { return Err(PbError::NegativeCost(project.name)); }
        Ok(self.projects.insert(project.name.clone(),project))
    }
    pub fn remove_project(&mut self,name:&str) -> Result<Project> {
        self.projects.remove(name).ok_or_else(||PbError::ProjectNotFound(name.to_string()))
    }

    /// Projects in either. Where both have a project of the same name, self's is kept.
    pub fn union(&self,other:&Instance) -> Instance {
        let mut res = self.clone();
        res.union_update(other);
        res
    }
    pub fn union_update(&mut self,other:&Instance) {
        for p in other.projects.values() {
            if !self.projects.contains_key(&p.name) { self.projects.insert(p.name.clone(),p.clone()); }
        }
    }
    pub fn intersection(&self,other:&Instance) -> Instance {
        let mut res = self.clone();
        res.intersection_update(other);
        res
    }
    pub fn intersection_update(&mut self,other:&Instance) {
        self.projects.retain(|name,_|other.projects.contains_key(name));
    }
    pub fn difference(&self,other:&Instance) -> Instance {
        let mut res = self.clone();
        res.difference_update(other);
        res
    }
    pub fn difference_update(&mut self,other:&Instance) {
        self.projects.retain(|name,_|!other.projects.contains_key(name));
    }
    pub fn symmetric_difference(&self,other:&Instance) -> Instance {
        let mut res = self.clone();
        res.symmetric_difference_update(other);
        res
    }
    pub fn symmetric_difference_update(&mut self,other:&Instance) {
        for p in other.projects.values() {
            if self.projects.remove(&p.name).is_none() { self.projects.insert(p.name.clone(),p.clone()); }
        }
    }

    /// Whether the projects could all be funded together.
    pub fn is_feasible(&self,projects:&[Project]) -> bool { total_cost(projects)<=self.budget_limit }

    /// Whether the allocation is feasible, and no project in `available` (default all projects) but not
    /// in the allocation could be added while staying within budget.
    pub fn is_exhaustive(&self,allocation:&[Project],available:Option<&[Project]>) -> bool {
        let spent = total_cost(allocation);
        if spent>self.budget_limit { return false; }
        let left = &self.budget_limit-&spent;
        let can_add = |p:&Project| !allocation.contains(p) && p.cost<=left;
        match available {
            Some(available) => !available.iter().any(can_add),
            None => !self.projects.values().any(can_add),
        }
    }

    /// Every project on its own costs more than the budget limit, so nothing can be funded.
    /// True for an instance with no projects.
    pub fn is_trivial(&self) -> bool { self.projects.values().all(|p|p.cost>self.budget_limit) }

    /// All projects can be funded at once.
    pub fn is_fully_fundable(&self) -> bool { total_cost(self.projects.values())<=self.budget_limit }

    /// Every feasible subset of the projects, including the empty one. Exponential in the number of projects.
    pub fn budget_allocations(&self) -> Vec<Vec<Project>> {
        fn extend(remaining:&[&Project],left:&Numeric,so_far:&mut Vec<Project>,res:&mut Vec<Vec<Project>>) {
            match remaining.split_first() {
                None => res.push(so_far.clone()),
                Some((first,rest)) => {
                    extend(rest,left,so_far,res);
                    if first.cost<=*left {
                        so_far.push((*first).clone());
                        extend(rest,&(left-&first.cost),so_far,res);
                        so_far.pop();
                    }
                }
            }
        }
        let projects : Vec<&Project> = self.projects.values().collect();
        let mut res = vec![];
        extend(&projects,&self.budget_limit,&mut vec![],&mut res);
        res
    }

    /// All category labels used by any project.
    pub fn categories(&self) -> BTreeSet<String> {
        self.projects.values().flat_map(|p|p.categories.iter().cloned()).collect()
    }
    /// All target groups used by any project.
    pub fn targets(&self) -> BTreeSet<String> {
        self.projects.values().flat_map(|p|p.targets.keys().cloned()).collect()
    }

    /// A synthetic instance with projects named "p0", "p1", ... whose costs are uniform integers
    /// in `min_cost..=max_cost` rounded up to `granularity`. The budget is a uniform fraction of
    /// the total cost, also rounded up to `granularity`.
    pub fn random<R:Rng>(rng:&mut R,num_projects:usize,min_cost:i64,max_cost:i64,granularity:&Numeric) -> Result<Self> {
        if min_cost<0 || max_cost<min_cost { return Err(PbError::InvalidParameter(format!("cost range {}..={}",min_cost,max_cost))); }
        let projects : Vec<Project> = (0..num_projects).map(|i|{
            let cost = int(rng.random_range(min_cost..=max_cost));
            Project::new(format!("p{}",i),ceil_to_granularity(&cost,granularity))
        }).collect();
        let total = total_cost(&projects);
        // fraction in steps of 1/1000, enough resolution for synthetic data.
        let fraction = count(rng.random_range(0..=1000))/count(1000);
        let budget = if total.is_zero() { total } else { ceil_to_granularity(&(total*fraction),granularity) };
        Instance::new(projects,budget)
    }
}
