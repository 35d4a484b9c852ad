// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Ways of using up money a rule left unspent.

use num::Signed;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::arithmetic::{optional_rational_string, Numeric};
use crate::error::{PbError, Result};
use crate::instance::{total_cost, Instance};
use crate::profile::ProfileView;
use crate::rules::allocation::BudgetAllocation;
use crate::rules::AllocationRule;

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct BudgetIncreaseConfig {
    /// How much to add to the budget each time. Required, and must be positive.
    #[serde(with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub budget_step : Option<Numeric>,
    /// The largest budget tried. Defaults to the budget plus the cost of every project.
    #[serde(with="optional_rational_string",skip_serializing_if="Option::is_none")]
    pub budget_bound : Option<Numeric>,
    /// Return the first outcome that is exhaustive for the real budget, rather than carrying on
    /// until the outcome stops being feasible.
    pub exhaustive_stop : bool,
}

impl Default for BudgetIncreaseConfig {
    fn default() -> Self { BudgetIncreaseConfig{ budget_step: None, budget_bound: None, exhaustive_stop: true } }
}

impl BudgetIncreaseConfig {
    pub fn with_step(budget_step:Numeric) -> Self { BudgetIncreaseConfig{ budget_step: Some(budget_step), ..Default::default() } }
}

/// Run the rule with ever larger budgets, keeping the last outcome that is still affordable with the real budget.
///
/// Stops at the first outcome exhaustive for the real budget if [BudgetIncreaseConfig::exhaustive_stop],
/// when an outcome costs more than the real budget (returning the one before), or when the bound is reached.
pub fn exhaustion_by_budget_increase(instance:&Instance,profile:&dyn ProfileView,rule:&dyn AllocationRule,config:&BudgetIncreaseConfig,initial:&BudgetAllocation) -> Result<BudgetAllocation> {
    let step = match &config.budget_step {
        Some(step) if step.is_positive() => step.clone(),
        Some(step) => return Err(PbError::InvalidParameter(format!("budget step {} should be positive",step))),
        None => return Err(PbError::InvalidParameter("exhaustion by budget increase needs a budget step".to_string())),
    };
    let bound = config.budget_bound.clone().unwrap_or_else(||instance.budget_limit()+total_cost(instance.projects()));
    info!(event="budget_increase_start",rule=%rule.name(),budget=%instance.budget_limit(),step=%step,bound=%bound);
    let mut modified = instance.clone();
    let mut previous = initial.clone();
    let mut iterations = 0;
    loop {
        iterations+=1;
        let outcome = rule.allocate(&modified,profile,initial)?;
        debug!(event="budget_increase_round",budget=%modified.budget_limit(),funded=outcome.len(),spent=%outcome.total_cost());
        if !instance.is_feasible(&outcome) { break; }
        let exhaustive = instance.is_exhaustive(&outcome,None);
        previous = outcome;
        if config.exhaustive_stop && exhaustive { break; }
        if modified.budget_limit()>=&bound { break; }
        let next = (modified.budget_limit()+&step).min(bound.clone());
        modified.set_budget_limit(next)?;
    }
    info!(event="budget_increase_end",rule=%rule.name(),iterations,funded=previous.len(),spent=%previous.total_cost());
    Ok(previous)
}

/// Run each rule in turn, each starting from the outcome of the one before.
pub fn completion_by_rule_combination(instance:&Instance,profile:&dyn ProfileView,rules:&[&dyn AllocationRule],initial:&BudgetAllocation) -> Result<BudgetAllocation> {
    if rules.is_empty() { return Err(PbError::Empty("list of rules")); }
    let mut current = initial.clone();
    for rule in rules {
        current = rule.allocate(instance,profile,&current)?;
        debug!(event="rule_combination_step",rule=%rule.name(),funded=current.len(),spent=%current.total_cost());
    }
    Ok(current)
}

/// [exhaustion_by_budget_increase] as a rule in its own right.
pub struct BudgetIncrease<R:AllocationRule> {
    pub rule : R,
    pub config : BudgetIncreaseConfig,
}

impl <R:AllocationRule> AllocationRule for BudgetIncrease<R> {
    fn name(&self) -> String { format!("{}+budget_increase",self.rule.name()) }
    fn allocate(&self, instance: &Instance, profile: &dyn ProfileView, initial: &BudgetAllocation) -> Result<BudgetAllocation> {
        exhaustion_by_budget_increase(instance,profile,&self.rule,&self.config,initial)
    }
}

/// [completion_by_rule_combination] as a rule in its own right.
pub struct RuleCombination {
    pub rules : Vec<Box<dyn AllocationRule>>,
}

impl AllocationRule for RuleCombination {
    fn name(&self) -> String { self.rules.iter().map(|r|r.name()).collect::<Vec<_>>().join("+") }
    fn allocate(&self, instance: &Instance, profile: &dyn ProfileView, initial: &BudgetAllocation) -> Result<BudgetAllocation> {
        let rules : Vec<&dyn AllocationRule> = self.rules.iter().map(|r|r.as_ref()).collect();
        completion_by_rule_combination(instance,profile,&rules,initial)
    }
}
