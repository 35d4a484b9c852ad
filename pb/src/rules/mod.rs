// Copyright 2024 Andrew Conway.
// This file is part of ConcretePB.
// ConcretePB is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcretePB is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcretePB.  If not, see <https://www.gnu.org/licenses/>.


//! Rules that decide which projects get funded.

pub mod allocation;
pub mod greedy;
pub mod exhaustion;

use crate::error::Result;
use crate::instance::Instance;
use crate::profile::ProfileView;
use crate::rules::allocation::BudgetAllocation;

/// A participatory budgeting rule.
///
/// The instance is passed separately from the profile so that a rule can be run against a
/// modified budget while keeping the voters' ballots.
pub trait AllocationRule {
    fn name(&self) -> String;

    /// Compute a single outcome, continuing from `initial` (usually empty).
    fn allocate(&self,instance:&Instance,profile:&dyn ProfileView,initial:&BudgetAllocation) -> Result<BudgetAllocation>;

    /// Every outcome the rule considers acceptable. Rules without a notion of ties give just the one.
    fn allocate_all(&self,instance:&Instance,profile:&dyn ProfileView,initial:&BudgetAllocation) -> Result<Vec<BudgetAllocation>> {
        Ok(vec![self.allocate(instance,profile,initial)?])
    }
}
