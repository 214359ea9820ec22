//! Coin rewards and the household ledger

use std::collections::VecDeque;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActivityType;

pub const MIN_REWARD: u32 = 3;
pub const MAX_REWARD: u32 = 25;

/// Oldest transactions are dropped past this many
const MAX_TRANSACTIONS: usize = 200;
/// Transactions shown in a summary
const RECENT_TRANSACTIONS: usize = 20;

/// Coins for finishing a task: longer and harder work pays more
pub fn reward(work_duration: f32, activity: ActivityType) -> u32 {
    let base = 3.0 + work_duration.max(0.0) * 0.5 * activity.difficulty();
    if !base.is_finite() {
        return MAX_REWARD;
    }
    (base.round() as u32).clamp(MIN_REWARD, MAX_REWARD)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionCategory {
    TaskReward,
    Bonus,
    Upgrade,
    Furniture,
    Accessory,
    RoomUpgrade,
    Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: u32,
    pub label: String,
    pub sim_minutes: f64,
}

/// Totals over the retained transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: u64,
    pub total_expense: u64,
    pub balance: i64,
    pub by_category: Vec<(TransactionCategory, u64)>,
    /// Newest first
    pub recent: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: VecDeque<Transaction>,
    next_id: u64,
    coins: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current coin balance, including transactions already rotated out
    pub fn coins(&self) -> i64 {
        self.coins
    }

    pub fn record(
        &mut self,
        kind: TransactionKind,
        category: TransactionCategory,
        amount: u32,
        label: impl Into<String>,
        sim_minutes: f64,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        match kind {
            TransactionKind::Income => self.coins += amount as i64,
            TransactionKind::Expense => self.coins -= amount as i64,
        }
        self.transactions.push_back(Transaction {
            id,
            kind,
            category,
            amount,
            label: label.into(),
            sim_minutes,
        });
        while self.transactions.len() > MAX_TRANSACTIONS {
            self.transactions.pop_front();
        }
        id
    }

    /// Credit the reward for a completed task; returns the amount
    pub fn credit_task(&mut self, description: &str, work_duration: f32, activity: ActivityType, sim_minutes: f64) -> u32 {
        let amount = reward(work_duration, activity);
        self.record(
            TransactionKind::Income,
            TransactionCategory::TaskReward,
            amount,
            description,
            sim_minutes,
        );
        amount
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn summary(&self) -> BudgetSummary {
        let mut total_income = 0u64;
        let mut total_expense = 0u64;
        let mut by_category: AHashMap<TransactionCategory, u64> = AHashMap::new();

        for tx in &self.transactions {
            match tx.kind {
                TransactionKind::Income => total_income += tx.amount as u64,
                TransactionKind::Expense => total_expense += tx.amount as u64,
            }
            *by_category.entry(tx.category).or_default() += tx.amount as u64;
        }

        let mut by_category: Vec<_> = by_category.into_iter().collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| (a.0 as u8).cmp(&(b.0 as u8))));

        BudgetSummary {
            total_income,
            total_expense,
            balance: total_income as i64 - total_expense as i64,
            by_category,
            recent: self
                .transactions
                .iter()
                .rev()
                .take(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
        }
    }
}
