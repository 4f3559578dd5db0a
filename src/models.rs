// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(anyhow!("Invalid type '{}', expected income|expense", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category_id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyGoal {
    pub month: String, // YYYY-MM
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    pub holder: String,
    pub due_day: u32, // 1-31, not validated against actual month length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow!("Invalid theme '{}', expected light|dark", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// One user's complete dataset: credentials, profile, collections, prefs.
/// This is the unit of persistence; the store serializes whole accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub goal: MonthlyGoal,
    pub cards: Vec<CreditCard>,
    pub theme: Theme,
}

/// Mint `prefix-<n>` where n is one past the highest numeric suffix already
/// in use, so ids stay unique within a collection.
pub fn mint_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.rsplit('-').next()?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, max + 1)
}

impl UserAccount {
    pub fn mint_tx_id(&self) -> String {
        mint_id("tx", self.transactions.iter().map(|t| t.id.as_str()))
    }

    pub fn mint_category_id(&self) -> String {
        mint_id("cat", self.categories.iter().map(|c| c.id.as_str()))
    }

    pub fn mint_card_id(&self) -> String {
        mint_id("card", self.cards.iter().map(|c| c.id.as_str()))
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn card(&self, id: &str) -> Option<&CreditCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    pub fn update_transaction(&mut self, tx: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == tx.id) {
            Some(slot) => {
                *slot = tx;
                true
            }
            None => false,
        }
    }

    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() < before
    }

    pub fn add_category(&mut self, cat: Category) {
        self.categories.push(cat);
    }

    /// Editing a category (including its type) does not reclassify existing
    /// transactions that reference it.
    pub fn update_category(&mut self, cat: Category) -> bool {
        match self.categories.iter_mut().find(|c| c.id == cat.id) {
            Some(slot) => {
                *slot = cat;
                true
            }
            None => false,
        }
    }

    /// Transactions keep their now-dangling category id and degrade to the
    /// "Other" bucket in reports.
    pub fn delete_category(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        self.categories.len() < before
    }

    /// Replaces the single tracked goal; no history is kept.
    pub fn set_goal(&mut self, goal: MonthlyGoal) {
        self.goal = goal;
    }

    pub fn add_card(&mut self, card: CreditCard) {
        self.cards.push(card);
    }

    pub fn update_card(&mut self, card: CreditCard) -> bool {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                true
            }
            None => false,
        }
    }

    /// Hard cascade: removing a card also removes every transaction charged
    /// to it. Returns (card removed, transactions removed).
    pub fn delete_card(&mut self, id: &str) -> (bool, usize) {
        let had_card = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == had_card {
            return (false, 0);
        }
        let had_txs = self.transactions.len();
        self.transactions
            .retain(|t| t.card_id.as_deref() != Some(id));
        (true, had_txs - self.transactions.len())
    }

    /// Bulk-attach imported statement rows to a card, minting fresh ids.
    pub fn import_card_transactions(&mut self, card_id: &str, drafts: Vec<Transaction>) -> usize {
        let count = drafts.len();
        for mut tx in drafts {
            tx.id = self.mint_tx_id();
            tx.card_id = Some(card_id.to_string());
            self.transactions.push(tx);
        }
        count
    }
}
