use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{KhataError, Result};
use crate::models::{RawTable, Transaction, TxnType, UnknownGroup};
use crate::standardizer;

pub const UNCATEGORIZED: &str = "Other";
pub const NO_REFERENCE: &str = "N/A";

/// Internal auto-detection taxonomy, in evaluation order: the first
/// category with a matching keyword wins. This is a separate
/// vocabulary from `mapping::DEFAULT_CATEGORIES` (the list advertised
/// to users) and the two are intentionally not unified.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "swiggy", "zomato", "dominos", "pizza", "burger", "restaurant", "hotel", "tiffin",
            "dhaba", "food", "tea", "cake", "pan", "roll", "misthan",
        ],
    ),
    (
        "Groceries",
        &[
            "bigbasket", "blinkit", "grofers", "dmart", "grocery", "supermarket", "kirana",
            "namkeen", "dairy",
        ],
    ),
    (
        "Shopping",
        &["amazon", "flipkart", "myntra", "ajio", "snapdeal", "shop", "traders"],
    ),
    (
        "Bills",
        &["electricity", "water", "gas", "recharge", "dth", "postpaid", "bill", "myjio"],
    ),
    (
        "Travel",
        &["uber", "ola", "irctc", "makemytrip", "yatra", "redbus", "flight", "train", "bus"],
    ),
    (
        "Entertainment",
        &["bookmyshow", "spotify", "netflix", "prime", "hotstar"],
    ),
    ("Family", &["papa", "di", "bhaiya", "mummy"]),
    (
        "Health",
        &["pharmacy", "apollo", "1mg", "practo", "doctor", "hospital", "medicine"],
    ),
    ("Salary", &["salary", "credited by", "payout", "income"]),
    (
        "Transfer",
        &["upi", "imps", "neft", "rtgs", "fund transfer", "google pay", "gpay"],
    ),
    (
        "Stationery",
        &["stationery", "photocopy", "xerox", "printers", "students gallery"],
    ),
];

struct CategoryRule {
    name: String,
    patterns: Vec<Regex>,
}

/// Immutable, injectable rule table. Keywords match on whole-word
/// boundaries only, against the lowercased description.
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    pub fn new(rules: &[(&str, &[&str])]) -> RuleSet {
        let rules = rules
            .iter()
            .map(|(name, keywords)| CategoryRule {
                name: (*name).to_string(),
                patterns: keywords
                    .iter()
                    .map(|kw| {
                        Regex::new(&format!(r"\b{}\b", regex::escape(&kw.to_lowercase())))
                            .expect("keyword regex")
                    })
                    .collect(),
            })
            .collect();
        RuleSet { rules }
    }

    pub fn default_rules() -> RuleSet {
        RuleSet::new(DEFAULT_RULES)
    }

    fn match_category(&self, description: &str) -> Option<&str> {
        for rule in &self.rules {
            for pattern in &rule.patterns {
                if pattern.is_match(description) {
                    return Some(&rule.name);
                }
            }
        }
        None
    }
}

pub struct Categorizer {
    rules: RuleSet,
    overrides: BTreeMap<String, String>,
}

impl Categorizer {
    pub fn new(rules: RuleSet) -> Categorizer {
        Categorizer {
            rules,
            overrides: BTreeMap::new(),
        }
    }

    /// User-supplied description → category overrides. An exact match
    /// on the trimmed description wins before any rule runs.
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Categorizer {
        self.overrides = overrides;
        self
    }

    /// Pure transform: returns new rows with a category on every one,
    /// plus the unknown groups — uncategorized rows aggregated by
    /// trimmed description with signed amount sums (debits negative).
    /// Deterministic for a given input and rule table; groups come
    /// back sorted by name.
    pub fn categorize(&self, rows: &[Transaction]) -> (Vec<Transaction>, Vec<UnknownGroup>) {
        let mut out = Vec::with_capacity(rows.len());
        let mut groups: BTreeMap<String, UnknownGroup> = BTreeMap::new();

        for row in rows {
            let name = row.description.trim();
            let needle = name.to_lowercase();
            let category = self
                .overrides
                .get(name)
                .map(String::as_str)
                .or_else(|| self.rules.match_category(&needle));

            match category {
                Some(category) => out.push(Transaction {
                    category: Some(category.to_string()),
                    ..row.clone()
                }),
                None => {
                    let signed = match row.txn_type {
                        TxnType::Debit => -row.amount.abs(),
                        TxnType::Credit => row.amount.abs(),
                    };
                    let group = groups.entry(name.to_string()).or_insert_with(|| UnknownGroup {
                        name: name.to_string(),
                        upi: row
                            .reference
                            .clone()
                            .unwrap_or_else(|| NO_REFERENCE.to_string()),
                        amount: 0.0,
                    });
                    group.amount += signed;
                    out.push(Transaction {
                        category: Some(UNCATEGORIZED.to_string()),
                        ..row.clone()
                    });
                }
            }
        }

        (out, groups.into_values().collect())
    }

    /// Categorize straight from a raw record set. Fails when no
    /// description-like column resolves at all — distinct from a
    /// resolved column whose cells are all empty, which is valid and
    /// lands in the unknown pool.
    pub fn categorize_table(
        &self,
        table: &RawTable,
    ) -> Result<(Vec<Transaction>, Vec<UnknownGroup>)> {
        if !standardizer::has_description(table) {
            return Err(KhataError::Schema(
                "no description column in statement".to_string(),
            ));
        }
        Ok(self.categorize(&standardizer::standardize(table)))
    }
}
