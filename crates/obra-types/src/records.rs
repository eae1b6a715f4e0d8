use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lifecycle state of one budget version.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Archived,
}

impl BudgetStatus {
    pub const ALL: [BudgetStatus; 5] = [
        BudgetStatus::Draft,
        BudgetStatus::Submitted,
        BudgetStatus::Approved,
        BudgetStatus::Rejected,
        BudgetStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Draft => "draft",
            BudgetStatus::Submitted => "submitted",
            BudgetStatus::Approved => "approved",
            BudgetStatus::Rejected => "rejected",
            BudgetStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<BudgetStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for BudgetStatus {
    fn default() -> Self {
        BudgetStatus::Draft
    }
}

/// Whether a price is quoted directly or composed from other prices.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Base,
    Decomposed,
}

impl PriceType {
    pub const ALL: [PriceType; 2] = [PriceType::Base, PriceType::Decomposed];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Base => "base",
            PriceType::Decomposed => "decomposed",
        }
    }

    pub fn parse(s: &str) -> Option<PriceType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for PriceType {
    fn default() -> Self {
        PriceType::Base
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Chapter,
    Line,
}

impl ElementType {
    pub const ALL: [ElementType; 2] = [ElementType::Chapter, ElementType::Line];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Chapter => "chapter",
            ElementType::Line => "line",
        }
    }

    pub fn parse(s: &str) -> Option<ElementType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ElementType {
    fn default() -> Self {
        ElementType::Chapter
    }
}

/// How a decomposition component's quantity is obtained.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    Fixed,
    Formula,
}

impl CalculationMode {
    pub const ALL: [CalculationMode; 2] = [CalculationMode::Fixed, CalculationMode::Formula];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Fixed => "fixed",
            CalculationMode::Formula => "formula",
        }
    }

    pub fn parse(s: &str) -> Option<CalculationMode> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for CalculationMode {
    fn default() -> Self {
        CalculationMode::Fixed
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Option<i64>,
    pub code: String,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One costed version of a project.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub project_id: i64,
    pub code: String,
    pub version_number: i32,
    pub name: String,
    pub status: BudgetStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    /// Write-only on the wire; the server never echoes the stored hash.
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub role_id: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub id: Option<i64>,
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub formula: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A price-bank edition, e.g. "2025.Q1".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Version {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub id: Option<i64>,
    pub version_id: i64,
    pub code: String,
    pub description: String,
    pub base_price: f64,
    pub unit_id: i64,
    pub price_type: PriceType,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One row of a budget tree, either a chapter or a costed line.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub id: Option<i64>,
    pub budget_id: i64,
    pub parent_id: Option<i64>,
    pub version_id: i64,
    pub element_type: ElementType,
    pub code: String,
    pub budget_code: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A quantity taken against a budget element for a given price line.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub id: Option<i64>,
    pub element_id: i64,
    pub price_id: i64,
    pub params_json: Value,
    pub measurement_text: Option<String>,
    pub measured_quantity: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Component row of a decomposed price.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Decomposition {
    pub id: Option<i64>,
    pub parent_price_id: i64,
    pub component_price_id: i64,
    pub calculation_mode: CalculationMode,
    pub fixed_quantity: Option<f64>,
    pub params_json: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
