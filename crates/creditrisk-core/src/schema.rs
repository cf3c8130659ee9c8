//! The loan application schema: 31 columns in the exact order the model was
//! trained on.

/// Number of columns every loan application must carry.
pub const FEATURE_COUNT: usize = 31;

/// How a column is represented in a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// A plain number (integer or decimal).
    Numeric,
    /// One code out of a small canonical set.
    Categorical(&'static [&'static str]),
}

impl FeatureKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureKind::Numeric)
    }

    /// Canonical codes for categorical columns; empty for numeric ones.
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            FeatureKind::Numeric => &[],
            FeatureKind::Categorical(codes) => codes,
        }
    }
}

/// A single schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub name: &'static str,
    pub kind: FeatureKind,
}

const fn numeric(name: &'static str) -> Feature {
    Feature { name, kind: FeatureKind::Numeric }
}

const fn categorical(name: &'static str, codes: &'static [&'static str]) -> Feature {
    Feature { name, kind: FeatureKind::Categorical(codes) }
}

/// All columns in training order.
pub static FEATURES: [Feature; FEATURE_COUNT] = [
    categorical("loan_limit", &["cf", "ncf"]),
    categorical("Gender", &["Male", "Female"]),
    categorical("approv_in_adv", &["Y", "N"]),
    categorical("loan_type", &["type1", "type2", "type3"]),
    categorical("loan_purpose", &["A1", "A2", "A3", "A4", "A13", "A23", "A34", "A41"]),
    numeric("Credit_Worthiness"),
    categorical("open_credit", &["nopc", "opc"]),
    categorical("business_or_commercial", &["com", "not_com"]),
    categorical("Neg_ammortization", &["neg_amm", "not_neg"]),
    categorical("interest_only", &["int_only", "not_int"]),
    categorical("lump_sum_payment", &["lpsm", "not_lpsm"]),
    categorical("construction_type", &["sb", "mf"]),
    categorical("occupancy_type", &["PR", "IR", "SP"]),
    categorical("Secured_by", &["home", "land"]),
    numeric("total_units"),
    categorical("credit_type", &["EXP", "EQUI", "CRIF", "CIB"]),
    categorical("co-applicant_credit_type", &["CIB", "EXP", "EQUI", "CRIF"]),
    numeric("age"),
    categorical("submission_of_application", &["to_inst", "not_inst"]),
    categorical("Region", &["North", "South", "East", "West", "Central"]),
    categorical("Security_Type", &["direct", "co-op"]),
    numeric("loan_amount"),
    numeric("rate_of_interest"),
    numeric("Interest_rate_spread"),
    numeric("Upfront_charges"),
    numeric("term"),
    numeric("property_value"),
    numeric("income"),
    numeric("Credit_Score"),
    numeric("LTV"),
    numeric("dtir1"),
];

/// Column names in training order.
pub fn columns() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|f| f.name)
}

/// Position of a column in training order.
pub fn column_index(name: &str) -> Option<usize> {
    FEATURES.iter().position(|f| f.name == name)
}

/// Looks up a column by name.
pub fn feature(name: &str) -> Option<&'static Feature> {
    FEATURES.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_columns_are_unique() {
        let names: HashSet<&str> = columns().collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_kind_split() {
        let numeric = FEATURES.iter().filter(|f| f.kind.is_numeric()).count();
        assert_eq!(numeric, 13);
        assert_eq!(FEATURE_COUNT - numeric, 18);
    }

    #[test]
    fn test_training_order_edges() {
        assert_eq!(column_index("loan_limit"), Some(0));
        assert_eq!(column_index("co-applicant_credit_type"), Some(16));
        assert_eq!(column_index("dtir1"), Some(30));
        assert_eq!(column_index("ID"), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(feature("approv_in_adv").unwrap().kind.codes(), &["Y", "N"]);
        assert!(feature("LTV").unwrap().kind.codes().is_empty());
    }
}
