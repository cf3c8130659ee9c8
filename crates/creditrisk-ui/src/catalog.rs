//! Display text for the form, per locale.
//!
//! Select boxes show localized labels; the model only understands the
//! canonical codes, so every choice carries both.

use creditrisk_config::Locale;

/// One select box option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub code: &'static str,
}

const fn c(label: &'static str, code: &'static str) -> Choice {
    Choice { label, code }
}

type ChoiceTable = &'static [(&'static str, &'static [Choice])];
type LabelTable = &'static [(&'static str, &'static str)];

pub struct Catalog {
    pub locale: Locale,
    pub title: &'static str,
    pub sections: [&'static str; 3],
    pub submit: &'static str,
    pub result_heading: &'static str,
    pub metric_label: &'static str,
    pub threshold_label: &'static str,
    pub chart_title: &'static str,
    /// Bar labels for class 0 and class 1.
    pub chart_labels: [&'static str; 2],
    pub invalid_input: &'static str,
    labels: LabelTable,
    choices: ChoiceTable,
}

impl Catalog {
    pub fn for_locale(locale: Locale) -> &'static Catalog {
        match locale {
            Locale::Es => &ES,
            Locale::En => &EN,
        }
    }

    /// Widget label; falls back to the column name.
    pub fn label(&self, column: &str) -> &'static str {
        self.labels
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, label)| *label)
            .unwrap_or_else(|| fallback(column))
    }

    /// Options of a categorical column; empty for other columns.
    pub fn choices(&self, column: &str) -> &'static [Choice] {
        self.choices
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, choices)| *choices)
            .unwrap_or(&[])
    }

    /// Maps a display label back to its canonical code.
    pub fn code_for(&self, column: &str, label: &str) -> Option<&'static str> {
        self.choices(column).iter().find(|ch| ch.label == label).map(|ch| ch.code)
    }

    /// Sentence under the status label.
    pub fn classified(&self, high_risk: bool, threshold: f64) -> String {
        match (self.locale, high_risk) {
            (Locale::Es, true) => {
                format!("Clasificado como Alto Riesgo basado en el umbral ajustado de: {threshold}")
            }
            (Locale::Es, false) => {
                format!("Clasificado como Bajo Riesgo basado en el umbral ajustado de: {threshold}")
            }
            (Locale::En, true) => {
                format!("Classified as High Risk based on the adjusted threshold of: {threshold}")
            }
            (Locale::En, false) => {
                format!("Classified as Low Risk based on the adjusted threshold of: {threshold}")
            }
        }
    }

    pub fn service_error(&self, status: u16) -> String {
        match self.locale {
            Locale::Es => format!("❌ Error al conectar con la API (Código: {status})."),
            Locale::En => format!("❌ Error from the risk API (status: {status})."),
        }
    }

    pub fn unreachable(&self, url: &str) -> String {
        match self.locale {
            Locale::Es => format!(
                "❌ ERROR: No se pudo conectar a la API en {url}. \
                 Por favor, asegúrese de que el servicio de riesgo esté corriendo."
            ),
            Locale::En => format!(
                "❌ ERROR: Could not connect to the API at {url}. \
                 Please make sure the risk service is running."
            ),
        }
    }

    pub fn unexpected(&self, detail: &str) -> String {
        match self.locale {
            Locale::Es => format!("Error inesperado: {detail}"),
            Locale::En => format!("Unexpected error: {detail}"),
        }
    }

    /// Reason shown next to a field that failed validation.
    pub fn field_problem(&self, problem: &FieldProblem) -> String {
        match (self.locale, problem) {
            (Locale::Es, FieldProblem::Required) => "campo obligatorio".into(),
            (Locale::Es, FieldProblem::NotANumber) => "debe ser un número".into(),
            (Locale::Es, FieldProblem::BelowMin(min)) => format!("debe ser mayor o igual a {min}"),
            (Locale::Es, FieldProblem::AboveMax(max)) => format!("debe ser menor o igual a {max}"),
            (Locale::Es, FieldProblem::OffStep(step)) => format!("debe avanzar en pasos de {step}"),
            (Locale::Es, FieldProblem::UnknownOption) => "opción no válida".into(),
            (Locale::En, FieldProblem::Required) => "required".into(),
            (Locale::En, FieldProblem::NotANumber) => "must be a number".into(),
            (Locale::En, FieldProblem::BelowMin(min)) => format!("must be at least {min}"),
            (Locale::En, FieldProblem::AboveMax(max)) => format!("must be at most {max}"),
            (Locale::En, FieldProblem::OffStep(step)) => format!("must move in steps of {step}"),
            (Locale::En, FieldProblem::UnknownOption) => "not a valid option".into(),
        }
    }
}

/// Why a submitted field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldProblem {
    Required,
    NotANumber,
    BelowMin(f64),
    AboveMax(f64),
    /// Slider value between two steps.
    OffStep(f64),
    UnknownOption,
}

fn fallback(column: &str) -> &'static str {
    creditrisk_core::schema::feature(column).map(|f| f.name).unwrap_or("?")
}

// ─────────────────────────────────────────────────────────────────────────────
// Spanish
// ─────────────────────────────────────────────────────────────────────────────

static ES: Catalog = Catalog {
    locale: Locale::Es,
    title: "Clasificación de Riesgo Crediticio",
    sections: [
        "Datos Financieros y Crediticios",
        "Datos del Préstamo y Personales",
        "Garantías y Condiciones",
    ],
    submit: "Evaluar Riesgo Crediticio",
    result_heading: "Resultado de la Evaluación",
    metric_label: "Probabilidad de Default (Riesgo)",
    threshold_label: "Umbral",
    chart_title: "Probabilidad",
    chart_labels: ["Bajo Riesgo (0)", "Alto Riesgo (1)"],
    invalid_input: "Revise los siguientes campos:",
    labels: &[
        ("Credit_Score", "Puntuación Crediticia"),
        ("income", "Ingreso Mensual"),
        ("dtir1", "Ratio Deuda/Ingreso (DTI)"),
        ("loan_amount", "Monto del Préstamo"),
        ("LTV", "Loan to Value (LTV) %"),
        ("property_value", "Valor de la Propiedad"),
        ("open_credit", "Crédito Abierto"),
        ("credit_type", "Tipo de Crédito"),
        ("co-applicant_credit_type", "Crédito Co-aplicante"),
        ("Credit_Worthiness", "Solvencia Crediticia"),
        ("rate_of_interest", "Tasa de Interés (%)"),
        ("loan_type", "Tipo de Préstamo"),
        ("loan_purpose", "Propósito del Préstamo"),
        ("Gender", "Género"),
        ("approv_in_adv", "Aprobado Anticipado"),
        ("business_or_commercial", "Comercial"),
        ("occupancy_type", "Tipo de Ocupación"),
        ("term", "Plazo (meses)"),
        ("age", "Edad"),
        ("total_units", "Unidades Totales"),
        ("Region", "Región"),
        ("Secured_by", "Garantizado por"),
        ("Security_Type", "Tipo de Garantía"),
        ("submission_of_application", "Envío Aplicación"),
        ("construction_type", "Tipo de Construcción"),
        ("loan_limit", "Límite de Préstamo"),
        ("Neg_ammortization", "Amort. Negativa"),
        ("interest_only", "Solo Intereses"),
        ("lump_sum_payment", "Pago Global"),
        ("Interest_rate_spread", "Diferencial de Tasa de Interés"),
        ("Upfront_charges", "Cargos Iniciales/Adelantados"),
    ],
    choices: &[
        ("open_credit", &[c("Sin Crédito Abierto", "nopc"), c("Con Crédito Abierto", "opc")]),
        ("credit_type", &[c("EXP", "EXP"), c("EQUI", "EQUI"), c("CRIF", "CRIF"), c("CIB", "CIB")]),
        (
            "co-applicant_credit_type",
            &[c("CIB", "CIB"), c("EXP", "EXP"), c("EQUI", "EQUI"), c("CRIF", "CRIF")],
        ),
        ("loan_type", &[c("Tipo 1", "type1"), c("Tipo 2", "type2"), c("Tipo 3", "type3")]),
        (
            "loan_purpose",
            &[
                c("Propósito A1", "A1"),
                c("Propósito A2", "A2"),
                c("Propósito A3", "A3"),
                c("Propósito A4", "A4"),
                c("Propósito A13", "A13"),
                c("Propósito A23", "A23"),
                c("Propósito A34", "A34"),
                c("Propósito A41", "A41"),
            ],
        ),
        ("Gender", &[c("Hombre", "Male"), c("Mujer", "Female")]),
        ("approv_in_adv", &[c("Sí", "Y"), c("No", "N")]),
        ("business_or_commercial", &[c("Comercial", "com"), c("No Comercial", "not_com")]),
        (
            "occupancy_type",
            &[
                c("Residencia Principal (PR)", "PR"),
                c("Inversión/Alquiler (IR)", "IR"),
                c("Segunda Vivienda (SP)", "SP"),
            ],
        ),
        (
            "Region",
            &[
                c("Norte", "North"),
                c("Sur", "South"),
                c("Este", "East"),
                c("Oeste", "West"),
                c("Central", "Central"),
            ],
        ),
        ("Secured_by", &[c("Vivienda/Inmueble", "home"), c("Terreno", "land")]),
        ("Security_Type", &[c("Directa", "direct"), c("Cooperativa", "co-op")]),
        (
            "submission_of_application",
            &[c("A la Institución", "to_inst"), c("No a la Institución", "not_inst")],
        ),
        (
            "construction_type",
            &[c("Construcción en Sitio (SB)", "sb"), c("Prefabricada/Móvil (MF)", "mf")],
        ),
        (
            "loan_limit",
            &[c("Conforme a Límite (CF)", "cf"), c("No Conforme a Límite (NCF)", "ncf")],
        ),
        ("Neg_ammortization", &[c("Sí (Negativa)", "neg_amm"), c("No (Estándar)", "not_neg")]),
        ("interest_only", &[c("Solo Intereses", "int_only"), c("Interés y Principal", "not_int")]),
        (
            "lump_sum_payment",
            &[c("Sí (Pago Global)", "lpsm"), c("No (Sin Pago Global)", "not_lpsm")],
        ),
    ],
};

// ─────────────────────────────────────────────────────────────────────────────
// English
// ─────────────────────────────────────────────────────────────────────────────

static EN: Catalog = Catalog {
    locale: Locale::En,
    title: "Credit Risk Classification",
    sections: ["Financial and Credit Data", "Loan and Personal Data", "Collateral and Conditions"],
    submit: "Assess Credit Risk",
    result_heading: "Assessment Result",
    metric_label: "Probability of Default (Risk)",
    threshold_label: "Threshold",
    chart_title: "Probability",
    chart_labels: ["Low Risk (0)", "High Risk (1)"],
    invalid_input: "Please check the following fields:",
    labels: &[
        ("Credit_Score", "Credit Score"),
        ("income", "Monthly Income"),
        ("dtir1", "Debt-to-Income Ratio (DTI)"),
        ("loan_amount", "Loan Amount"),
        ("LTV", "Loan to Value (LTV) %"),
        ("property_value", "Property Value"),
        ("open_credit", "Open Credit"),
        ("credit_type", "Credit Type"),
        ("co-applicant_credit_type", "Co-applicant Credit Type"),
        ("Credit_Worthiness", "Credit Worthiness"),
        ("rate_of_interest", "Interest Rate (%)"),
        ("loan_type", "Loan Type"),
        ("loan_purpose", "Loan Purpose"),
        ("Gender", "Gender"),
        ("approv_in_adv", "Approved in Advance"),
        ("business_or_commercial", "Business or Commercial"),
        ("occupancy_type", "Occupancy Type"),
        ("term", "Term (months)"),
        ("age", "Age"),
        ("total_units", "Total Units"),
        ("Region", "Region"),
        ("Secured_by", "Secured by"),
        ("Security_Type", "Security Type"),
        ("submission_of_application", "Application Submission"),
        ("construction_type", "Construction Type"),
        ("loan_limit", "Loan Limit"),
        ("Neg_ammortization", "Negative Amortization"),
        ("interest_only", "Interest Only"),
        ("lump_sum_payment", "Lump Sum Payment"),
        ("Interest_rate_spread", "Interest Rate Spread"),
        ("Upfront_charges", "Upfront Charges"),
    ],
    choices: &[
        ("open_credit", &[c("No Open Credit", "nopc"), c("Open Credit", "opc")]),
        ("credit_type", &[c("EXP", "EXP"), c("EQUI", "EQUI"), c("CRIF", "CRIF"), c("CIB", "CIB")]),
        (
            "co-applicant_credit_type",
            &[c("CIB", "CIB"), c("EXP", "EXP"), c("EQUI", "EQUI"), c("CRIF", "CRIF")],
        ),
        ("loan_type", &[c("Type 1", "type1"), c("Type 2", "type2"), c("Type 3", "type3")]),
        (
            "loan_purpose",
            &[
                c("Purpose A1", "A1"),
                c("Purpose A2", "A2"),
                c("Purpose A3", "A3"),
                c("Purpose A4", "A4"),
                c("Purpose A13", "A13"),
                c("Purpose A23", "A23"),
                c("Purpose A34", "A34"),
                c("Purpose A41", "A41"),
            ],
        ),
        ("Gender", &[c("Male", "Male"), c("Female", "Female")]),
        ("approv_in_adv", &[c("Yes", "Y"), c("No", "N")]),
        ("business_or_commercial", &[c("Commercial", "com"), c("Non-commercial", "not_com")]),
        (
            "occupancy_type",
            &[
                c("Primary Residence (PR)", "PR"),
                c("Investment/Rental (IR)", "IR"),
                c("Second Home (SP)", "SP"),
            ],
        ),
        (
            "Region",
            &[
                c("North", "North"),
                c("South", "South"),
                c("East", "East"),
                c("West", "West"),
                c("Central", "Central"),
            ],
        ),
        ("Secured_by", &[c("Home/Property", "home"), c("Land", "land")]),
        ("Security_Type", &[c("Direct", "direct"), c("Co-operative", "co-op")]),
        (
            "submission_of_application",
            &[c("To Institution", "to_inst"), c("Not to Institution", "not_inst")],
        ),
        (
            "construction_type",
            &[c("Site Built (SB)", "sb"), c("Manufactured/Mobile (MF)", "mf")],
        ),
        (
            "loan_limit",
            &[c("Conforming (CF)", "cf"), c("Non-conforming (NCF)", "ncf")],
        ),
        ("Neg_ammortization", &[c("Yes (Negative)", "neg_amm"), c("No (Standard)", "not_neg")]),
        ("interest_only", &[c("Interest Only", "int_only"), c("Interest and Principal", "not_int")]),
        ("lump_sum_payment", &[c("Yes (Lump Sum)", "lpsm"), c("No (No Lump Sum)", "not_lpsm")]),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use creditrisk_core::schema::FEATURES;
    use std::collections::HashSet;

    const LOCALES: [Locale; 2] = [Locale::Es, Locale::En];

    #[test]
    fn test_every_column_has_a_label() {
        for locale in LOCALES {
            let catalog = Catalog::for_locale(locale);
            for feature in FEATURES.iter() {
                assert!(
                    catalog.labels.iter().any(|(col, _)| *col == feature.name),
                    "{locale}: no label for {}",
                    feature.name
                );
            }
        }
    }

    #[test]
    fn test_choices_cover_schema_codes() {
        for locale in LOCALES {
            let catalog = Catalog::for_locale(locale);
            for feature in FEATURES.iter() {
                let codes: HashSet<&str> =
                    catalog.choices(feature.name).iter().map(|ch| ch.code).collect();
                let expected: HashSet<&str> = feature.kind.codes().iter().copied().collect();
                assert_eq!(codes, expected, "{locale}: {}", feature.name);
            }
        }
    }

    #[test]
    fn test_labels_are_unambiguous_per_column() {
        for locale in LOCALES {
            let catalog = Catalog::for_locale(locale);
            for (column, choices) in catalog.choices {
                let labels: HashSet<&str> = choices.iter().map(|ch| ch.label).collect();
                assert_eq!(labels.len(), choices.len(), "{locale}: duplicate label in {column}");
            }
        }
    }

    #[test]
    fn test_label_code_mapping() {
        let es = Catalog::for_locale(Locale::Es);
        assert_eq!(es.code_for("approv_in_adv", "Sí"), Some("Y"));
        assert_eq!(es.code_for("Gender", "Mujer"), Some("Female"));
        assert_eq!(es.code_for("Region", "Oeste"), Some("West"));
        assert_eq!(es.code_for("Gender", "Female"), None);

        let en = Catalog::for_locale(Locale::En);
        assert_eq!(en.code_for("open_credit", "Open Credit"), Some("opc"));
        assert_eq!(en.label("LTV"), "Loan to Value (LTV) %");
    }

    #[test]
    fn test_messages() {
        let es = Catalog::for_locale(Locale::Es);
        assert!(es.classified(true, 0.35).ends_with("0.35"));
        assert!(es.unreachable("http://127.0.0.1:5000/credit_risk").contains("127.0.0.1:5000"));
        assert!(es.service_error(500).contains("500"));
    }
}
