use std::collections::BTreeMap;

use gastos_model::CanonicalField;

use crate::utils::normalize_text;

/// Header spellings seen in municipal débito exports, per field.
fn default_synonyms(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::Date => &[
            "DATA",
            "DATE",
            "DATA PAGAMENTO",
            "DATA DO PAGAMENTO",
            "DATA EMISSAO",
            "DATA LANCAMENTO",
            "DATA VENCIMENTO",
        ],
        CanonicalField::Amount => &[
            "VALOR",
            "AMOUNT",
            "VLR",
            "VALOR PAGO",
            "VALOR TOTAL",
            "VALOR LIQUIDO",
            "VALOR DEBITO",
        ],
        CanonicalField::Cnpj => &[
            "CNPJ",
            "CNPJ CPF",
            "CPF CNPJ",
            "CNPJ FORNECEDOR",
            "DOCUMENTO",
        ],
        CanonicalField::Secretaria => &[
            "SECRETARIA",
            "ORGAO",
            "UNIDADE",
            "UNIDADE GESTORA",
            "DEPARTAMENTO",
        ],
        CanonicalField::Fornecedor => &[
            "FORNECEDOR",
            "NOME FORNECEDOR",
            "CREDOR",
            "FAVORECIDO",
            "RAZAO SOCIAL",
            "SUPPLIER",
        ],
    }
}

/// Normalized synonyms for every canonical field, including its own name.
pub fn build_field_patterns() -> BTreeMap<CanonicalField, Vec<String>> {
    let mut patterns = BTreeMap::new();
    for field in CanonicalField::ALL {
        let mut values: Vec<String> = default_synonyms(field)
            .iter()
            .map(|synonym| normalize_text(synonym))
            .collect();
        let own = normalize_text(field.as_str());
        if !values.contains(&own) {
            values.push(own);
        }
        patterns.insert(field, values);
    }
    patterns
}
