//! Utility functions for mapping operations.

/// Normalizes a header for comparison: accents folded, upper-cased, every
/// non-alphanumeric run collapsed into a single space.
pub fn normalize_text(raw: &str) -> String {
    let folded: String = raw
        .trim()
        .chars()
        .map(|ch| {
            let ch = fold_accent(ch).to_ascii_uppercase();
            if ch.is_ascii_alphanumeric() { ch } else { ' ' }
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_separators() {
        assert_eq!(normalize_text("  Órgão "), "ORGAO");
        assert_eq!(normalize_text("CNPJ/CPF"), "CNPJ CPF");
        assert_eq!(normalize_text("Valor Pago (R$)"), "VALOR PAGO R");
        assert_eq!(normalize_text("dt._pagamento"), "DT PAGAMENTO");
        assert_eq!(normalize_text("Razão Social"), "RAZAO SOCIAL");
    }
}
