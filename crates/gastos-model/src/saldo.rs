use serde::{Deserialize, Serialize};

/// One bank account balance line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaldoRecord {
    pub conta: String,
    pub nome_da_conta: String,
    pub secretaria: String,
    pub banco: String,
    pub tipo_recurso: String,
    pub saldo: f64,
}

impl SaldoRecord {
    /// True for unrestricted ("LIVRE") resources.
    pub fn is_livre(&self) -> bool {
        self.tipo_recurso.trim().eq_ignore_ascii_case("LIVRE")
    }
}
