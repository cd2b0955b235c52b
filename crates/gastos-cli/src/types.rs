use std::path::PathBuf;

use gastos_core::PipelineOutcome;
use gastos_map::MappingResult;
use gastos_model::{CleanRecord, SaldoRecord};
use gastos_report::{
    DebitoKpis, FornecedorTotal, SaldoKpis, SaldoSecretaria, SecretariaTotal,
};

/// Everything the `debitos` command shows or writes.
#[derive(Debug)]
pub struct DebitosResult {
    pub source: PathBuf,
    pub mapping: MappingResult,
    pub outcome: PipelineOutcome,
    /// Records left after the command line filters.
    pub filtered: Vec<CleanRecord>,
    pub kpis: DebitoKpis,
    pub by_secretaria: Vec<SecretariaTotal>,
    pub top_fornecedores: Vec<FornecedorTotal>,
    pub output: Option<PathBuf>,
    pub issues_output: Option<PathBuf>,
}

impl DebitosResult {
    pub fn has_issues(&self) -> bool {
        !self.outcome.is_clean()
    }
}

#[derive(Debug)]
pub struct SaldosResult {
    pub source: PathBuf,
    pub only_livre: bool,
    pub records: Vec<SaldoRecord>,
    pub kpis: SaldoKpis,
    pub by_secretaria: Vec<SaldoSecretaria>,
    pub output: Option<PathBuf>,
}
