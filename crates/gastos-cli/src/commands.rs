use anyhow::{Context, Result};
use comfy_table::Table;
use gastos_cli::config::{AppConfig, PipelineOverrides, apply_overrides, explicit_mapping};
use gastos_core::{
    DebitoFilter, SaldoFilter, check_required_columns, prepare_saldos, required_debito_columns,
    run_pipeline,
};
use gastos_ingest::{list_sheets, read_table};
use gastos_map::{MappingEngine, MappingResult, build_column_hints};
use gastos_model::RawTable;
use gastos_report::{
    clamp_top_n, debito_kpis, export_debitos, export_issues, export_saldos, saldo_by_secretaria,
    saldo_kpis, top_fornecedores, totals_by_secretaria,
};
use gastos_transform::normalize_cnpj;
use tracing::{info, info_span, warn};

use crate::cli::{DebitosArgs, MapArgs, MappingArgs, SaldosArgs, SheetsArgs};
use crate::summary::apply_table_style;
use crate::types::{DebitosResult, SaldosResult};

pub fn run_debitos(args: &DebitosArgs, config: &AppConfig) -> Result<DebitosResult> {
    let source = &args.input.input;
    let span = info_span!("debitos", path = %source.display());
    let _guard = span.enter();

    let options = apply_overrides(
        config.pipeline.clone(),
        &PipelineOverrides {
            date_formats: args.date_formats.clone(),
            percentile: args.percentile,
            dedupe: args.dedupe,
        },
    )?;
    let cnpjs = args
        .cnpjs
        .iter()
        .map(|cnpj| normalize_cnpj(cnpj))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --cnpj")?;
    let filter = DebitoFilter::new()
        .with_date_range(args.from, args.to)
        .with_secretarias(&args.secretarias)
        .with_fornecedores(&args.fornecedores)
        .with_cnpjs(cnpjs)
        .with_amount_range(args.min_amount, args.max_amount);
    let filter = match &args.fornecedor_contains {
        Some(needle) => filter.with_fornecedor_contains(needle.as_str()),
        None => filter,
    };
    filter.validate()?;

    let table = read_table(source, args.input.sheet.as_deref())
        .with_context(|| format!("read {}", source.display()))?;
    let mapping = resolve_mapping(&table, &args.mapping, config)?;
    for field in mapping.missing_required() {
        warn!(field = field.as_str(), "required field has no column");
    }

    let outcome = run_pipeline(&table, &mapping.mapping, &options).context("débitos pipeline")?;
    let filtered = filter.apply(&outcome.records)?;
    info!(
        records = outcome.records.len(),
        filtered = filtered.len(),
        "applied filters"
    );

    let kpis = debito_kpis(&filtered);
    let by_secretaria = totals_by_secretaria(&filtered).context("totals by secretaria")?;
    let top = top_fornecedores(&filtered, clamp_top_n(args.top)).context("fornecedor ranking")?;

    let style = args.style.into();
    if let Some(path) = &args.output {
        export_debitos(path, &filtered, style)?;
        info!(path = %path.display(), records = filtered.len(), "wrote débitos");
    }
    if let Some(path) = &args.issues_output {
        export_issues(path, &outcome.issues)?;
        info!(path = %path.display(), issues = outcome.issues.len(), "wrote issues");
    }

    Ok(DebitosResult {
        source: source.clone(),
        mapping,
        outcome,
        filtered,
        kpis,
        by_secretaria,
        top_fornecedores: top,
        output: args.output.clone(),
        issues_output: args.issues_output.clone(),
    })
}

pub fn run_saldos(args: &SaldosArgs) -> Result<SaldosResult> {
    let source = &args.input.input;
    let span = info_span!("saldos", path = %source.display());
    let _guard = span.enter();

    let table = read_table(source, args.input.sheet.as_deref())
        .with_context(|| format!("read {}", source.display()))?;
    let only_livre = !args.all_resources;
    let records = prepare_saldos(&table, only_livre)?;
    let records = SaldoFilter::new()
        .with_secretarias(&args.secretarias)
        .with_bancos(&args.bancos)
        .with_tipos_recurso(&args.tipos)
        .apply(&records);

    let kpis = saldo_kpis(&records);
    let by_secretaria = saldo_by_secretaria(&records).context("saldo by secretaria")?;
    if let Some(path) = &args.output {
        export_saldos(path, &records, args.style.into())?;
        info!(path = %path.display(), records = records.len(), "wrote saldos");
    }

    Ok(SaldosResult {
        source: source.clone(),
        only_livre,
        records,
        kpis,
        by_secretaria,
        output: args.output.clone(),
    })
}

pub fn run_map(args: &MapArgs, config: &AppConfig) -> Result<MappingResult> {
    let source = &args.input.input;
    let table = read_table(source, args.input.sheet.as_deref())
        .with_context(|| format!("read {}", source.display()))?;
    resolve_mapping(&table, &args.mapping, config)
}

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let sheets = list_sheets(&args.input)
        .with_context(|| format!("list sheets of {}", args.input.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["#", "Sheet"]);
    apply_table_style(&mut table);
    for (index, name) in sheets.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), name.clone()]);
    }
    println!("{table}");
    Ok(())
}

/// Explicit `--map`/config fields first, then inference from headers and
/// sampled values unless `--no-infer` is set.
fn resolve_mapping(
    table: &RawTable,
    args: &MappingArgs,
    config: &AppConfig,
) -> Result<MappingResult> {
    let explicit = explicit_mapping(config, &args.map)?;
    if let Err(error) = check_required_columns(table, required_debito_columns()) {
        info!("table does not follow the débitos template ({error})");
    }
    if args.no_infer {
        return Ok(MappingEngine::default().resolve_explicit(&table.headers, &explicit));
    }
    let engine =
        MappingEngine::new(build_column_hints(table)).with_min_confidence(args.min_confidence);
    Ok(engine.resolve(&table.headers, &explicit))
}
